pub mod object_stat;
