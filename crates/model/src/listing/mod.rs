pub mod entry;
pub mod list_and_count;
