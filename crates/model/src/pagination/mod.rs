pub mod descriptor;
pub mod listing;
