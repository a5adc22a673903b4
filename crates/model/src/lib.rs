pub mod catalog;
pub mod core;
pub mod listing;
pub mod pagination;
pub mod records;
