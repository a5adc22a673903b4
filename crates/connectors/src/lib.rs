pub mod error;
pub mod genquery;
pub mod listing;
pub mod protocol;
