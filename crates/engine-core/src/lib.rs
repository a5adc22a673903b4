pub mod error;
pub mod pager;
