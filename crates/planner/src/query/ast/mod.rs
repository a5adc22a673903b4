//! The GenQuery vocabulary: catalog columns, operators, and the immutable
//! query specification built from them.

pub mod column;
pub mod operator;
pub mod options;
pub mod spec;
