//! The two seams between this crate and the outside world: a transport that
//! exchanges protocol messages and a resolver that stats catalog paths.

pub mod message;
pub mod transport;
