//! Dynamic operations over reflected values: debug printing, invoking members
//! by name and proxies forwarding member accesses to a handler.

mod debug;
mod invoke;
mod proxy;

pub use debug::*;
pub use invoke::*;
pub use proxy::*;
