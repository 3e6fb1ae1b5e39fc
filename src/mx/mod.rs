//! DNS MX resolution.
//!
//! The public entry point is [`resolve_mx`], which performs a synchronous
//! lookup with the system resolver and returns the host name of the first
//! mail exchange in answer order.

mod error;
mod resolver;
mod types;

pub use error::MxError;
pub use resolver::{LookupMx, SystemResolver, resolve_mx, resolve_mx_with};
pub use types::MxRecord;

#[cfg(test)]
pub(crate) mod tests;
