//! SMTP recipient probing.
//!
//! The public entry point is [`probe`], which opens one bounded-timeout
//! connection to a mail exchange, runs `EHLO`/`MAIL FROM`/`RCPT TO` and
//! hands back the `RCPT TO` reply without ever reaching `DATA`.

mod error;
mod options;
mod probe;
mod session;
mod types;

pub use error::ProbeError;
pub use options::ProbeOptions;
pub use probe::probe;
pub use types::{ErrorKind, ProbeOutcome, ProbeStage, SmtpReply};

#[cfg(test)]
pub(crate) mod tests;
