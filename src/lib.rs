#![forbid(unsafe_code)]
//! mailscout: find and verify e-mail addresses through SMTP `RCPT TO`
//! probing, without sending mail.

pub mod candidates;
pub mod mx;
pub mod scout;
pub mod smtp_verify;

pub use candidates::{Candidate, CandidateGenerator, CandidateSource, NameInput};
pub use mx::{LookupMx, MxError, MxRecord, SystemResolver, resolve_mx};
pub use scout::{
    BulkEntry, BulkResult, Scout, ScoutOptions, VerificationResult, VerificationStatus,
};
pub use smtp_verify::{ErrorKind, ProbeError, ProbeOptions, ProbeOutcome, SmtpReply, probe};
