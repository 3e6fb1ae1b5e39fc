use std::fmt;
use std::time::Duration;

#[cfg(feature = "with-serde")]
use serde::{Deserialize, Serialize};

use crate::candidates::NameInput;
use crate::smtp_verify::{ProbeError, SmtpReply};

#[cfg_attr(feature = "with-serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "with-serde", serde(rename_all = "snake_case"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerificationStatus {
    Found,
    NotFound,
}

impl fmt::Display for VerificationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Found => "found",
            Self::NotFound => "not_found",
        })
    }
}

/// Outcome of probing one candidate address.
#[cfg_attr(feature = "with-serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct VerificationResult {
    pub email: String,
    pub status: VerificationStatus,
    /// `"<code> <text>"` for an SMTP answer, `"Rejected: <error>"` otherwise.
    pub message: String,
    pub user_name: String,
    pub domain: String,
    /// Mail exchange used, empty when resolution failed.
    pub mx: String,
    pub connections: u32,
    pub ver_ops: u32,
    /// Wall-clock seconds, rounded to milliseconds.
    pub time_exec: f64,
}

/// Probe bookkeeping gathered by the orchestrator for one candidate.
pub(crate) struct ProbeTrace {
    pub mx: String,
    pub connections: u32,
    pub ver_ops: u32,
    pub elapsed: Duration,
}

impl VerificationResult {
    pub(crate) fn from_probe(
        email: &str,
        domain: &str,
        trace: ProbeTrace,
        result: Result<SmtpReply, ProbeError>,
    ) -> Self {
        let (status, message) = match result {
            Ok(reply) if reply.is_recipient_accepted() => {
                (VerificationStatus::Found, reply.to_string())
            }
            Ok(reply) => (VerificationStatus::NotFound, reply.to_string()),
            Err(err) => (VerificationStatus::NotFound, format!("Rejected: {err}")),
        };
        Self {
            email: email.to_string(),
            status,
            message,
            user_name: display_name(email),
            domain: domain.to_string(),
            mx: trace.mx,
            connections: trace.connections,
            ver_ops: trace.ver_ops,
            time_exec: round_millis(trace.elapsed),
        }
    }

    /// Stand-in returned when a domain produced no candidate at all.
    pub fn placeholder(domain: &str) -> Self {
        Self {
            email: String::new(),
            status: VerificationStatus::NotFound,
            message: "Rejected".to_string(),
            user_name: String::new(),
            domain: domain.to_string(),
            mx: String::new(),
            connections: 0,
            ver_ops: 0,
            time_exec: 0.0,
        }
    }

    pub fn is_found(&self) -> bool {
        self.status == VerificationStatus::Found
    }
}

/// Local-part with dots turned into spaces, in title case
/// (`john.doe` -> `John Doe`).
pub(crate) fn display_name(email: &str) -> String {
    let local = email.split('@').next().unwrap_or_default().replace('.', " ");
    let mut out = String::with_capacity(local.len());
    let mut prev_is_letter = false;
    for ch in local.chars() {
        if ch.is_alphabetic() {
            if prev_is_letter {
                out.extend(ch.to_lowercase());
            } else {
                out.extend(ch.to_uppercase());
            }
            prev_is_letter = true;
        } else {
            out.push(ch);
            prev_is_letter = false;
        }
    }
    out
}

pub(crate) fn round_millis(elapsed: Duration) -> f64 {
    (elapsed.as_secs_f64() * 1_000.0).round() / 1_000.0
}

/// One domain of a bulk request.
#[cfg_attr(feature = "with-serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BulkEntry {
    pub domain: String,
    #[cfg_attr(feature = "with-serde", serde(default))]
    pub names: Option<NameInput>,
}

impl BulkEntry {
    pub fn new(domain: impl Into<String>, names: Option<NameInput>) -> Self {
        Self {
            domain: domain.into(),
            names,
        }
    }
}

/// Results of one bulk entry, echoing the input as given.
#[cfg_attr(feature = "with-serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct BulkResult {
    pub domain: String,
    pub names: Option<NameInput>,
    pub valid_emails: Vec<VerificationResult>,
}
