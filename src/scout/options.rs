#[cfg(feature = "with-serde")]
use serde::{Deserialize, Serialize};

use crate::candidates::CandidateGenerator;
use crate::smtp_verify::ProbeOptions;

/// Constructor-level configuration of a [`Scout`](crate::Scout).
#[cfg_attr(feature = "with-serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "with-serde", serde(default))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoutOptions {
    /// Generate name-based variants when names are given.
    pub check_variants: bool,
    /// Generate role-based prefixes when no names are given.
    pub check_prefixes: bool,
    /// Carried for callers; catch-all detection is not performed.
    pub check_catchall: bool,
    /// Transliterate names to ASCII and strip punctuation.
    pub normalize: bool,
    /// Carried for callers; candidates are probed sequentially.
    pub num_threads: usize,
    /// Worker threads used by bulk lookups.
    pub num_bulk_threads: usize,
    /// SMTP timeout in seconds; `0` disables it.
    pub smtp_timeout: u64,
    pub smtp_port: u16,
    pub helo_domain: String,
    /// Envelope sender; empty means `noreply@<helo_domain>`.
    pub mail_from: String,
    /// Probe every candidate until one is found instead of only the first.
    pub probe_all: bool,
    /// Random pause between probes in `probe_all` mode, `(min, max)` in ms.
    pub probe_delay_ms: Option<(u64, u64)>,
}

impl Default for ScoutOptions {
    fn default() -> Self {
        Self {
            check_variants: true,
            check_prefixes: true,
            check_catchall: true,
            normalize: true,
            num_threads: 5,
            num_bulk_threads: 1,
            smtp_timeout: 2,
            smtp_port: 25,
            helo_domain: "localhost".to_string(),
            mail_from: String::new(),
            probe_all: false,
            probe_delay_ms: None,
        }
    }
}

impl ScoutOptions {
    pub fn generator(&self) -> CandidateGenerator {
        CandidateGenerator {
            check_variants: self.check_variants,
            check_prefixes: self.check_prefixes,
            normalize: self.normalize,
        }
    }

    pub fn probe_options(&self) -> ProbeOptions {
        ProbeOptions {
            helo_domain: self.helo_domain.clone(),
            mail_from: self.mail_from.clone(),
            port: self.smtp_port,
            timeout_ms: self.smtp_timeout.saturating_mul(1_000),
        }
    }
}
