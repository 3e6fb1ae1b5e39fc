//! Verification orchestration.
//!
//! [`Scout`] generates candidates for a domain, probes them through the MX
//! resolver and the SMTP probe, and assembles [`VerificationResult`] records.
//! Per-candidate failures never escape: they become `not_found` records.

mod options;
mod types;

pub use options::ScoutOptions;
pub use types::{BulkEntry, BulkResult, VerificationResult, VerificationStatus};

use std::thread;
use std::time::{Duration, Instant};

use rand::Rng;

use crate::candidates::{Candidate, NameInput};
use crate::mx::{LookupMx, SystemResolver, resolve_mx_with};
use crate::smtp_verify::{ProbeError, probe};
use types::ProbeTrace;

/// Finds and verifies candidate addresses for a domain.
#[derive(Debug, Clone, Default)]
pub struct Scout<R = SystemResolver> {
    options: ScoutOptions,
    resolver: R,
}

impl Scout<SystemResolver> {
    pub fn new(options: ScoutOptions) -> Self {
        Self::with_resolver(options, SystemResolver)
    }
}

impl<R: LookupMx> Scout<R> {
    /// Uses `resolver` for MX lookups instead of the system configuration.
    pub fn with_resolver(options: ScoutOptions, resolver: R) -> Self {
        Self { options, resolver }
    }

    /// Candidates for `domain`: name variants first, then role prefixes.
    pub fn candidates(&self, domain: &str, names: Option<&NameInput>) -> Vec<Candidate> {
        self.options.generator().generate(domain, names)
    }

    /// Generates candidates and probes them.
    ///
    /// By default only the first candidate is probed. With
    /// [`ScoutOptions::probe_all`] candidates are probed in order until one
    /// is found. A domain without candidates yields a single placeholder
    /// record, so the result is never empty.
    pub fn find_valid_emails(
        &self,
        domain: &str,
        names: Option<&NameInput>,
    ) -> Vec<VerificationResult> {
        let candidates = self.candidates(domain, names);
        let mut results = Vec::new();

        if self.options.probe_all {
            for (idx, candidate) in candidates.iter().enumerate() {
                if idx > 0 {
                    self.pause_between_probes();
                }
                let result = self.verify_address(&candidate.address);
                let found = result.is_found();
                results.push(result);
                if found {
                    break;
                }
            }
        } else if let Some(first) = candidates.first() {
            results.push(self.verify_address(&first.address));
        }

        if results.is_empty() {
            tracing::info!(%domain, "no candidate to probe");
            results.push(VerificationResult::placeholder(domain));
        }
        results
    }

    /// Resolves the domain of `email` and probes it once. Never fails: any
    /// error is reported in the returned record.
    pub fn verify_address(&self, email: &str) -> VerificationResult {
        let start = Instant::now();
        let domain = email.rsplit_once('@').map_or("", |(_, domain)| domain);

        let mut trace = ProbeTrace {
            mx: String::new(),
            connections: 0,
            ver_ops: 0,
            elapsed: Duration::ZERO,
        };

        let result = match resolve_mx_with(&self.resolver, domain) {
            Ok(mx) => {
                trace.connections += 1;
                let outcome = probe(email, &mx, &self.options.probe_options());
                trace.mx = mx;
                trace.ver_ops = outcome.ver_ops;
                outcome.result
            }
            Err(err) => Err(ProbeError::from(err)),
        };
        trace.elapsed = start.elapsed();

        let record = VerificationResult::from_probe(email, domain, trace, result);
        tracing::info!(
            email = %record.email,
            status = %record.status,
            mx = %record.mx,
            time_exec = record.time_exec,
            "{}",
            record.message
        );
        record
    }

    fn pause_between_probes(&self) {
        if let Some((min, max)) = self.options.probe_delay_ms {
            let (low, high) = if min <= max { (min, max) } else { (max, min) };
            let millis = rand::thread_rng().gen_range(low..=high);
            thread::sleep(Duration::from_millis(millis));
        }
    }
}

impl<R: LookupMx + Sync> Scout<R> {
    /// Runs [`Scout::find_valid_emails`] for every entry. Output order
    /// matches input order; entries are spread over
    /// [`ScoutOptions::num_bulk_threads`] scoped threads.
    pub fn find_valid_emails_bulk(&self, entries: &[BulkEntry]) -> Vec<BulkResult> {
        let workers = self.options.num_bulk_threads.clamp(1, entries.len().max(1));
        if workers == 1 {
            return entries.iter().map(|entry| self.run_entry(entry)).collect();
        }

        let chunk_size = entries.len().div_ceil(workers);
        thread::scope(|scope| {
            let handles: Vec<_> = entries
                .chunks(chunk_size)
                .map(|chunk| {
                    scope.spawn(move || {
                        chunk
                            .iter()
                            .map(|entry| self.run_entry(entry))
                            .collect::<Vec<_>>()
                    })
                })
                .collect();
            handles
                .into_iter()
                .flat_map(|handle| match handle.join() {
                    Ok(results) => results,
                    Err(panic) => std::panic::resume_unwind(panic),
                })
                .collect()
        })
    }

    fn run_entry(&self, entry: &BulkEntry) -> BulkResult {
        BulkResult {
            domain: entry.domain.clone(),
            names: entry.names.clone(),
            valid_emails: self.find_valid_emails(&entry.domain, entry.names.as_ref()),
        }
    }
}
