use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use super::{MxError, MxRecord, resolve_mx_with, resolver};

type LookupResult = Result<Vec<MxRecord>, MxError>;
type LookupFn = dyn Fn(&str) -> LookupResult + Send + Sync;

pub(crate) struct StubResolver {
    pub on_lookup: Box<LookupFn>,
}

impl StubResolver {
    pub(crate) fn new<F>(f: F) -> Self
    where
        F: Fn(&str) -> LookupResult + Send + Sync + 'static,
    {
        Self {
            on_lookup: Box::new(f),
        }
    }

    /// Answers every query with a single record pointing at `exchange`.
    pub(crate) fn single(exchange: &'static str) -> Self {
        Self::new(move |_| Ok(vec![MxRecord::new(10, exchange)]))
    }

    /// Same as [`StubResolver::single`], counting lookups in `counter`.
    pub(crate) fn counting(exchange: &'static str, counter: Arc<AtomicUsize>) -> Self {
        Self::new(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(vec![MxRecord::new(10, exchange)])
        })
    }

    pub(crate) fn empty() -> Self {
        Self::new(|_| Ok(Vec::new()))
    }
}

#[test]
fn normalize_domain_rejects_empty() {
    let err = resolver::normalize_domain("  ").expect_err("empty domain should fail");
    assert!(matches!(err, MxError::EmptyDomain));
}

#[test]
fn normalize_domain_converts_idna() {
    let ascii = resolver::normalize_domain("exämple.com").expect("idna");
    assert_eq!(ascii, "xn--exmple-cua.com");
}

#[test]
fn first_record_wins_without_sorting() {
    let stub = StubResolver::new(|domain| {
        assert_eq!(domain, "example.com");
        Ok(vec![
            MxRecord::new(30, "mx3.example.com."),
            MxRecord::new(10, "mx1.example.com."),
        ])
    });

    let host = resolve_mx_with(&stub, "example.com").expect("lookup succeeds");
    assert_eq!(host, "mx3.example.com");
}

#[test]
fn empty_answer_is_no_records() {
    let stub = StubResolver::empty();
    let err = resolve_mx_with(&stub, "example.com").expect_err("no MX");
    assert!(matches!(err, MxError::NoRecords { ref domain } if domain == "example.com"));
    assert_eq!(err.to_string(), "no MX records found for example.com");
}

#[test]
fn null_mx_is_rejected() {
    let stub = StubResolver::new(|_| Ok(vec![MxRecord::new(0, ".")]));
    let err = resolve_mx_with(&stub, "example.com").expect_err("null MX");
    assert!(matches!(err, MxError::NullMx { .. }));
    assert!(MxRecord::new(0, "").is_null());
    assert!(!MxRecord::new(10, "mx.example.com.").is_null());
}

#[test]
fn lookup_errors_propagate() {
    let stub = StubResolver::new(|domain| {
        Err(MxError::Timeout {
            domain: domain.to_string(),
        })
    });
    let err = resolve_mx_with(&stub, "example.com").expect_err("timeout");
    assert!(matches!(err, MxError::Timeout { .. }));
}

#[test]
fn normalize_exchange_trims_dot_and_lowercases() {
    let out = resolver::normalize_exchange("Mail.EXAMPLE.com.");
    assert_eq!(out, "mail.example.com");
}
