use thiserror::Error;

/// Errors raised while resolving the mail exchange of a domain.
#[derive(Debug, Error)]
pub enum MxError {
    #[error("domain is empty")]
    EmptyDomain,
    #[error("domain IDNA conversion failed")]
    IdnaConversion {
        #[source]
        source: idna::Errors,
    },
    #[error("resolver initialization failed: {source}")]
    ResolverInit {
        #[source]
        source: std::io::Error,
    },
    #[error("no MX records found for {domain}")]
    NoRecords { domain: String },
    #[error("{domain} publishes a null MX and does not accept mail")]
    NullMx { domain: String },
    #[error("MX lookup for {domain} timed out")]
    Timeout { domain: String },
    #[error("MX lookup for {domain} failed: {source}")]
    Lookup {
        domain: String,
        #[source]
        source: trust_dns_resolver::error::ResolveError,
    },
}

impl MxError {
    pub(crate) fn idna(source: idna::Errors) -> Self {
        Self::IdnaConversion { source }
    }

    pub(crate) fn resolver_init(source: std::io::Error) -> Self {
        Self::ResolverInit { source }
    }

    pub(crate) fn no_records(domain: impl Into<String>) -> Self {
        Self::NoRecords {
            domain: domain.into(),
        }
    }

    /// Classifies a resolver failure: empty answers and NXDOMAIN both mean
    /// "no mail exchange", timeouts are kept apart from other failures.
    pub(crate) fn lookup(
        domain: impl Into<String>,
        source: trust_dns_resolver::error::ResolveError,
    ) -> Self {
        use trust_dns_resolver::error::ResolveErrorKind;

        let domain = domain.into();
        if matches!(source.kind(), ResolveErrorKind::NoRecordsFound { .. }) {
            Self::NoRecords { domain }
        } else if matches!(source.kind(), ResolveErrorKind::Timeout) {
            Self::Timeout { domain }
        } else {
            Self::Lookup { domain, source }
        }
    }
}
