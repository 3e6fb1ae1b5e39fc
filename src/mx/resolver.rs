use trust_dns_resolver::Resolver;

use super::{MxError, MxRecord};

/// Resolves `domain` to its preferred mail exchange using the system resolver.
///
/// The first record returned by the resolver wins; no preference sorting is
/// applied. The trailing root label (`.`) is stripped from the host name.
pub fn resolve_mx(domain: &str) -> Result<String, MxError> {
    resolve_mx_with(&SystemResolver, domain)
}

pub fn resolve_mx_with<R>(resolver: &R, domain: &str) -> Result<String, MxError>
where
    R: LookupMx + ?Sized,
{
    let ascii = normalize_domain(domain)?;
    let records = resolver.lookup_mx(&ascii)?;

    let first = records
        .into_iter()
        .next()
        .ok_or_else(|| MxError::no_records(ascii.as_str()))?;

    if first.is_null() {
        return Err(MxError::NullMx { domain: ascii });
    }
    let exchange = normalize_exchange(&first.exchange);
    tracing::debug!(domain = %ascii, mx = %exchange, preference = first.preference, "selected mail exchange");
    Ok(exchange)
}

pub(crate) fn normalize_domain(domain: &str) -> Result<String, MxError> {
    let trimmed = domain.trim();
    if trimmed.is_empty() {
        return Err(MxError::EmptyDomain);
    }
    idna::domain_to_ascii(trimmed).map_err(MxError::idna)
}

pub(crate) fn normalize_exchange(exchange: &str) -> String {
    exchange.trim_end_matches('.').to_ascii_lowercase()
}

/// Source of MX answers. Implementations must return records in resolver
/// order and report an empty answer either as `Ok(vec![])` or as
/// [`MxError::NoRecords`].
pub trait LookupMx {
    fn lookup_mx(&self, domain: &str) -> Result<Vec<MxRecord>, MxError>;
}

/// Looks up MX records through a resolver built from the system configuration
/// (`/etc/resolv.conf` on Unix). A fresh resolver is created per lookup.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemResolver;

impl LookupMx for SystemResolver {
    fn lookup_mx(&self, domain: &str) -> Result<Vec<MxRecord>, MxError> {
        let resolver = Resolver::from_system_conf().map_err(MxError::resolver_init)?;
        resolver.lookup_mx(domain)
    }
}

impl LookupMx for Resolver {
    fn lookup_mx(&self, domain: &str) -> Result<Vec<MxRecord>, MxError> {
        let lookup = Resolver::mx_lookup(self, domain).map_err(|err| MxError::lookup(domain, err))?;
        Ok(lookup
            .iter()
            .map(|mx| MxRecord::new(mx.preference(), mx.exchange().to_utf8()))
            .collect())
    }
}

#[cfg(test)]
impl LookupMx for crate::mx::tests::StubResolver {
    fn lookup_mx(&self, domain: &str) -> Result<Vec<MxRecord>, MxError> {
        (self.on_lookup)(domain)
    }
}
