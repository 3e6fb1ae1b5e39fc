//! Candidate address generation.
//!
//! [`CandidateGenerator::generate`] turns a domain plus optional names into
//! an ordered, per-person deduplicated list of addresses: name variants when
//! names are given, role-based prefixes otherwise.

mod normalize;
mod types;
mod variants;

pub use normalize::{normalize_token, normalize_tokens};
pub use types::{Candidate, CandidateSource, NameInput};
pub use variants::{ROLE_PREFIXES, local_part_variants};

/// Which candidate families to produce and how to treat names.
#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CandidateGenerator {
    pub check_variants: bool,
    pub check_prefixes: bool,
    pub normalize: bool,
}

impl Default for CandidateGenerator {
    fn default() -> Self {
        Self {
            check_variants: true,
            check_prefixes: true,
            normalize: true,
        }
    }
}

impl CandidateGenerator {
    /// Produces name variants (one block per person, in input order) when
    /// names are given, or role prefixes when they are not. Returns an empty
    /// list when neither family applies or the domain is blank.
    pub fn generate(&self, domain: &str, names: Option<&NameInput>) -> Vec<Candidate> {
        let domain = domain.trim().to_ascii_lowercase();
        if domain.is_empty() {
            return Vec::new();
        }

        let names = names.filter(|names| !names.is_empty());
        let mut candidates = Vec::new();

        if self.check_variants {
            if let Some(names) = names {
                for person in names.people() {
                    candidates.extend(name_variants(&person, &domain, self.normalize));
                }
            }
        }

        if self.check_prefixes && names.is_none() {
            candidates.extend(role_prefixes(&domain));
        }

        tracing::debug!(%domain, count = candidates.len(), "generated candidates");
        candidates
    }
}

/// Variants for one person's raw name tokens.
pub fn name_variants(tokens: &[String], domain: &str, normalize: bool) -> Vec<Candidate> {
    let tokens = normalize_tokens(tokens, normalize);
    local_part_variants(&tokens)
        .into_iter()
        .map(|local| Candidate::new(local, domain, CandidateSource::NameVariant))
        .collect()
}

/// The role vocabulary applied to `domain`, in [`ROLE_PREFIXES`] order.
pub fn role_prefixes(domain: &str) -> Vec<Candidate> {
    ROLE_PREFIXES
        .iter()
        .map(|prefix| Candidate::new(*prefix, domain, CandidateSource::RolePrefix))
        .collect()
}
