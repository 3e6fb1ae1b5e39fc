use std::fmt;

/// Where a candidate local-part came from.
#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "with-serde", serde(rename_all = "snake_case"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CandidateSource {
    NameVariant,
    RolePrefix,
}

/// A synthesized address proposed for verification.
#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub address: String,
    pub local_part: String,
    pub source: CandidateSource,
}

impl Candidate {
    pub(crate) fn new(local_part: impl Into<String>, domain: &str, source: CandidateSource) -> Self {
        let local_part = local_part.into();
        Self {
            address: format!("{local_part}@{domain}"),
            local_part,
            source,
        }
    }
}

impl fmt::Display for Candidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.address)
    }
}

/// Names as callers provide them: one full name, a flat list of name parts
/// (one person), or one list of parts per person.
#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "with-serde", serde(untagged))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NameInput {
    Single(String),
    Flat(Vec<String>),
    PerPerson(Vec<Vec<String>>),
}

impl NameInput {
    /// An empty string or an empty list means "no names were given".
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Single(name) => name.is_empty(),
            Self::Flat(parts) => parts.is_empty(),
            Self::PerPerson(people) => people.is_empty(),
        }
    }

    /// Raw tokens per person, every entry split on whitespace.
    pub fn people(&self) -> Vec<Vec<String>> {
        match self {
            Self::Single(name) => vec![split_parts(std::slice::from_ref(name))],
            Self::Flat(parts) => vec![split_parts(parts)],
            Self::PerPerson(people) => people.iter().map(|parts| split_parts(parts)).collect(),
        }
    }
}

fn split_parts(parts: &[String]) -> Vec<String> {
    parts
        .iter()
        .flat_map(|part| part.split_whitespace())
        .map(str::to_string)
        .collect()
}

impl From<&str> for NameInput {
    fn from(name: &str) -> Self {
        Self::Single(name.to_string())
    }
}

impl From<String> for NameInput {
    fn from(name: String) -> Self {
        Self::Single(name)
    }
}

impl From<Vec<String>> for NameInput {
    fn from(parts: Vec<String>) -> Self {
        Self::Flat(parts)
    }
}

impl From<Vec<&str>> for NameInput {
    fn from(parts: Vec<&str>) -> Self {
        Self::Flat(parts.into_iter().map(str::to_string).collect())
    }
}

impl From<Vec<Vec<String>>> for NameInput {
    fn from(people: Vec<Vec<String>>) -> Self {
        Self::PerPerson(people)
    }
}
