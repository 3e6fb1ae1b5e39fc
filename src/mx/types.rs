/// A single MX answer, kept in the order the resolver returned it.
#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MxRecord {
    pub preference: u16,
    pub exchange: String,
}

impl MxRecord {
    pub fn new(preference: u16, exchange: impl Into<String>) -> Self {
        Self {
            preference,
            exchange: exchange.into(),
        }
    }

    /// RFC 7505 null MX: a single record whose exchange is the root (`.`).
    pub fn is_null(&self) -> bool {
        self.exchange.trim_end_matches('.').is_empty()
    }
}
