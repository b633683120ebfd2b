//! Choosing the current identification for an observation.
//!
//! Community members propose identifications and agree with each other's
//! proposals; detail views show a single winner.

use serde::{Deserialize, Serialize};

/// One identification proposed for an observation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentRecord {
    /// Upstream taxon key, opaque to this crate.
    pub taxon: String,

    /// Number of users who agreed with this identification.
    #[serde(default)]
    pub agreements: usize,

    /// When the identification was made, unix seconds.
    #[serde(default)]
    pub identified_at: i64,
}

impl IdentRecord {
    pub fn new(taxon: impl Into<String>, agreements: usize, identified_at: i64) -> Self {
        Self {
            taxon: taxon.into(),
            agreements,
            identified_at,
        }
    }
}

/// Picks the identification a detail view should display.
///
/// The identification with the most agreements wins; equal agreement counts
/// fall back to the most recent one. An empty slate has no current
/// identification.
///
/// # Examples
///
/// ```
/// use obsmap::{IdentRecord, current_identification};
///
/// let idents = vec![
///     IdentRecord::new("Pycnonotus goiavier", 1, 100),
///     IdentRecord::new("Pycnonotus aurigaster", 4, 50),
/// ];
///
/// let current = current_identification(&idents).unwrap();
/// assert_eq!(current.taxon, "Pycnonotus aurigaster");
/// ```
pub fn current_identification(idents: &[IdentRecord]) -> Option<&IdentRecord> {
    idents
        .iter()
        .max_by_key(|ident| (ident.agreements, ident.identified_at))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_slate() {
        assert_eq!(current_identification(&[]), None);
    }

    #[test]
    fn test_most_agreements_wins() {
        let idents = vec![
            IdentRecord::new("a", 2, 900),
            IdentRecord::new("b", 5, 100),
            IdentRecord::new("c", 3, 500),
        ];
        assert_eq!(current_identification(&idents).unwrap().taxon, "b");
    }

    #[test]
    fn test_tie_breaks_to_most_recent() {
        let idents = vec![
            IdentRecord::new("older", 3, 100),
            IdentRecord::new("newer", 3, 200),
            IdentRecord::new("oldest", 3, 50),
        ];
        assert_eq!(current_identification(&idents).unwrap().taxon, "newer");
    }

    #[test]
    fn test_agreements_beat_recency() {
        let idents = vec![
            IdentRecord::new("recent_but_unsupported", 0, 9_000),
            IdentRecord::new("old_but_agreed", 7, 10),
        ];
        assert_eq!(
            current_identification(&idents).unwrap().taxon,
            "old_but_agreed"
        );
    }

    #[test]
    fn test_single_identification() {
        let idents = vec![IdentRecord::new("only", 0, 0)];
        assert_eq!(current_identification(&idents).unwrap().taxon, "only");
    }
}
