//! Record sources feeding the map.

use crate::error::Result;
use crate::record::GeoRecord;

/// Fetches the record set the map should display.
///
/// Implementations wrap whatever transport the embedding application uses,
/// usually an HTTP call to the platform's listing endpoint followed by
/// [`crate::records_from_json`]. Fetches are expected to fail sometimes;
/// callers log the failure and keep the previous snapshot.
pub trait RecordSource {
    fn fetch(&self) -> Result<Vec<GeoRecord>>;
}

/// A source returning a fixed set of records.
///
/// Useful for tests and for embedding the map over data that is already in
/// memory.
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    records: Vec<GeoRecord>,
}

impl StaticSource {
    pub fn new(records: Vec<GeoRecord>) -> Self {
        Self { records }
    }
}

impl RecordSource for StaticSource {
    fn fetch(&self) -> Result<Vec<GeoRecord>> {
        Ok(self.records.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_static_source_returns_its_records() {
        let source = StaticSource::new(vec![
            GeoRecord::new(1, -6.2, 106.8),
            GeoRecord::new(2, -7.0, 110.0),
        ]);

        let records = source.fetch().unwrap();
        assert_eq!(records.len(), 2);

        // Fetches are repeatable.
        assert_eq!(source.fetch().unwrap().len(), 2);
    }

    #[test]
    fn test_default_source_is_empty() {
        assert!(StaticSource::default().fetch().unwrap().is_empty());
    }
}
