//! Named grid resolutions and the level table driving them.

use serde::{Deserialize, Serialize};

use crate::grid::{GridCell, build_grid};
use crate::record::GeoRecord;

/// Named grid resolution, finest to coarsest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Resolution {
    Small,
    Medium,
    Large,
    ExtraLarge,
}

impl Resolution {
    /// All resolutions, finest first.
    pub const ALL: [Resolution; 4] = [
        Resolution::Small,
        Resolution::Medium,
        Resolution::Large,
        Resolution::ExtraLarge,
    ];

    /// Stable name used in GeoJSON properties and serialized configs.
    pub fn as_str(&self) -> &'static str {
        match self {
            Resolution::Small => "small",
            Resolution::Medium => "medium",
            Resolution::Large => "large",
            Resolution::ExtraLarge => "extra_large",
        }
    }
}

/// Cell sizes in decimal degrees for each resolution.
///
/// The defaults match the sizes the map renderer styles were designed
/// around. Custom tables must keep sizes finite, positive, and strictly
/// increasing from small to extra-large.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelTable {
    #[serde(default = "LevelTable::default_small")]
    pub small: f64,
    #[serde(default = "LevelTable::default_medium")]
    pub medium: f64,
    #[serde(default = "LevelTable::default_large")]
    pub large: f64,
    #[serde(default = "LevelTable::default_extra_large")]
    pub extra_large: f64,
}

impl LevelTable {
    const fn default_small() -> f64 {
        0.02
    }

    const fn default_medium() -> f64 {
        0.05
    }

    const fn default_large() -> f64 {
        0.2
    }

    const fn default_extra_large() -> f64 {
        0.5
    }

    /// Returns the cell size for one resolution.
    pub fn cell_size(&self, resolution: Resolution) -> f64 {
        match resolution {
            Resolution::Small => self.small,
            Resolution::Medium => self.medium,
            Resolution::Large => self.large,
            Resolution::ExtraLarge => self.extra_large,
        }
    }

    /// Validate table values.
    pub fn validate(&self) -> Result<(), String> {
        for resolution in Resolution::ALL {
            let size = self.cell_size(resolution);
            if !size.is_finite() || size <= 0.0 {
                return Err(format!(
                    "Cell size for '{}' must be finite and positive",
                    resolution.as_str()
                ));
            }
        }

        if !(self.small < self.medium && self.medium < self.large && self.large < self.extra_large)
        {
            return Err("Cell sizes must increase from small to extra_large".to_string());
        }

        Ok(())
    }
}

impl Default for LevelTable {
    fn default() -> Self {
        Self {
            small: Self::default_small(),
            medium: Self::default_medium(),
            large: Self::default_large(),
            extra_large: Self::default_extra_large(),
        }
    }
}

/// One computed resolution: the cell size used and the resulting cells.
#[derive(Debug, Clone, Serialize)]
pub struct GridLevel {
    pub resolution: Resolution,
    pub cell_size: f64,
    pub cells: Vec<GridCell>,
}

/// All four resolutions computed from one record snapshot.
///
/// Levels are always rebuilt together from the same input; a set is never
/// partially updated, so the levels cannot disagree about which records
/// exist.
#[derive(Debug, Clone, Serialize)]
pub struct GridLevelSet {
    pub small: GridLevel,
    pub medium: GridLevel,
    pub large: GridLevel,
    pub extra_large: GridLevel,
}

impl GridLevelSet {
    /// Buckets one record snapshot at every resolution in the table.
    ///
    /// # Examples
    ///
    /// ```
    /// use obsmap::{GeoRecord, GridLevelSet, LevelTable, Resolution};
    ///
    /// let records = vec![GeoRecord::new(1, -6.2, 106.8)];
    /// let levels = GridLevelSet::build(&records, &LevelTable::default());
    ///
    /// for resolution in Resolution::ALL {
    ///     assert_eq!(levels.level(resolution).cells.len(), 1);
    /// }
    /// ```
    pub fn build(records: &[GeoRecord], table: &LevelTable) -> Self {
        let at = |resolution: Resolution| {
            let cell_size = table.cell_size(resolution);
            GridLevel {
                resolution,
                cell_size,
                cells: build_grid(records, cell_size),
            }
        };

        Self {
            small: at(Resolution::Small),
            medium: at(Resolution::Medium),
            large: at(Resolution::Large),
            extra_large: at(Resolution::ExtraLarge),
        }
    }

    /// A set with no cells at any level.
    pub fn empty(table: &LevelTable) -> Self {
        Self::build(&[], table)
    }

    /// Returns one level by resolution.
    pub fn level(&self, resolution: Resolution) -> &GridLevel {
        match resolution {
            Resolution::Small => &self.small,
            Resolution::Medium => &self.medium,
            Resolution::Large => &self.large,
            Resolution::ExtraLarge => &self.extra_large,
        }
    }

    /// Iterates the levels, finest first.
    pub fn iter(&self) -> impl Iterator<Item = &GridLevel> {
        Resolution::ALL.iter().map(|&r| self.level(r))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_table_constants() {
        let table = LevelTable::default();
        assert_eq!(table.small, 0.02);
        assert_eq!(table.medium, 0.05);
        assert_eq!(table.large, 0.2);
        assert_eq!(table.extra_large, 0.5);
        assert!(table.validate().is_ok());
    }

    #[test]
    fn test_cell_size_lookup() {
        let table = LevelTable::default();
        assert_eq!(table.cell_size(Resolution::Small), 0.02);
        assert_eq!(table.cell_size(Resolution::ExtraLarge), 0.5);
    }

    #[test]
    fn test_validate_rejects_bad_sizes() {
        let mut table = LevelTable::default();
        table.medium = 0.0;
        assert!(table.validate().is_err());

        let mut table = LevelTable::default();
        table.large = f64::NAN;
        assert!(table.validate().is_err());

        let mut table = LevelTable::default();
        table.small = 0.3; // larger than medium
        assert!(table.validate().is_err());
    }

    #[test]
    fn test_build_computes_every_level() {
        let records = vec![
            GeoRecord::new(1, -6.2, 106.8),
            GeoRecord::new(2, -6.21, 106.81),
            GeoRecord::new(3, -7.0, 110.0),
        ];
        let levels = GridLevelSet::build(&records, &LevelTable::default());

        for level in levels.iter() {
            let total: usize = level.cells.iter().map(|c| c.count).sum();
            assert_eq!(total, 3, "all valid records at {:?}", level.resolution);
            assert_eq!(level.cell_size, LevelTable::default().cell_size(level.resolution));
        }
    }

    #[test]
    fn test_empty_set() {
        let levels = GridLevelSet::empty(&LevelTable::default());
        for level in levels.iter() {
            assert!(level.cells.is_empty());
        }
    }

    #[test]
    fn test_serde_table_roundtrip() {
        let json = r#"{"small": 0.01, "medium": 0.04, "large": 0.1, "extra_large": 0.4}"#;
        let table: LevelTable = serde_json::from_str(json).unwrap();
        assert_eq!(table.small, 0.01);
        assert!(table.validate().is_ok());

        // Partial tables fall back to defaults per field.
        let partial: LevelTable = serde_json::from_str(r#"{"small": 0.01}"#).unwrap();
        assert_eq!(partial.medium, 0.05);
    }
}
