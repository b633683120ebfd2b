//! Density weights for rendering cell fill intensity.

use serde::{Deserialize, Serialize};

/// Visual weight bucket for a cell count.
///
/// Renderers map each bucket to a fill opacity or color ramp step. The
/// bucket boundaries are fixed; style sheets depend on them, so they are
/// not configurable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DensityWeight {
    Lowest,
    Low,
    Medium,
    High,
    VeryHigh,
    Highest,
}

impl DensityWeight {
    /// Buckets a member count.
    ///
    /// Boundaries are strict: a count of exactly 50 maps to `VeryHigh`,
    /// 51 to `Highest`.
    ///
    /// # Examples
    ///
    /// ```
    /// use obsmap::DensityWeight;
    ///
    /// assert_eq!(DensityWeight::for_count(0), DensityWeight::Lowest);
    /// assert_eq!(DensityWeight::for_count(50), DensityWeight::VeryHigh);
    /// assert_eq!(DensityWeight::for_count(51), DensityWeight::Highest);
    /// ```
    pub fn for_count(count: usize) -> Self {
        if count > 50 {
            DensityWeight::Highest
        } else if count > 20 {
            DensityWeight::VeryHigh
        } else if count > 10 {
            DensityWeight::High
        } else if count > 5 {
            DensityWeight::Medium
        } else if count > 2 {
            DensityWeight::Low
        } else {
            DensityWeight::Lowest
        }
    }

    /// Ordinal rank from 1 (sparsest) to 6 (densest).
    pub fn rank(&self) -> u8 {
        match self {
            DensityWeight::Lowest => 1,
            DensityWeight::Low => 2,
            DensityWeight::Medium => 3,
            DensityWeight::High => 4,
            DensityWeight::VeryHigh => 5,
            DensityWeight::Highest => 6,
        }
    }

    /// Stable name used in GeoJSON properties and style class suffixes.
    pub fn as_str(&self) -> &'static str {
        match self {
            DensityWeight::Lowest => "lowest",
            DensityWeight::Low => "low",
            DensityWeight::Medium => "medium",
            DensityWeight::High => "high",
            DensityWeight::VeryHigh => "very_high",
            DensityWeight::Highest => "highest",
        }
    }
}
