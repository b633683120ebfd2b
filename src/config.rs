//! Map configuration.

use serde::de::Error;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::grid::levels::LevelTable;

/// Configuration for an observation map.
///
/// Designed to be easily serializable and loadable from JSON or TOML while
/// keeping complexity minimal. The zoom thresholds and density buckets are
/// deliberately not configurable; only the level table and the refresh
/// cadence vary between deployments.
///
/// # Example
///
/// ```rust
/// use obsmap::Config;
///
/// let config = Config::default();
/// assert_eq!(config.levels.small, 0.02);
///
/// let json = r#"{
///     "levels": { "small": 0.02, "medium": 0.05, "large": 0.2, "extra_large": 0.5 },
///     "refresh_interval_secs": 30
/// }"#;
/// let config = Config::from_json(json).unwrap();
/// assert_eq!(config.refresh_interval_secs, 30);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Cell sizes in decimal degrees for each grid resolution.
    #[serde(default)]
    pub levels: LevelTable,

    /// How often a scheduled refresh re-fetches records, in seconds.
    #[serde(default = "Config::default_refresh_interval_secs")]
    pub refresh_interval_secs: u64,
}

impl Config {
    const fn default_refresh_interval_secs() -> u64 {
        60
    }

    pub fn with_levels(mut self, levels: LevelTable) -> Self {
        self.levels = levels;
        self
    }

    pub fn with_refresh_interval(mut self, interval: Duration) -> Self {
        assert!(
            interval.as_secs() > 0,
            "Refresh interval must be at least one second"
        );
        self.refresh_interval_secs = interval.as_secs();
        self
    }

    /// Refresh cadence as a Duration.
    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_interval_secs)
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), String> {
        self.levels.validate()?;

        if self.refresh_interval_secs == 0 {
            return Err("Refresh interval must be greater than zero".to_string());
        }

        Ok(())
    }

    /// Load configuration from JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let config: Config = serde_json::from_str(json)?;
        if let Err(e) = config.validate() {
            return Err(Error::custom(e));
        }
        Ok(config)
    }

    /// Save configuration as JSON string.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Load configuration from TOML string (requires toml feature).
    #[cfg(feature = "toml")]
    pub fn from_toml(toml_str: &str) -> Result<Self, toml::de::Error> {
        let config: Config = toml::from_str(toml_str)?;
        if let Err(e) = config.validate() {
            return Err(toml::de::Error::custom(e));
        }
        Ok(config)
    }

    /// Save configuration as TOML string (requires toml feature).
    #[cfg(feature = "toml")]
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            levels: LevelTable::default(),
            refresh_interval_secs: Self::default_refresh_interval_secs(),
        }
    }
}
