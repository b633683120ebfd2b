//! The observation map facade tying records, grids, and zoom policy together.

use serde::Serialize;

use crate::config::Config;
use crate::error::Result;
use crate::grid::GridCell;
use crate::grid::geojson::{cells_to_geojson, markers_to_geojson};
use crate::grid::levels::GridLevelSet;
use crate::grid::zoom::{ZoomSelection, classify_zoom};
use crate::record::GeoRecord;
use crate::source::RecordSource;

/// What the renderer should draw for one zoom level.
///
/// `cells` always holds the selected resolution; `markers` is populated
/// only at marker zooms and is drawn on top of the cells, never instead of
/// them. Both borrow from the owning [`ObservationMap`].
#[derive(Debug, Clone)]
pub struct MapScene<'a> {
    pub selection: ZoomSelection,
    pub cells: &'a [GridCell],
    pub markers: Vec<&'a GeoRecord>,
}

impl MapScene<'_> {
    /// Serializes the cells as a GeoJSON FeatureCollection.
    pub fn cells_geojson(&self) -> Result<String> {
        cells_to_geojson(self.cells, self.selection.resolution)
    }

    /// Serializes the markers as a GeoJSON FeatureCollection. Empty at
    /// non-marker zooms.
    pub fn markers_geojson(&self) -> Result<String> {
        markers_to_geojson(self.markers.iter().copied())
    }
}

/// Snapshot counters for the current map state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MapStats {
    pub record_count: usize,
    pub plottable_count: usize,
    pub small_cells: usize,
    pub medium_cells: usize,
    pub large_cells: usize,
    pub extra_large_cells: usize,
}

/// Owner of the current record snapshot and its derived grid levels.
///
/// Every record change rebuilds all levels synchronously; derived data is
/// never patched in place, so the levels always agree with the snapshot.
///
/// # Examples
///
/// ```
/// use obsmap::{GeoRecord, ObservationMap};
///
/// let mut map = ObservationMap::new();
/// map.set_records(vec![
///     GeoRecord::new(1, -6.2, 106.8),
///     GeoRecord::new(2, -6.21, 106.81),
///     GeoRecord::new(3, -7.0, 110.0),
/// ]);
///
/// let scene = map.scene_for_zoom(5);
/// assert_eq!(scene.cells.len(), 2);
/// assert!(scene.markers.is_empty());
///
/// let close = map.scene_for_zoom(14);
/// assert_eq!(close.markers.len(), 3);
/// ```
pub struct ObservationMap {
    config: Config,
    records: Vec<GeoRecord>,
    levels: GridLevelSet,
}

impl ObservationMap {
    /// Creates an empty map with the default configuration.
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    /// Creates an empty map with a custom configuration.
    pub fn with_config(config: Config) -> Self {
        let levels = GridLevelSet::empty(&config.levels);
        Self {
            config,
            records: Vec::new(),
            levels,
        }
    }

    /// Returns the active configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns the current record snapshot.
    pub fn records(&self) -> &[GeoRecord] {
        &self.records
    }

    /// Returns the grid levels derived from the current snapshot.
    pub fn levels(&self) -> &GridLevelSet {
        &self.levels
    }

    /// Replaces the record snapshot and rebuilds every level.
    pub fn set_records(&mut self, records: Vec<GeoRecord>) {
        self.records = records;
        self.rebuild();
    }

    /// Number of records with a valid position.
    pub fn plottable_count(&self) -> usize {
        self.records.iter().filter(|r| r.has_position()).count()
    }

    /// Returns the scene for a zoom level.
    pub fn scene_for_zoom(&self, zoom: i32) -> MapScene<'_> {
        let selection = classify_zoom(zoom);
        let cells = self.levels.level(selection.resolution).cells.as_slice();
        let markers = if selection.show_markers {
            self.records.iter().filter(|r| r.has_position()).collect()
        } else {
            Vec::new()
        };

        MapScene {
            selection,
            cells,
            markers,
        }
    }

    /// Fetches from a source and replaces the snapshot.
    ///
    /// Returns the number of records fetched. On error the previous
    /// snapshot stays in place; callers log the failure and carry on with
    /// stale data.
    pub fn refresh_from(&mut self, source: &dyn RecordSource) -> Result<usize> {
        let records = source.fetch()?;
        let fetched = records.len();
        self.set_records(records);
        Ok(fetched)
    }

    /// Returns snapshot counters.
    pub fn stats(&self) -> MapStats {
        MapStats {
            record_count: self.records.len(),
            plottable_count: self.plottable_count(),
            small_cells: self.levels.small.cells.len(),
            medium_cells: self.levels.medium.cells.len(),
            large_cells: self.levels.large.cells.len(),
            extra_large_cells: self.levels.extra_large.cells.len(),
        }
    }

    fn rebuild(&mut self) {
        self.levels = GridLevelSet::build(&self.records, &self.config.levels);
        log::debug!(
            "Rebuilt grid levels for {} records ({} plottable)",
            self.records.len(),
            self.plottable_count()
        );
    }
}

impl Default for ObservationMap {
    fn default() -> Self {
        Self::new()
    }
}
