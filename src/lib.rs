//! Grid aggregation, zoom policy, and geocoding cache for plotting
//! citizen-science biodiversity records on web maps.
//!
//! ```rust
//! use obsmap::{GeoRecord, ObservationMap};
//!
//! let mut map = ObservationMap::new();
//! map.set_records(vec![
//!     GeoRecord::new(1, -6.2, 106.8),
//!     GeoRecord::new(2, -6.21, 106.81),
//!     GeoRecord::new(3, -7.0, 110.0),
//! ]);
//!
//! // Far out: one coarse cell per cluster, no individual markers.
//! let scene = map.scene_for_zoom(5);
//! assert_eq!(scene.cells.len(), 2);
//! assert!(scene.markers.is_empty());
//!
//! // Zoomed in: fine cells plus a marker per record.
//! let scene = map.scene_for_zoom(14);
//! assert_eq!(scene.markers.len(), 3);
//! ```

pub mod config;
pub mod error;
pub mod geocode;
pub mod grid;
pub mod ident;
pub mod map;
pub mod record;
pub mod refresh;
pub mod source;
pub mod validation;

pub use config::Config;
pub use error::{ObsmapError, Result};
pub use map::{MapScene, MapStats, ObservationMap};

pub type Obsmap = ObservationMap;

pub use geo::{Point, Rect};

pub use grid::density::DensityWeight;
pub use grid::levels::{GridLevel, GridLevelSet, LevelTable, Resolution};
pub use grid::zoom::{MARKER_ZOOM, ZoomSelection, classify_zoom};
pub use grid::{CellKey, GridCell, build_grid};

pub use geocode::{PlaceCache, ReverseGeocode};

pub use ident::{IdentRecord, current_identification};

pub use record::{GeoRecord, RecordId, records_from_json};

pub use refresh::RefreshTask;

pub use source::{RecordSource, StaticSource};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Common imports
pub mod prelude {

    pub use crate::{Config, GeoRecord, ObservationMap, Obsmap, RecordId, Result};

    pub use geo::{Point, Rect};

    pub use crate::{
        CellKey, DensityWeight, GridCell, GridLevelSet, LevelTable, Resolution, build_grid,
        classify_zoom,
    };

    pub use crate::{PlaceCache, RecordSource, RefreshTask, ReverseGeocode, StaticSource};

    pub use std::time::Duration;
}
