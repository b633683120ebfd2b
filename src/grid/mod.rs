//! Fixed-size grid aggregation over observation records.
//!
//! Records are bucketed into square cells whose edges are aligned to
//! multiples of the cell size, so a given coordinate always lands in the
//! same cell no matter which other records are present. Aggregation is a
//! pure function of the input: derived cells are thrown away and rebuilt
//! whenever the record set changes.

pub mod density;
pub mod geojson;
pub mod levels;
pub mod zoom;

use geo::{Point, Rect, coord};
use rustc_hash::FxHashMap;
use serde::Serialize;

use crate::grid::density::DensityWeight;
use crate::record::GeoRecord;
use crate::validation::valid_pair;

/// Integer cell address at one grid resolution.
///
/// `x` is the floored longitude index, `y` the floored latitude index.
/// Two records share a key exactly when they fall in the same cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct CellKey {
    pub x: i64,
    pub y: i64,
}

impl CellKey {
    /// Computes the cell containing a coordinate pair.
    ///
    /// `cell_size` must be finite and positive. Coordinates must be finite;
    /// callers filter through [`crate::validation::valid_pair`] first.
    pub fn for_position(latitude: f64, longitude: f64, cell_size: f64) -> Self {
        Self {
            x: floor_index(longitude, cell_size),
            y: floor_index(latitude, cell_size),
        }
    }
}

// `as` saturates, so the index stays total for any finite coordinate.
fn floor_index(value: f64, cell_size: f64) -> i64 {
    (value / cell_size).floor() as i64
}

/// One populated grid cell.
///
/// Bounds are derived from the key, never stored, so they are identical for
/// every build that places a record at the same coordinate. `members` keeps
/// the records in the order they were encountered in the input.
#[derive(Debug, Clone, Serialize)]
pub struct GridCell {
    pub key: CellKey,
    /// Edge length in decimal degrees.
    pub cell_size: f64,
    /// Number of member records. Always equal to `members.len()`.
    pub count: usize,
    pub members: Vec<GeoRecord>,
}

impl GridCell {
    /// Returns the cell rectangle, x = longitude, y = latitude.
    pub fn bounds(&self) -> Rect {
        let west = self.key.x as f64 * self.cell_size;
        let south = self.key.y as f64 * self.cell_size;
        Rect::new(
            coord! { x: west, y: south },
            coord! { x: west + self.cell_size, y: south + self.cell_size },
        )
    }

    /// Southwest corner as `(latitude, longitude)`.
    pub fn southwest(&self) -> (f64, f64) {
        let b = self.bounds();
        (b.min().y, b.min().x)
    }

    /// Northeast corner as `(latitude, longitude)`.
    pub fn northeast(&self) -> (f64, f64) {
        let b = self.bounds();
        (b.max().y, b.max().x)
    }

    /// Corner pair in the `[[south, west], [north, east]]` order map
    /// rectangle layers take.
    pub fn corners(&self) -> [[f64; 2]; 2] {
        let b = self.bounds();
        [[b.min().y, b.min().x], [b.max().y, b.max().x]]
    }

    /// Cell midpoint.
    pub fn center(&self) -> Point {
        Point::from(self.bounds().center())
    }

    /// Visual density bucket for this cell's count.
    pub fn density(&self) -> DensityWeight {
        DensityWeight::for_count(self.count)
    }
}

/// Buckets records into fixed-size cells.
///
/// Each record with a valid position lands in exactly one cell; records
/// with missing or non-finite coordinates are skipped without an error.
/// Cells with no members are never emitted. Emitted cells are sorted
/// south to north, then west to east; members inside a cell keep their
/// encounter order.
///
/// `cell_size` must be finite and positive; anything else is a programmer
/// error and panics.
///
/// # Arguments
///
/// * `records` - Records to bucket
/// * `cell_size` - Cell edge length in decimal degrees
///
/// # Examples
///
/// ```
/// use obsmap::{GeoRecord, build_grid};
///
/// let records = vec![
///     GeoRecord::new(1, -6.2, 106.8),
///     GeoRecord::new(2, -6.21, 106.81),
///     GeoRecord::new(3, -7.0, 110.0),
/// ];
///
/// let cells = build_grid(&records, 0.5);
/// assert_eq!(cells.len(), 2);
/// assert_eq!(cells.iter().map(|c| c.count).sum::<usize>(), 3);
/// ```
pub fn build_grid(records: &[GeoRecord], cell_size: f64) -> Vec<GridCell> {
    assert!(
        cell_size.is_finite() && cell_size > 0.0,
        "Cell size must be finite and positive"
    );

    let mut buckets: FxHashMap<CellKey, Vec<GeoRecord>> = FxHashMap::default();
    let mut skipped = 0usize;

    for record in records {
        let Some((lat, lng)) = valid_pair(record.latitude, record.longitude) else {
            skipped += 1;
            continue;
        };
        let key = CellKey::for_position(lat, lng, cell_size);
        buckets.entry(key).or_default().push(record.clone());
    }

    if skipped > 0 {
        log::debug!("Skipped {} records without a plottable position", skipped);
    }

    let mut cells: Vec<GridCell> = buckets
        .into_iter()
        .map(|(key, members)| GridCell {
            key,
            cell_size,
            count: members.len(),
            members,
        })
        .collect();

    cells.sort_by_key(|cell| (cell.key.y, cell.key.x));
    cells
}
