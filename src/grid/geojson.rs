//! GeoJSON export for cells and markers.
//!
//! Output follows RFC 7946, so coordinates here are in longitude-latitude
//! order even though the rest of the crate surfaces latitude first.

use geojson::{Feature, FeatureCollection, Geometry, Value};
use serde_json::Map;

use crate::error::Result;
use crate::grid::GridCell;
use crate::grid::levels::Resolution;
use crate::record::{GeoRecord, RecordId};

/// Converts one cell to a Polygon feature.
///
/// The exterior ring starts at the southwest corner, runs counterclockwise,
/// and is closed. Properties carry `count`, `weight` (density rank 1 to 6),
/// `resolution`, and `cell_size`.
pub fn cell_to_feature(cell: &GridCell, resolution: Resolution) -> Feature {
    let bounds = cell.bounds();
    let (west, south) = (bounds.min().x, bounds.min().y);
    let (east, north) = (bounds.max().x, bounds.max().y);

    let ring = vec![
        vec![west, south],
        vec![east, south],
        vec![east, north],
        vec![west, north],
        vec![west, south],
    ];
    let geom = Geometry::new(Value::Polygon(vec![ring]));

    let mut props = Map::new();
    props.insert("count".to_string(), serde_json::Value::from(cell.count));
    props.insert(
        "weight".to_string(),
        serde_json::Value::from(cell.density().rank()),
    );
    props.insert(
        "resolution".to_string(),
        serde_json::Value::from(resolution.as_str()),
    );
    props.insert(
        "cell_size".to_string(),
        serde_json::Value::from(cell.cell_size),
    );

    Feature {
        bbox: Some(vec![west, south, east, north]),
        geometry: Some(geom),
        id: None,
        properties: Some(props),
        foreign_members: None,
    }
}

/// Converts cells to a FeatureCollection.
pub fn cells_to_feature_collection(cells: &[GridCell], resolution: Resolution) -> FeatureCollection {
    FeatureCollection {
        bbox: None,
        features: cells
            .iter()
            .map(|cell| cell_to_feature(cell, resolution))
            .collect(),
        foreign_members: None,
    }
}

/// Serializes cells to a GeoJSON FeatureCollection string.
pub fn cells_to_geojson(cells: &[GridCell], resolution: Resolution) -> Result<String> {
    Ok(serde_json::to_string(&cells_to_feature_collection(
        cells, resolution,
    ))?)
}

/// Converts one record to a Point feature, `None` when the record has no
/// valid position.
///
/// The record payload becomes the feature properties with the id added
/// under `"id"`; the feature id mirrors the record id.
pub fn marker_to_feature(record: &GeoRecord) -> Option<Feature> {
    let position = record.position()?;
    let geom = Geometry::new(Value::Point(vec![position.x(), position.y()]));

    let mut props = record.payload.clone();
    props.insert("id".to_string(), serde_json::Value::from(&record.id));

    Some(Feature {
        bbox: None,
        geometry: Some(geom),
        id: Some(feature_id(&record.id)),
        properties: Some(props),
        foreign_members: None,
    })
}

/// Converts records to a Point FeatureCollection, skipping records without
/// a valid position.
pub fn markers_to_feature_collection<'a, I>(records: I) -> FeatureCollection
where
    I: IntoIterator<Item = &'a GeoRecord>,
{
    FeatureCollection {
        bbox: None,
        features: records.into_iter().filter_map(marker_to_feature).collect(),
        foreign_members: None,
    }
}

/// Serializes records to a GeoJSON FeatureCollection string.
pub fn markers_to_geojson<'a, I>(records: I) -> Result<String>
where
    I: IntoIterator<Item = &'a GeoRecord>,
{
    Ok(serde_json::to_string(&markers_to_feature_collection(
        records,
    ))?)
}

fn feature_id(id: &RecordId) -> geojson::feature::Id {
    match id {
        RecordId::Int(n) => geojson::feature::Id::Number((*n).into()),
        RecordId::Text(s) => geojson::feature::Id::String(s.clone()),
    }
}
