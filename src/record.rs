//! Observation records as the platform API delivers them.
//!
//! The listing endpoint returns JSON arrays of records whose coordinate
//! fields are unreliable: numbers, numeric strings, null, or garbage.
//! Deserialization here is lenient by contract. A coordinate that cannot be
//! read becomes `None` and the record survives with its payload intact;
//! malformed coordinates never fail a fetch.

use geo::Point;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::fmt;

use crate::error::Result;
use crate::validation::valid_pair;

/// Upstream record identifier.
///
/// The API sends either an integer or a string id depending on the
/// endpoint; both are carried as-is.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    Int(i64),
    Text(String),
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordId::Int(n) => write!(f, "{}", n),
            RecordId::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<i64> for RecordId {
    fn from(id: i64) -> Self {
        RecordId::Int(id)
    }
}

impl From<&str> for RecordId {
    fn from(id: &str) -> Self {
        RecordId::Text(id.to_string())
    }
}

impl From<String> for RecordId {
    fn from(id: String) -> Self {
        RecordId::Text(id)
    }
}

impl From<&RecordId> for Value {
    fn from(id: &RecordId) -> Self {
        match id {
            RecordId::Int(n) => Value::from(*n),
            RecordId::Text(s) => Value::from(s.clone()),
        }
    }
}

/// A single geolocated observation.
///
/// Fields beyond the id and coordinates are kept in `payload` exactly as
/// the API sent them, so detail views and GeoJSON export can pass them
/// through without this crate knowing their shape.
///
/// # Examples
///
/// ```
/// use obsmap::GeoRecord;
///
/// let json = r#"{"id": 42, "latitude": "-6.2", "longitude": 106.8, "species": "Pycnonotus aurigaster"}"#;
/// let record: GeoRecord = serde_json::from_str(json).unwrap();
///
/// assert_eq!(record.latitude, Some(-6.2));
/// assert_eq!(record.longitude, Some(106.8));
/// assert_eq!(record.payload["species"], "Pycnonotus aurigaster");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoRecord {
    pub id: RecordId,

    /// Latitude in decimal degrees, `None` when missing or unreadable.
    #[serde(default, deserialize_with = "lenient_coordinate")]
    pub latitude: Option<f64>,

    /// Longitude in decimal degrees, `None` when missing or unreadable.
    #[serde(default, deserialize_with = "lenient_coordinate")]
    pub longitude: Option<f64>,

    /// Everything else the API sent, carried through unchanged.
    #[serde(flatten)]
    pub payload: Map<String, Value>,
}

impl GeoRecord {
    /// Creates a record with a known position.
    pub fn new(id: impl Into<RecordId>, latitude: f64, longitude: f64) -> Self {
        Self {
            id: id.into(),
            latitude: Some(latitude),
            longitude: Some(longitude),
            payload: Map::new(),
        }
    }

    /// Creates a record without coordinates.
    pub fn without_position(id: impl Into<RecordId>) -> Self {
        Self {
            id: id.into(),
            latitude: None,
            longitude: None,
            payload: Map::new(),
        }
    }

    /// Adds a payload field, builder style.
    pub fn with_field(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.payload.insert(key.to_string(), value.into());
        self
    }

    /// Returns the record position as a point, `None` when the record has
    /// no valid coordinates.
    ///
    /// Axes follow the `geo` convention: x is longitude, y is latitude.
    pub fn position(&self) -> Option<Point> {
        valid_pair(self.latitude, self.longitude).map(|(lat, lng)| Point::new(lng, lat))
    }

    /// Returns true when the record has a valid position.
    pub fn has_position(&self) -> bool {
        valid_pair(self.latitude, self.longitude).is_some()
    }
}

/// Accepts a JSON number, a numeric string, or anything else as a missing
/// coordinate. Never errors.
fn lenient_coordinate<'de, D>(deserializer: D) -> std::result::Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(coerce_f64))
}

fn coerce_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Parses the JSON array the listing endpoint returns.
///
/// # Examples
///
/// ```
/// use obsmap::records_from_json;
///
/// let records = records_from_json(
///     r#"[{"id": 1, "latitude": -6.2, "longitude": 106.8}, {"id": 2}]"#,
/// )
/// .unwrap();
///
/// assert_eq!(records.len(), 2);
/// assert!(records[0].has_position());
/// assert!(!records[1].has_position());
/// ```
pub fn records_from_json(json: &str) -> Result<Vec<GeoRecord>> {
    Ok(serde_json::from_str(json)?)
}
