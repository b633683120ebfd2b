//! Coordinate validity checks shared by every consumer of record positions.
//!
//! All plotting, bucketing, and geocoding paths go through these predicates,
//! so the definition of a usable coordinate lives in exactly one place.

/// Returns true when a coordinate value is usable for plotting.
///
/// Only non-finite values are rejected. Range is deliberately not checked:
/// the upstream API already bounds coordinates, and values are passed
/// through to the renderer unchanged.
///
/// # Examples
///
/// ```
/// use obsmap::validation::is_valid_coordinate;
///
/// assert!(is_valid_coordinate(-6.2));
/// assert!(is_valid_coordinate(0.0));
/// assert!(!is_valid_coordinate(f64::NAN));
/// assert!(!is_valid_coordinate(f64::INFINITY));
/// ```
pub fn is_valid_coordinate(value: f64) -> bool {
    value.is_finite()
}

/// Returns the `(latitude, longitude)` pair when both coordinates are
/// present and valid, `None` otherwise.
///
/// This is the skip test used by grid bucketing: records failing it are
/// left out without an error.
///
/// # Examples
///
/// ```
/// use obsmap::validation::valid_pair;
///
/// assert_eq!(valid_pair(Some(-6.2), Some(106.8)), Some((-6.2, 106.8)));
/// assert_eq!(valid_pair(None, Some(106.8)), None);
/// assert_eq!(valid_pair(Some(f64::NAN), Some(106.8)), None);
/// ```
pub fn valid_pair(latitude: Option<f64>, longitude: Option<f64>) -> Option<(f64, f64)> {
    match (latitude, longitude) {
        (Some(lat), Some(lng)) if is_valid_coordinate(lat) && is_valid_coordinate(lng) => {
            Some((lat, lng))
        }
        _ => None,
    }
}
