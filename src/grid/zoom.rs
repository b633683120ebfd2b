//! Zoom policy choosing which grid resolution a map should draw.

use serde::Serialize;

use crate::grid::levels::Resolution;

/// Zoom level at or above which the finest cells are drawn with individual
/// record markers on top.
pub const MARKER_ZOOM: i32 = 12;

const MEDIUM_ZOOM: i32 = 10;
const LARGE_ZOOM: i32 = 8;

/// What the renderer should draw at one zoom level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ZoomSelection {
    pub resolution: Resolution,
    /// True only at marker zooms; markers are drawn in addition to the
    /// small cells, never instead of them.
    pub show_markers: bool,
}

/// Maps a web-map zoom level to the resolution to draw.
///
/// Zoom 12 and above selects the small cells plus markers; 10 and 11
/// medium; 8 and 9 large; everything below extra-large. Markers only ever
/// appear together with [`Resolution::Small`]. Total over all zoom values,
/// including negatives.
///
/// # Examples
///
/// ```
/// use obsmap::{Resolution, classify_zoom};
///
/// let close = classify_zoom(14);
/// assert_eq!(close.resolution, Resolution::Small);
/// assert!(close.show_markers);
///
/// let far = classify_zoom(5);
/// assert_eq!(far.resolution, Resolution::ExtraLarge);
/// assert!(!far.show_markers);
/// ```
pub fn classify_zoom(zoom: i32) -> ZoomSelection {
    if zoom >= MARKER_ZOOM {
        ZoomSelection {
            resolution: Resolution::Small,
            show_markers: true,
        }
    } else if zoom >= MEDIUM_ZOOM {
        ZoomSelection {
            resolution: Resolution::Medium,
            show_markers: false,
        }
    } else if zoom >= LARGE_ZOOM {
        ZoomSelection {
            resolution: Resolution::Large,
            show_markers: false,
        }
    } else {
        ZoomSelection {
            resolution: Resolution::ExtraLarge,
            show_markers: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold_table() {
        assert_eq!(classify_zoom(13).resolution, Resolution::Small);
        assert_eq!(classify_zoom(12).resolution, Resolution::Small);
        assert_eq!(classify_zoom(11).resolution, Resolution::Medium);
        assert_eq!(classify_zoom(10).resolution, Resolution::Medium);
        assert_eq!(classify_zoom(9).resolution, Resolution::Large);
        assert_eq!(classify_zoom(8).resolution, Resolution::Large);
        assert_eq!(classify_zoom(7).resolution, Resolution::ExtraLarge);
        assert_eq!(classify_zoom(0).resolution, Resolution::ExtraLarge);
    }

    #[test]
    fn test_markers_only_at_small() {
        for zoom in -5..=25 {
            let selection = classify_zoom(zoom);
            if selection.show_markers {
                assert_eq!(selection.resolution, Resolution::Small);
                assert!(zoom >= MARKER_ZOOM);
            } else {
                assert!(zoom < MARKER_ZOOM);
            }
        }
    }

    #[test]
    fn test_total_over_extremes() {
        assert_eq!(classify_zoom(i32::MIN).resolution, Resolution::ExtraLarge);
        assert_eq!(classify_zoom(i32::MAX).resolution, Resolution::Small);
        assert!(classify_zoom(i32::MAX).show_markers);
        assert!(!classify_zoom(i32::MIN).show_markers);
    }
}
