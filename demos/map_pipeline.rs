//! Map Pipeline Example
//!
//! This example walks a payload of observation records through the full
//! map pipeline: parsing, grid aggregation at every resolution, zoom
//! selection, GeoJSON export, and reverse geocoding behind the cache.

use obsmap::{
    DensityWeight, ObsmapError, ObservationMap, PlaceCache, ReverseGeocode, classify_zoom,
    records_from_json,
};
use std::error::Error;

/// Stand-in for a real geocoding service with spotty coverage.
struct DemoGeocoder;

impl ReverseGeocode for DemoGeocoder {
    fn place_name(&self, _latitude: f64, longitude: f64) -> obsmap::Result<String> {
        // Coverage ends west of 100 degrees east in this demo.
        if longitude < 100.0 {
            return Err(ObsmapError::Geocode(
                "no coverage for this region".to_string(),
            ));
        }
        let city = if longitude < 108.0 { "Jakarta" } else { "Semarang" };
        Ok(format!("{}, Indonesia", city))
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    // Run with RUST_LOG=debug to see skip counts and rebuild logging.
    env_logger::init();

    println!("=== Obsmap - Map Pipeline Example ===\n");

    // ========================================
    // 1. Parsing an API Payload
    // ========================================
    println!("1. Parsing an API Payload");
    println!("-------------------------");

    let payload = r#"[
        {"id": 1, "latitude": -6.2, "longitude": 106.8, "species": "Javan myna"},
        {"id": 2, "latitude": "-6.21", "longitude": "106.81", "species": "Cave swiftlet"},
        {"id": 3, "latitude": -7.0, "longitude": 110.0, "species": "Sooty-headed bulbul"},
        {"id": 4, "latitude": null, "longitude": null, "species": "Zebra dove"}
    ]"#;

    let records = records_from_json(payload)?;
    let plottable = records.iter().filter(|r| r.has_position()).count();
    println!(
        "   ✓ Parsed {} records ({} plottable)",
        records.len(),
        plottable
    );
    println!(
        "   Record 2 arrived with string coordinates: {:?}",
        records[1].position()
    );

    // ========================================
    // 2. Grid Aggregation
    // ========================================
    println!("\n2. Grid Aggregation");
    println!("-------------------");

    let mut map = ObservationMap::new();
    map.set_records(records);

    for level in map.levels().iter() {
        println!(
            "   {:>11} ({:.2}°): {} cells",
            level.resolution.as_str(),
            level.cell_size,
            level.cells.len()
        );
    }

    let cell = &map.levels().extra_large.cells[0];
    let [[south, west], [north, east]] = cell.corners();
    println!("\n   First extra-large cell:");
    println!(
        "     Bounds: ({:.1}, {:.1}) to ({:.1}, {:.1})",
        south, west, north, east
    );
    println!("     Count: {} records", cell.count);
    println!(
        "     Center: ({:.2}, {:.2})",
        cell.center().y(),
        cell.center().x()
    );

    // ========================================
    // 3. Zoom Selection
    // ========================================
    println!("\n3. Zoom Selection");
    println!("-----------------");

    for zoom in [4, 8, 10, 12, 15] {
        let selection = classify_zoom(zoom);
        println!(
            "   Zoom {:>2}: {:>11} cells, markers: {}",
            zoom,
            selection.resolution.as_str(),
            selection.show_markers
        );
    }

    // ========================================
    // 4. GeoJSON Export
    // ========================================
    println!("\n4. GeoJSON Export");
    println!("-----------------");

    let far = map.scene_for_zoom(5);
    let cells_json = far.cells_geojson()?;
    println!(
        "   Zoom  5 cell layer: {} features, {} bytes",
        far.cells.len(),
        cells_json.len()
    );

    let close = map.scene_for_zoom(14);
    let markers_json = close.markers_geojson()?;
    println!(
        "   Zoom 14 marker layer: {} features, {} bytes",
        close.markers.len(),
        markers_json.len()
    );

    // Feature properties carry everything a style layer needs.
    let collection: serde_json::Value = serde_json::from_str(&cells_json)?;
    println!(
        "   First cell properties: {}",
        collection["features"][0]["properties"]
    );

    // ========================================
    // 5. Density Weights
    // ========================================
    println!("\n5. Density Weights");
    println!("------------------");

    for count in [1, 4, 8, 15, 35, 120] {
        let weight = DensityWeight::for_count(count);
        println!(
            "   {:>3} records: {} (rank {})",
            count,
            weight.as_str(),
            weight.rank()
        );
    }

    // ========================================
    // 6. Reverse Geocoding Cache
    // ========================================
    println!("\n6. Reverse Geocoding Cache");
    println!("--------------------------");

    let places = PlaceCache::new(DemoGeocoder);

    println!("   (-6.2, 106.8): {}", places.resolve(-6.2, 106.8));
    println!(
        "   (-6.2, 106.8): {} (cache hit)",
        places.resolve(-6.2, 106.8)
    );
    println!("   (-7.0, 110.0): {}", places.resolve(-7.0, 110.0));
    println!("   (51.5, -0.1):  {} (fallback)", places.resolve(51.5, -0.1));
    println!("   Cached names: {}", places.len());

    println!("\n=== Map Pipeline Complete! ===");
    println!("\nKey Features Demonstrated:");
    println!("  • Parse records from a JSON payload, tolerating messy coordinates");
    println!("  • Aggregate records into aligned grid cells at four resolutions");
    println!("  • Pick a resolution and marker visibility from the zoom level");
    println!("  • Export cell and marker layers as GeoJSON FeatureCollections");
    println!("  • Bucket cell counts into density weights for styling");
    println!("  • Cache reverse geocoding answers and fall back to raw coordinates");

    Ok(())
}
