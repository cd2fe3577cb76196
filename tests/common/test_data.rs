//! Test data generation utilities.
//!
//! Image metadata builders and catalog files with known footprints.

use std::path::{Path, PathBuf};

use delivery_preview::{Geometry, ImageInfo};

/// Asset path of the collection that is loaded but not shown
pub const PRIMARY: &str = "projects/test/assets/apple_fire";
/// Asset path of the collection that is previewed
pub const SECONDARY: &str = "projects/test/assets/kunar";
/// Asset path of a collection without images
pub const EMPTY: &str = "projects/test/assets/empty";

/// Four-band bands: blue, green, red, near-infrared
pub fn four_bands() -> Vec<String> {
    ["B1", "B2", "B3", "B4"].iter().map(|b| b.to_string()).collect()
}

/// Image metadata with explicit bands and footprint
pub fn image(id: &str, bands: Vec<String>, geometry: Geometry) -> ImageInfo {
    ImageInfo {
        id: id.to_string(),
        bands,
        time_start: None,
        geometry,
    }
}

/// A four-band image covering a 0.1 degree square at `(lon, lat)`
pub fn four_band_image(id: &str, lon: f64, lat: f64) -> ImageInfo {
    image(
        id,
        four_bands(),
        Geometry::rectangle(lon, lat, lon + 0.1, lat + 0.1),
    )
}

/// Images of the previewed collection, each at a different place
pub fn secondary_images() -> Vec<ImageInfo> {
    vec![
        four_band_image("kunar-0", 70.9, 34.8),
        four_band_image("kunar-1", 71.3, 35.1),
        four_band_image("kunar-2", 71.6, 35.4),
    ]
}

/// Images of the collection that is loaded but not shown
pub fn primary_images() -> Vec<ImageInfo> {
    vec![four_band_image("apple-0", -117.0, 33.9)]
}

/// Write a catalog with the primary, secondary and empty collections
pub fn create_test_catalog(dir: &Path) -> std::io::Result<PathBuf> {
    let catalog = serde_json::json!({
        "collections": [
            { "asset_path": PRIMARY, "images": primary_images() },
            { "asset_path": SECONDARY, "images": secondary_images() },
            { "asset_path": EMPTY, "images": [] },
        ]
    });

    let path = dir.join("catalog.json");
    std::fs::write(&path, serde_json::to_string_pretty(&catalog)?)?;
    Ok(path)
}
