//! The imagery service seam.
//!
//! Everything remote goes through [`ImageryService`]. The program never
//! fetches pixels; it only asks for collection summaries and image metadata.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::geometry::Geometry;
use crate::error::Result;

/// Summary of a collection as reported by the service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectionInfo {
    /// Asset path the collection was resolved from
    pub asset_path: String,
    /// Number of images in the collection
    pub size: usize,
    /// Band names of the collection's images (empty for an empty collection)
    pub band_names: Vec<String>,
}

/// Metadata of one remote image
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageInfo {
    /// Service-side image identifier
    pub id: String,
    /// Band names in service order
    pub bands: Vec<String>,
    /// Acquisition start time, when known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_start: Option<DateTime<Utc>>,
    /// Footprint of the image
    pub geometry: Geometry,
}

impl ImageInfo {
    pub fn has_band(&self, name: &str) -> bool {
        self.bands.iter().any(|b| b == name)
    }
}

/// Remote imagery collaborator
pub trait ImageryService: Send + Sync {
    /// Resolve an asset path to a collection summary.
    ///
    /// Fails with `NotFound` when the path does not name a collection.
    fn resolve_collection(&self, asset_path: &str) -> Result<CollectionInfo>;

    /// Materialize at most `count` images of a collection, in service order
    fn list_images(&self, asset_path: &str, count: usize) -> Result<Vec<ImageInfo>>;
}
