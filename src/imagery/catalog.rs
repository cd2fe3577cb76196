//! File-backed imagery service.
//!
//! A catalog is a JSON document listing collections and the metadata of their
//! images. Images keep the order they have in the file.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info};

use super::service::{CollectionInfo, ImageInfo, ImageryService};
use crate::error::{PreviewError, Result};

/// One collection entry of a catalog file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogCollection {
    pub asset_path: String,
    #[serde(default)]
    pub images: Vec<ImageInfo>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct CatalogFile {
    collections: Vec<CatalogCollection>,
}

/// An [`ImageryService`] answering from an in-memory catalog
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    collections: HashMap<String, Vec<ImageInfo>>,
    order: Vec<String>,
}

impl StaticCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a collection, replacing any earlier one at the same path
    pub fn insert(&mut self, asset_path: &str, images: Vec<ImageInfo>) {
        if !self.collections.contains_key(asset_path) {
            self.order.push(asset_path.to_string());
        }
        self.collections.insert(asset_path.to_string(), images);
    }

    /// Parse a catalog from JSON text
    pub fn from_json(content: &str) -> Result<Self> {
        let file: CatalogFile = serde_json::from_str(content)?;
        let mut catalog = StaticCatalog::new();

        for collection in file.collections {
            if collection.asset_path.trim().is_empty() {
                return Err(PreviewError::Config {
                    message: "Catalog contains a collection with an empty asset path".to_string(),
                });
            }
            if catalog.contains(&collection.asset_path) {
                return Err(PreviewError::Config {
                    message: format!("Duplicate collection in catalog: {}", collection.asset_path),
                });
            }
            for image in &collection.images {
                image.geometry.validate().map_err(|e| PreviewError::Config {
                    message: format!("Image {} in {}: {}", image.id, collection.asset_path, e),
                })?;
            }
            catalog.insert(&collection.asset_path, collection.images);
        }

        Ok(catalog)
    }

    /// Load a catalog file from disk
    pub fn load(path: &Path) -> Result<Self> {
        let start = Instant::now();
        let content = std::fs::read_to_string(path)?;
        let catalog = Self::from_json(&content)?;

        info!(
            operation = "catalog_load",
            file_path = %path.display(),
            collection_count = catalog.order.len(),
            image_count = catalog.image_count(),
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Catalog loaded successfully"
        );

        Ok(catalog)
    }

    pub fn contains(&self, asset_path: &str) -> bool {
        self.collections.contains_key(asset_path)
    }

    /// Asset paths in file order
    pub fn asset_paths(&self) -> &[String] {
        &self.order
    }

    /// Total number of images over all collections
    pub fn image_count(&self) -> usize {
        self.collections.values().map(Vec::len).sum()
    }

    fn images(&self, asset_path: &str) -> Result<&Vec<ImageInfo>> {
        self.collections
            .get(asset_path)
            .ok_or_else(|| PreviewError::NotFound {
                asset_path: asset_path.to_string(),
            })
    }
}

impl ImageryService for StaticCatalog {
    fn resolve_collection(&self, asset_path: &str) -> Result<CollectionInfo> {
        let images = self.images(asset_path)?;
        debug!(asset_path = asset_path, size = images.len(), "Collection resolved");

        Ok(CollectionInfo {
            asset_path: asset_path.to_string(),
            size: images.len(),
            band_names: images
                .first()
                .map(|image| image.bands.clone())
                .unwrap_or_default(),
        })
    }

    fn list_images(&self, asset_path: &str, count: usize) -> Result<Vec<ImageInfo>> {
        let images = self.images(asset_path)?;
        Ok(images.iter().take(count).cloned().collect())
    }
}
