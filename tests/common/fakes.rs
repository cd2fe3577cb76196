//! Test doubles for the imagery service and the display surface.
//!
//! Both record every call so tests can check what reached the collaborators
//! and in which order.

use std::collections::HashMap;
use std::sync::Mutex;

use delivery_preview::imagery::CollectionInfo;
use delivery_preview::{
    DisplaySurface, Geometry, ImageInfo, ImageryService, Layer, PreviewError, Result,
};

/// A call received by [`FakeImageryService`]
#[derive(Debug, Clone, PartialEq)]
pub enum ServiceCall {
    Resolve(String),
    List(String, usize),
}

/// Imagery service answering from a fixed set of collections
#[derive(Debug, Default)]
pub struct FakeImageryService {
    collections: HashMap<String, Vec<ImageInfo>>,
    calls: Mutex<Vec<ServiceCall>>,
}

impl FakeImageryService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_collection(mut self, asset_path: &str, images: Vec<ImageInfo>) -> Self {
        self.collections.insert(asset_path.to_string(), images);
        self
    }

    pub fn calls(&self) -> Vec<ServiceCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Whether any call touched `asset_path`
    pub fn was_queried(&self, asset_path: &str) -> bool {
        self.calls().iter().any(|call| match call {
            ServiceCall::Resolve(p) | ServiceCall::List(p, _) => p == asset_path,
        })
    }

    fn record(&self, call: ServiceCall) {
        self.calls.lock().unwrap().push(call);
    }

    fn images(&self, asset_path: &str) -> Result<&Vec<ImageInfo>> {
        self.collections
            .get(asset_path)
            .ok_or_else(|| PreviewError::NotFound {
                asset_path: asset_path.to_string(),
            })
    }
}

impl ImageryService for FakeImageryService {
    fn resolve_collection(&self, asset_path: &str) -> Result<CollectionInfo> {
        self.record(ServiceCall::Resolve(asset_path.to_string()));
        let images = self.images(asset_path)?;
        Ok(CollectionInfo {
            asset_path: asset_path.to_string(),
            size: images.len(),
            band_names: images.first().map(|i| i.bands.clone()).unwrap_or_default(),
        })
    }

    fn list_images(&self, asset_path: &str, count: usize) -> Result<Vec<ImageInfo>> {
        self.record(ServiceCall::List(asset_path.to_string(), count));
        Ok(self.images(asset_path)?.iter().take(count).cloned().collect())
    }
}

/// A call received by [`RecordingSurface`]
#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceCall {
    AddLayer(Layer),
    Center {
        geometry: Geometry,
        zoom: Option<u8>,
    },
}

/// Display surface that only records
#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub calls: Vec<SurfaceCall>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn layers(&self) -> Vec<&Layer> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                SurfaceCall::AddLayer(layer) => Some(layer),
                _ => None,
            })
            .collect()
    }

    pub fn centers(&self) -> Vec<&Geometry> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                SurfaceCall::Center { geometry, .. } => Some(geometry),
                _ => None,
            })
            .collect()
    }
}

impl DisplaySurface for RecordingSurface {
    fn add_layer(&mut self, layer: Layer) -> Result<()> {
        self.calls.push(SurfaceCall::AddLayer(layer));
        Ok(())
    }

    fn center_object(&mut self, geometry: &Geometry, zoom: Option<u8>) -> Result<()> {
        self.calls.push(SurfaceCall::Center {
            geometry: geometry.clone(),
            zoom,
        });
        Ok(())
    }
}
