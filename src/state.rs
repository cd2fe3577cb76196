//! Application state for the map state server.
//!
//! The preview is built once before serving; handlers only read it.

use std::path::PathBuf;
use std::sync::Arc;

use crate::config::Config;
use crate::display::MapState;

/// State shared across all handlers
#[derive(Debug, Clone)]
pub struct AppState {
    /// Configuration
    pub config: Config,
    /// Catalog the preview was built from
    pub catalog_path: PathBuf,
    /// Finished map
    pub map: MapState,
}

impl AppState {
    pub fn new(config: Config, catalog_path: PathBuf, map: MapState) -> Self {
        Self {
            config,
            catalog_path,
            map,
        }
    }

    /// Create a new AppState wrapped in an Arc for shared ownership
    pub fn new_shared(config: Config, catalog_path: PathBuf, map: MapState) -> Arc<Self> {
        Arc::new(Self::new(config, catalog_path, map))
    }
}
