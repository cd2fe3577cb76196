//! Configuration management for delivery-preview.
//!
//! This module handles the layered configuration system with the following precedence:
//! 1. Command-line arguments (highest priority)
//! 2. Environment variables
//! 3. JSON config file
//! 4. Default values (lowest priority)

use clap::Parser;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::display::viewport::MAX_ZOOM;
use crate::error::{PreviewError, Result};
use crate::visualization::{Preset, VisParams};

/// Command-line arguments for delivery-preview
#[derive(Parser, Debug)]
#[command(name = "delivery-preview")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the JSON catalog describing the delivered collections
    pub catalog: PathBuf,

    /// Path to JSON configuration file
    #[arg(short, long, env = "DELIVERY_PREVIEW_CONFIG")]
    pub config: Option<PathBuf>,

    /// Write the resulting map state as JSON to this file instead of stdout
    #[arg(short, long, env = "DELIVERY_PREVIEW_OUTPUT")]
    pub output: Option<PathBuf>,

    /// Serve the map state over HTTP after the preview is built
    #[arg(long, env = "DELIVERY_PREVIEW_SERVE")]
    pub serve: bool,

    /// Host address to bind to when serving
    #[arg(short = 'H', long, env = "DELIVERY_PREVIEW_HOST")]
    pub host: Option<String>,

    /// Port to listen on when serving
    #[arg(short, long, env = "DELIVERY_PREVIEW_PORT")]
    pub port: Option<u16>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "DELIVERY_PREVIEW_LOG_LEVEL")]
    pub log_level: Option<String>,
}

/// Server configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host address to bind to
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to listen on
    #[serde(default = "default_port")]
    pub port: u16,
}

/// Display surface configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Map width in pixels
    #[serde(default = "default_width")]
    pub width: u32,

    /// Map height in pixels
    #[serde(default = "default_height")]
    pub height: u32,
}

/// What the preview loads and how it shows it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreviewConfig {
    /// Collection loaded alongside the previewed one
    #[serde(default = "default_primary_collection")]
    pub primary_collection: String,

    /// Collection that is rendered and centered on
    #[serde(default = "default_secondary_collection")]
    pub secondary_collection: String,

    /// Visualization of the rendered layer
    #[serde(default = "default_visualization")]
    pub visualization: VisParams,

    /// Layer name; the surface names it when absent
    #[serde(default)]
    pub layer_name: Option<String>,

    /// Fixed zoom for centering; fitted to the image when absent
    #[serde(default)]
    pub zoom: Option<u8>,
}

/// Complete configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Display configuration
    #[serde(default)]
    pub display: DisplayConfig,

    /// Preview configuration
    #[serde(default)]
    pub preview: PreviewConfig,

    /// Where to write the map state (stdout when absent)
    #[serde(default)]
    pub output: Option<PathBuf>,

    /// Serve the map state after the preview
    #[serde(default)]
    pub serve: bool,

    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Config {
    /// Load configuration from all sources with proper precedence
    pub fn load() -> Result<(Self, PathBuf)> {
        Self::from_args(Args::parse())
    }

    /// Build the configuration from already parsed arguments
    pub fn from_args(args: Args) -> Result<(Self, PathBuf)> {
        // Start with defaults
        let mut config = Config::default();

        // Load from JSON file if provided
        if let Some(config_path) = &args.config {
            let json_config = Self::load_from_file(config_path)?;
            config.merge(json_config);
        }

        // Override with command-line arguments
        if let Some(host) = args.host {
            config.server.host = host;
        }
        if let Some(port) = args.port {
            config.server.port = port;
        }
        if let Some(log_level) = args.log_level {
            config.log_level = log_level;
        }
        if args.output.is_some() {
            config.output = args.output;
        }
        config.serve |= args.serve;

        Ok((config, args.catalog))
    }

    /// Load configuration from a JSON file
    fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Merge another config into this one (other takes precedence)
    fn merge(&mut self, other: Config) {
        self.server = other.server;
        self.display = other.display;
        self.preview = other.preview;
        if other.output.is_some() {
            self.output = other.output;
        }
        self.serve |= other.serve;
        self.log_level = other.log_level;
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.server.host.is_empty() {
            return Err(PreviewError::Config {
                message: "Server host cannot be empty".to_string(),
            });
        }

        if self.server.port == 0 {
            return Err(PreviewError::Config {
                message: "Server port cannot be 0".to_string(),
            });
        }

        match self.log_level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => {
                return Err(PreviewError::Config {
                    message: format!(
                        "Invalid log level: {}. Must be one of: trace, debug, info, warn, error",
                        self.log_level
                    ),
                });
            }
        }

        if self.display.width == 0 || self.display.height == 0 {
            return Err(PreviewError::Config {
                message: "Display width and height must be positive".to_string(),
            });
        }

        for (name, path) in [
            ("primary_collection", &self.preview.primary_collection),
            ("secondary_collection", &self.preview.secondary_collection),
        ] {
            if path.trim().is_empty() {
                return Err(PreviewError::Config {
                    message: format!("{} cannot be empty", name),
                });
            }
        }

        if let Some(zoom) = self.preview.zoom {
            if zoom > MAX_ZOOM {
                return Err(PreviewError::Config {
                    message: format!("Zoom {} exceeds the maximum of {}", zoom, MAX_ZOOM),
                });
            }
        }

        self.preview
            .visualization
            .validate_shape()
            .map_err(|e| PreviewError::Config {
                message: format!("Invalid visualization: {}", e),
            })?;

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            display: DisplayConfig::default(),
            preview: PreviewConfig::default(),
            output: None,
            serve: false,
            log_level: default_log_level(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
        }
    }
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            primary_collection: default_primary_collection(),
            secondary_collection: default_secondary_collection(),
            visualization: default_visualization(),
            layer_name: None,
            zoom: None,
        }
    }
}

// Default value functions for serde
fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_width() -> u32 {
    800
}

fn default_height() -> u32 {
    600
}

fn default_primary_collection() -> String {
    "projects/planet-earthengine-staging/assets/apple_fire".to_string()
}

fn default_secondary_collection() -> String {
    "projects/planet-earthengine-staging/assets/kunar-demo".to_string()
}

fn default_visualization() -> VisParams {
    Preset::TrueColor.vis_params()
}

fn default_log_level() -> String {
    "info".to_string()
}
