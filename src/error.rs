//! Error types for delivery-preview.
//!
//! The first three variants mirror the failures an imagery service or a
//! display surface reports. The rest cover the local program around them.

use thiserror::Error;

/// The main error type for delivery-preview operations.
#[derive(Error, Debug)]
pub enum PreviewError {
    /// An asset path does not resolve to an existing collection
    #[error("Asset not found: {asset_path}")]
    NotFound { asset_path: String },

    /// An index is outside a materialized list
    #[error("Index out of range: {index} (list has {len} elements)")]
    OutOfRange { index: i64, len: usize },

    /// A request carries a parameter the service or surface rejects
    #[error("Invalid argument: {param} - {message}")]
    InvalidArgument { param: String, message: String },

    /// A deferred expression was applied to a value of the wrong kind
    #[error("Evaluation error: {message}")]
    Evaluation { message: String },

    /// Configuration errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Server errors
    #[error("Server error: {message}")]
    Server { message: String },
}

impl PreviewError {
    /// Shorthand for an [`PreviewError::InvalidArgument`]
    pub fn invalid(param: &str, message: impl Into<String>) -> Self {
        PreviewError::InvalidArgument {
            param: param.to_string(),
            message: message.into(),
        }
    }
}

/// Convenience type alias for Results with PreviewError
pub type Result<T> = std::result::Result<T, PreviewError>;
