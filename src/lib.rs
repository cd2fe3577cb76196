//! # delivery-preview
//!
//! Load delivered satellite image collections, pick a representative image
//! and preview it on a map.
//!
//! ## Architecture
//!
//! - **Imagery**: deferred handles over remote collections, evaluated against
//!   an [`ImageryService`] only when a value is needed
//! - **Visualization**: band mapping, stretch, gamma and palette parameters
//! - **Display**: an explicit [`DisplaySurface`] that receives layers and
//!   viewport changes
//! - **Pipeline**: load → render → select → center, run once

pub mod config;
pub mod display;
pub mod error;
pub mod handlers;
pub mod imagery;
pub mod logging;
pub mod pipeline;
pub mod state;
pub mod visualization;

pub use config::Config;
pub use display::{DisplaySurface, Layer, MapState, Viewport};
pub use error::{PreviewError, Result};
pub use imagery::{
    Geometry, ImageCollectionRef, ImageInfo, ImageList, ImageRef, ImageryService, Renderable,
    StaticCatalog,
};
pub use logging::{
    create_http_trace_layer, generate_request_id, init_tracing, log_error, log_operation_end,
    log_operation_start, log_timed_operation,
};
pub use pipeline::{run_preview, PreviewOutcome};
pub use state::AppState;
pub use visualization::{Preset, VisParams};
