//! HTTP request handlers for the map state server.

pub mod heartbeat;
pub mod map;

pub use heartbeat::heartbeat_handler;
pub use map::{layers_handler, map_handler};

use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::cors::CorsLayer;

use crate::logging::create_http_trace_layer;
use crate::state::AppState;

/// Build the router serving a finished preview
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/map", get(map_handler))
        .route("/layers", get(layers_handler))
        .route("/heartbeat", get(heartbeat_handler))
        .layer(create_http_trace_layer())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
