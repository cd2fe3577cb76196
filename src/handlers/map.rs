//! Map state endpoint handlers.
//!
//! `GET /map` returns layers and viewport, `GET /layers` only the layer stack.

use axum::{extract::State, Json};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};

use crate::display::{LayerEntry, MapState};
use crate::logging::generate_request_id;
use crate::state::AppState;

/// Handle GET /map requests
pub async fn map_handler(State(state): State<Arc<AppState>>) -> Json<MapState> {
    let request_id = generate_request_id();
    let start_time = Instant::now();

    debug!(
        endpoint = "/map",
        request_id = %request_id,
        "Processing map request"
    );

    let response = state.map.clone();

    info!(
        endpoint = "/map",
        request_id = %request_id,
        duration_us = start_time.elapsed().as_micros() as u64,
        layer_count = response.layer_count(),
        centered = response.viewport.is_some(),
        "Map request successful"
    );

    Json(response)
}

/// Handle GET /layers requests
pub async fn layers_handler(State(state): State<Arc<AppState>>) -> Json<Vec<LayerEntry>> {
    let request_id = generate_request_id();
    debug!(
        endpoint = "/layers",
        request_id = %request_id,
        layer_count = state.map.layer_count(),
        "Processing layers request"
    );
    Json(state.map.layers.clone())
}
