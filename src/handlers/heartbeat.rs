//! Heartbeat endpoint handler.
//!
//! Returns server status, uptime and a summary of the served map.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::{Duration, SystemTime};
use uuid::Uuid;

use crate::state::AppState;

/// Server ID, unique per process
static SERVER_ID: once_cell::sync::Lazy<String> =
    once_cell::sync::Lazy::new(|| Uuid::new_v4().to_string());

/// Server start time
static START_TIME: once_cell::sync::Lazy<SystemTime> =
    once_cell::sync::Lazy::new(SystemTime::now);

/// Heartbeat response structure
#[derive(Debug, Serialize, Deserialize)]
pub struct HeartbeatResponse {
    /// Server ID (unique per instance)
    pub server_id: String,
    /// Current timestamp (ISO 8601 format)
    pub timestamp: String,
    /// Server uptime in seconds
    pub uptime_seconds: u64,
    /// Served map summary
    pub map: MapInfo,
    /// Server status
    pub status: String,
}

/// Map summary structure
#[derive(Debug, Serialize, Deserialize)]
pub struct MapInfo {
    /// Catalog file the preview was built from
    pub catalog_path: String,
    /// Number of layers
    pub layer_count: usize,
    /// Layer names, bottom to top
    pub layers: Vec<String>,
    /// Whether a viewport has been set
    pub centered: bool,
}

/// Record the server start time; call once before serving
pub fn mark_started() {
    once_cell::sync::Lazy::force(&START_TIME);
}

/// Handle GET /heartbeat requests
pub async fn heartbeat_handler(State(state): State<Arc<AppState>>) -> Json<HeartbeatResponse> {
    let now = SystemTime::now();
    let timestamp = chrono::DateTime::<chrono::Utc>::from(now)
        .to_rfc3339_opts(chrono::SecondsFormat::Millis, true);

    let uptime = now
        .duration_since(*START_TIME)
        .unwrap_or(Duration::from_secs(0));

    let map = MapInfo {
        catalog_path: state.catalog_path.display().to_string(),
        layer_count: state.map.layer_count(),
        layers: state.map.layers.iter().map(|l| l.name.clone()).collect(),
        centered: state.map.viewport.is_some(),
    };

    Json(HeartbeatResponse {
        server_id: SERVER_ID.clone(),
        timestamp,
        uptime_seconds: uptime.as_secs(),
        map,
        status: "healthy".to_string(),
    })
}
