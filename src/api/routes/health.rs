//! Liveness probe.

use axum::Json;
use serde_json::{Value, json};

/// `GET /api/health`
pub async fn check() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
