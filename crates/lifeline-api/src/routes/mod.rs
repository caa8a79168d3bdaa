//! Route handlers, one module per resource group.

pub mod admin;
pub mod banks;
pub mod donors;
pub mod profile;
pub mod requests;

use axum::Json;
use serde_json::{json, Value};

/// Liveness probe.
pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
