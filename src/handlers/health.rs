use axum::Json;
use serde_json::{json, Value};

pub async fn banner() -> &'static str {
    "Backend API is running..."
}

pub async fn health_check() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
