use axum::Json;
use serde_json::{Value, json};

pub async fn index() -> Json<Value> {
    Json(json!({
        "status": "running",
        "message": "Submission service is running",
        "uploadEndpoint": "/upload",
    }))
}

pub async fn health() -> &'static str {
    "ok"
}
