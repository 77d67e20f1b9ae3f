use axum::{extract::Request, http::StatusCode, response::Json};
use serde_json::{json, Value};

use crate::request_id::XRequestId;

pub async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

/// Fallback for unmatched routes: JSON 404 instead of an empty body.
pub async fn not_found(req: Request) -> (StatusCode, Json<Value>) {
    let rid = req
        .extensions()
        .get::<XRequestId>()
        .map(|XRequestId(id)| id.as_str())
        .unwrap_or("n/a");
    tracing::debug!(request_id = rid, path = %req.uri().path(), "no route matched");
    (StatusCode::NOT_FOUND, Json(json!({ "error": "Not found" })))
}
