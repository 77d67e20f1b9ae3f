use axum::{
    body::Body,
    extract::Extension,
    http::{Request, StatusCode},
    response::Json,
    routing::get,
    Router,
};
use serde_json::json;
use tower::util::ServiceExt; // for `oneshot`

use api_ingress::request_id::XRequestId;
use api_ingress::{ApiIngress, ApiIngressConfig};

#[tokio::test]
async fn generates_request_id_when_missing() {
    let app = test_app();

    let response = app
        .oneshot(Request::builder().uri("/test").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let header_id = response
        .headers()
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned);
    assert!(header_id.is_some(), "x-request-id should be generated");

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    let seen_by_handler = json["request_id"].as_str().unwrap();
    assert!(!seen_by_handler.is_empty());
    assert_eq!(header_id.as_deref(), Some(seen_by_handler));
}

#[tokio::test]
async fn preserves_incoming_request_id() {
    let app = test_app();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/test")
                .header("x-request-id", "abc-123")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let request_id = response
        .headers()
        .get("x-request-id")
        .and_then(|v| v.to_str().ok());
    assert_eq!(request_id, Some("abc-123"));
}

#[tokio::test]
async fn includes_request_id_in_error_json() {
    let app = test_app();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/error")
                .header("x-request-id", "error-test-123")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let request_id = response
        .headers()
        .get("x-request-id")
        .and_then(|v| v.to_str().ok());
    assert_eq!(request_id, Some("error-test-123"));

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();

    assert_eq!(json["error"], "Test error");
    assert_eq!(json["request_id"], "error-test-123");
}

#[tokio::test]
async fn fallback_responses_carry_request_id() {
    let app = test_app();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/nowhere")
                .header("x-request-id", "lost-1")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        response
            .headers()
            .get("x-request-id")
            .and_then(|v| v.to_str().ok()),
        Some("lost-1")
    );
}

// Test app with success and error routes behind the full ingress stack
fn test_app() -> Router {
    let routes = Router::new()
        .route("/test", get(success_handler))
        .route("/error", get(error_handler));

    ApiIngress::new(ApiIngressConfig::default()).build_router(routes)
}

async fn success_handler(
    Extension(XRequestId(request_id)): Extension<XRequestId>,
) -> Json<serde_json::Value> {
    Json(json!({"status": "ok", "request_id": request_id}))
}

async fn error_handler(
    Extension(XRequestId(request_id)): Extension<XRequestId>,
) -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({
            "error": "Test error",
            "request_id": request_id
        })),
    )
}
