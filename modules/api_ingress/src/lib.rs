use std::time::Duration;

use anyhow::{Context, Result};
use axum::{extract::DefaultBodyLimit, middleware::from_fn, routing::get, Router};
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tower_http::{
    cors::CorsLayer,
    limit::RequestBodyLimitLayer,
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
};

mod config;
pub mod request_id;
mod web;

pub use config::ApiIngressConfig;

/// HTTP host: wraps module routes with the shared endpoints and middleware
/// stack, then serves them until cancelled.
#[derive(Debug, Clone, Default)]
pub struct ApiIngress {
    config: ApiIngressConfig,
}

impl ApiIngress {
    pub fn new(config: ApiIngressConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ApiIngressConfig {
        &self.config
    }

    /// Adds `/health`, the JSON 404 fallback and the middleware stack on top of `routes`.
    pub fn build_router(&self, routes: Router) -> Router {
        tracing::debug!("Building router");
        let mut router = routes
            .route("/health", get(web::health_check))
            .fallback(web::not_found);

        // Layers are added innermost first. Request order once built:
        // SetRequestId -> PropagateRequestId -> Trace -> push_req_id_to_extensions
        //   -> Timeout -> CORS -> BodyLimit -> handler
        let x_request_id = request_id::header();
        let limit = self.config.body_limit_bytes;

        router = router
            .layer(DefaultBodyLimit::max(limit))
            .layer(RequestBodyLimitLayer::new(limit));

        if self.config.cors_enabled {
            router = router.layer(CorsLayer::permissive());
        }

        // 0 disables the handler timeout.
        if self.config.request_timeout_sec > 0 {
            router = router.layer(TimeoutLayer::new(Duration::from_secs(
                self.config.request_timeout_sec,
            )));
        }

        router
            .layer(from_fn(request_id::push_req_id_to_extensions))
            .layer(request_id::create_trace_layer())
            .layer(PropagateRequestIdLayer::new(x_request_id.clone()))
            .layer(SetRequestIdLayer::new(x_request_id, request_id::MakeReqId))
    }

    /// Bind `bind_addr` and serve until `cancel` fires.
    pub async fn serve(&self, router: Router, cancel: CancellationToken) -> Result<()> {
        let listener = TcpListener::bind(&self.config.bind_addr)
            .await
            .with_context(|| format!("Failed to bind HTTP server to '{}'", self.config.bind_addr))?;
        self.serve_with_listener(listener, router, cancel).await
    }

    pub async fn serve_with_listener(
        &self,
        listener: TcpListener,
        router: Router,
        cancel: CancellationToken,
    ) -> Result<()> {
        let addr = listener.local_addr()?;
        tracing::info!("HTTP server bound on {}", addr);

        let shutdown = async move {
            cancel.cancelled().await;
            tracing::info!("HTTP server shutting down gracefully (cancellation)");
        };

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown)
            .await
            .map_err(|e| anyhow::anyhow!(e))
    }
}
