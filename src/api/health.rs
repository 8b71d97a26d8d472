//! Health check endpoint (for load balancers)

use axum::extract::Extension;
use axum::response::Json;
use axum::routing::get;
use axum::Router;
use serde::Serialize;

use crate::service::PlaceService;

/// Health response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    /// `None` once the broker has stopped
    pub subscribers: Option<usize>,
}

async fn health_check(Extension(service): Extension<PlaceService>) -> Json<HealthResponse> {
    let subscribers = service.broker().subscriber_count().await.ok();
    Json(HealthResponse {
        status: if subscribers.is_some() { "healthy" } else { "degraded" },
        version: env!("CARGO_PKG_VERSION"),
        subscribers,
    })
}

pub fn health_routes() -> Router {
    Router::new().route("/health", get(health_check))
}
