//! HTTP API for the shared canvas
//!
//! Provides:
//! - Canvas snapshot and palette reads
//! - Single pixel writes
//! - Live pixel feed (SSE)
//! - Health check
//!
//! Responses are gzip-compressed when the client accepts it.

pub mod canvas;
pub mod error;
pub mod events;
pub mod health;

use axum::{extract::Extension, Router};
use tower_http::{compression::CompressionLayer, cors::CorsLayer, trace::TraceLayer};

pub use canvas::canvas_routes;
pub use events::events_routes;
pub use health::health_routes;

use crate::service::PlaceService;

/// Create the API router with all endpoints
pub fn router(service: PlaceService) -> Router {
    Router::new()
        .merge(canvas_routes())
        .merge(events_routes())
        .merge(health_routes())
        .layer(Extension(service))
        // The default predicate leaves `text/event-stream` uncompressed.
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
