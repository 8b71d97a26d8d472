//! Canvas read and write endpoints
//!
//! - `GET /canvas`: whole canvas blob
//! - `GET /palette`: permitted colors
//! - `POST /pixel`: set one pixel

use axum::{
    extract::{rejection::JsonRejection, Extension},
    http::header,
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};
use newplaces_canvas::{Palette, Pixel};
use tracing::debug;

use super::error::ApiError;
use crate::service::PlaceService;

async fn get_canvas(Extension(service): Extension<PlaceService>) -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "application/octet-stream")],
        service.canvas().await,
    )
}

async fn get_palette(Extension(service): Extension<PlaceService>) -> Json<Palette> {
    Json(service.palette().clone())
}

async fn set_pixel(
    Extension(service): Extension<PlaceService>,
    body: Result<Json<Pixel>, JsonRejection>,
) -> Result<&'static str, ApiError> {
    let Json(pixel) = body?;
    let committed = service.set_pixel(pixel).await?;
    debug!(x = committed.x, y = committed.y, "Pixel set");
    Ok("OK")
}

pub fn canvas_routes() -> Router {
    Router::new()
        .route("/canvas", get(get_canvas))
        .route("/palette", get(get_palette))
        .route("/pixel", post(set_pixel))
}
