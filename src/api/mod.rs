//! HTTP shell over the two pipelines.

pub mod handlers;
pub mod state;

use axum::Router;
use axum::routing::{get, post};
use tower_http::cors::CorsLayer;

pub use state::AppState;

/// Build the application router
#[must_use]
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/health", get(handlers::get_health))
        .route("/api/symptoms", get(handlers::list_symptoms))
        .route("/api/predict", post(handlers::predict))
        .route("/api/analyze", post(handlers::analyze))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
