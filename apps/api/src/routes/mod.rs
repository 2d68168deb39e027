pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::state::AppState;
use crate::tailoring::handlers;

/// Largest accepted request body: a 5 MiB file grows by a third under base64.
pub const MAX_BODY_BYTES: usize = 8 * 1024 * 1024;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/tailor", post(handlers::handle_tailor))
        .route("/api/v1/tailor/upload", post(handlers::handle_tailor_upload))
        .route("/api/v1/export", post(handlers::handle_export))
        .route("/api/v1/export/formats", get(handlers::handle_export_formats))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .with_state(state)
}
