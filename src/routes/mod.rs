//! HTTP routes

pub mod health;
pub mod process;

use axum::{routing::get, routing::post, Router};

use crate::state::AppState;

/// Assemble the application router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/process", post(process::process_file))
}
