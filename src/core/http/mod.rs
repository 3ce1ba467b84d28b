use axum::{Router, routing::get};

use crate::AppState;

pub(crate) mod handlers;

pub use handlers::{StatusResponse, health, status};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(status))
        .route("/health", get(health))
}
