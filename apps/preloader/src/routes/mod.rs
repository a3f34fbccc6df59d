pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::preload::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route(
            "/api/v1/preload-links",
            post(handlers::handle_preload_links),
        )
        .with_state(state)
}
