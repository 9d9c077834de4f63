pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::state::AppState;
use crate::variants::handlers;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Variants API
        .route("/api/v1/variants/validate", post(handlers::handle_validate))
        .route("/api/v1/variants/resolve", post(handlers::handle_resolve))
        .route(
            "/api/v1/variants/resolve/batch",
            post(handlers::handle_resolve_batch),
        )
        .route("/api/v1/variants/diff", post(handlers::handle_diff))
        .route(
            "/api/v1/resumes/sections/defaults",
            get(handlers::handle_default_sections),
        )
        .with_state(state)
}
