pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::generation::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let upload_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/health", get(health::health_handler))
        .route("/generate", post(handlers::handle_generate_resume))
        .route(
            "/generate_cover_letter",
            post(handlers::handle_generate_cover_letter),
        )
        .layer(DefaultBodyLimit::max(upload_limit))
        .with_state(state)
}
