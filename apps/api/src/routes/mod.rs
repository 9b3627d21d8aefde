pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::guidance::handlers as guidance;
use crate::local_help::handlers as local_help;
use crate::session::handlers as session;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/guidance", post(guidance::handle_guidance))
        .route("/api/v1/local-help", post(local_help::handle_local_help))
        .route(
            "/api/v1/local-help/quick-searches",
            get(local_help::handle_quick_searches),
        )
        .route("/api/v1/sessions", post(session::handle_create_session))
        .route(
            "/api/v1/sessions/:id/location",
            post(session::handle_capture_location),
        )
        .route(
            "/api/v1/sessions/:id/outcome",
            get(session::handle_get_outcome),
        )
        .with_state(state)
}
