use axum::{
    http::Method,
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};

use super::handlers;
use crate::core::state::AppState;

/// Build the `/api` router.
///
/// `{id}` under `/api/campaigns` is a campaign id for `start` and a run id
/// for `status`, `pause` and `stop`.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::OPTIONS])
        .allow_headers(Any);

    Router::new()
        .route("/api/stats", get(handlers::get_stats))
        .route(
            "/api/agents",
            get(handlers::list_agents).post(handlers::create_agent),
        )
        .route(
            "/api/agents/{id}",
            get(handlers::get_agent).put(handlers::update_agent),
        )
        .route("/api/campaigns", get(handlers::list_campaigns))
        .route("/api/campaigns/{id}/start", post(handlers::start_campaign))
        .route("/api/campaigns/{id}/status", get(handlers::run_status))
        .route("/api/campaigns/{id}/pause", post(handlers::pause_run))
        .route("/api/campaigns/{id}/stop", post(handlers::stop_run))
        .route("/api/logs", get(handlers::list_logs))
        .layer(cors)
        .with_state(state)
}
