use super::handlers;
use super::state::AppState;
use axum::{
    routing::{delete, get, post, put},
    Router,
};
use tower_http::trace::TraceLayer;

/// Create the HTTP router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        // Stateless calculations
        .route("/cost", post(handlers::calculate_cost))
        .route("/rate/:annual_salary", get(handlers::hourly_rate))
        // Timer control
        .route("/meetings", post(handlers::create_meeting))
        .route("/meetings/:meeting_id", delete(handlers::delete_meeting))
        .route("/meetings/:meeting_id/start", post(handlers::start_meeting))
        .route("/meetings/:meeting_id/stop", post(handlers::stop_meeting))
        .route("/meetings/:meeting_id/inputs", put(handlers::update_inputs))
        // Meeting queries
        .route(
            "/meetings/:meeting_id/status",
            get(handlers::get_meeting_status),
        )
        // Add tracing middleware for request logging
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
