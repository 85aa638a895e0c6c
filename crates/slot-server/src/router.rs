//! Router configuration for the HTTP API.

use axum::{
    routing::{get, post, put},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers;
use super::state::AppState;

/// Create the application router with all routes and middleware.
pub fn create_router(state: AppState) -> Router {
    // The booking pages are served from another origin.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/users", post(handlers::register_host))
        .route("/users/{username}/availability", get(handlers::get_availability))
        .route("/users/{username}/blocked-dates", get(handlers::get_blocked_dates))
        .route("/users/{username}/time-intervals", put(handlers::put_time_intervals))
        .route("/users/{username}/schedule", post(handlers::create_schedule))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
