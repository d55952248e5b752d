//! Route definitions for the Habit Coach API
//!
//! This module organizes all API routes and applies middleware.

use crate::state::AppState;
use axum::{
    http::{header, Method},
    routing::get,
    Router,
};
use std::time::Duration;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

mod dashboard;
mod events;
mod health;
mod profile;
mod reports;

pub use dashboard::dashboard_routes;
pub use events::event_routes;
pub use profile::profile_routes;
pub use reports::report_routes;

// Report generation may spend up to two full model-call timeouts, so
// the blanket request timeout has to sit above 2 x llm.timeout_secs.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(150);

/// Create the main application router with all middleware
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
        .route("/health/live", get(health::liveness_check))
        .nest("/api/v1", api_routes())
        // Apply middleware layers
        .layer(CompressionLayer::new())
        .layer(TimeoutLayer::new(REQUEST_TIMEOUT))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods([Method::GET, Method::POST, Method::PUT])
                .allow_headers([header::CONTENT_TYPE]),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// API v1 routes
fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(|| async { "Habit Coach API v1" }))
        .nest("/events", events::event_routes())
        .nest("/dashboard", dashboard::dashboard_routes())
        .nest("/reports", reports::report_routes())
        .nest("/profile", profile::profile_routes())
}
