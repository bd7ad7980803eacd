use crate::handlers::{business, health, individual};
use crate::state::State;
use axum::{
    extract::DefaultBodyLimit,
    http::StatusCode,
    routing::{get, post},
    Router,
};
use signup_core::api;
use std::time::Duration;
use tower_http::{compression, limit, timeout, trace};

/// Every route we serve, with middleware applied.
pub fn router(state: State, body_limit: usize, request_timeout: Duration) -> Router {
    Router::new()
        // ROUTES
        .route("/health", get(health::handler))
        .route(api::individual::PATH, post(individual::handler))
        .route(api::business::PATH, post(business::handler))
        // MIDDLEWARE
        .layer(timeout::TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            request_timeout,
        ))
        .layer(DefaultBodyLimit::disable())
        .layer(limit::RequestBodyLimitLayer::new(body_limit))
        .layer(compression::CompressionLayer::new())
        .layer(trace::TraceLayer::new_for_http())
        // STATE
        .with_state(state)
}
