//! API module
//!
//! HTTP API endpoints and middleware.

pub mod middleware;
pub mod routes;

use axum::{middleware::from_fn, routing::get, Router};
use tower_http::trace::TraceLayer;

pub use routes::create_router;

/// Full application router: health check plus the API under `/api`
pub fn build_router() -> Router {
    Router::new()
        .route("/health", get(health_check))
        .nest("/api", create_router())
        .layer(from_fn(middleware::logging_middleware))
        .layer(TraceLayer::new_for_http())
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}
