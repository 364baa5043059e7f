//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET /health` - Health check: link store, access log, challenge
//! - everything else - Slug redirect pipeline (fallback)
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//!
//! Rate limiting depends on the peer address and is layered on in
//! [`crate::server::run`].

use crate::api::handlers::{health_handler, redirect_handler};
use crate::api::middleware::tracing;
use crate::state::AppState;
use axum::Router;
use axum::routing::get;

/// Constructs the application router with all routes and middleware.
///
/// The redirect pipeline is the fallback so that it receives the raw
/// request target, including paths with extra or trailing slashes.
pub fn app_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .fallback(redirect_handler)
        .with_state(state)
        .layer(tracing::layer())
}
