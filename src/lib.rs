//! # Slug Redirect
//!
//! Resolves short slugs to stored URLs and redirects to them, optionally
//! gating each redirect behind a Cloudflare Turnstile challenge. Built with
//! Axum and Redis.
//!
//! ## Architecture
//!
//! - **Domain Layer** ([`domain`]) - Entities, repository traits, challenge verifier seam
//! - **Application Layer** ([`application`]) - Resolution, challenge and redirect services
//! - **Infrastructure Layer** ([`infrastructure`]) - Redis store, link cache, access log, Turnstile client
//! - **API Layer** ([`api`]) - Handlers, DTOs and middleware
//! - **Web Layer** ([`web`]) - Challenge interstitial page
//!
//! ## Request Pipeline
//!
//! 1. `/` redirects to `HOME_URL` when configured
//! 2. The request target is reduced to a slug and admitted (reserved list, pattern)
//! 3. The slug is resolved, lowercase first unless `CASE_SENSITIVE=true`
//! 4. Without Turnstile keys the redirect is sent immediately
//! 5. With Turnstile keys, `GET` serves the interstitial and `POST` verifies the token
//!
//! Every redirect queues an access event that a background worker appends
//! to a Redis list.
//!
//! ## Quick Start
//!
//! ```bash
//! export REDIS_URL="redis://localhost:6379"
//! redis-cli SET link:docs '{"url":"https://example.com/docs"}'
//! cargo run
//! curl -i http://localhost:3000/docs
//! ```
//!
//! ## Configuration
//!
//! Service configuration is loaded from environment variables via [`config::Config`].
//! See [`config`] module for available options.

pub mod api;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod state;
pub mod utils;

pub mod config;
pub mod server;

pub mod routes;
pub mod web;

pub use error::AppError;
pub use state::AppState;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::services::{ChallengeService, LinkService, RedirectService};
    pub use crate::domain::entities::{AccessEvent, LinkRecord, RedirectDecision, RequestContext};
    pub use crate::error::AppError;
    pub use crate::state::AppState;
}
