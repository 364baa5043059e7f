//! Application layer services implementing the redirect pipeline.
//!
//! Services consume the domain traits and give HTTP handlers a small API.
//!
//! # Available Services
//!
//! - [`services::link_service::LinkService`] - Slug admission and case-aware resolution
//! - [`services::challenge_service::ChallengeService`] - Challenge gate and token verification
//! - [`services::redirect_service::RedirectService`] - Access logging and redirect construction

pub mod services;
