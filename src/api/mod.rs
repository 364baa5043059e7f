//! HTTP layer for request/response handling.
//!
//! Translates requests into calls on the application services and renders
//! their results.
//!
//! # Modules
//!
//! - [`dto`] - Request/response bodies
//! - [`handlers`] - HTTP request handlers
//! - [`middleware`] - Rate limiting and tracing

pub mod dto;
pub mod handlers;
pub mod middleware;
