//! Infrastructure layer for external integrations.
//!
//! This layer implements the interfaces defined by the domain layer.
//!
//! # Modules
//!
//! - [`persistence`] - Redis link store and access log list
//! - [`cache`] - In-process link cache and the read-through decorator
//! - [`access_log`] - Queue front end and tracing backend for the access log
//! - [`challenge`] - Turnstile verification client

pub mod access_log;
pub mod cache;
pub mod challenge;
pub mod persistence;
