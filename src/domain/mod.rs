//! Domain layer containing entities and collaborator contracts.
//!
//! # Architecture
//!
//! - [`entities`] - Core data structures of the redirect path
//! - [`repositories`] - Link store and access log trait definitions
//! - [`challenge`] - Bot-verification trait
//! - [`access_worker`] - Asynchronous access log worker
//!
//! # Design Principles
//!
//! - Domain layer has no dependencies on infrastructure
//! - Traits define contracts implemented by the infrastructure layer
//! - Request handling logic lives in services (see [`crate::application::services`])
//!
//! # Access Log Flow
//!
//! 1. A redirect is about to be emitted
//! 2. [`entities::AccessEvent`] is pushed onto a bounded queue
//! 3. [`access_worker::run_access_log_worker`] persists it with retry logic

pub mod access_worker;
pub mod challenge;
pub mod entities;
pub mod repositories;
