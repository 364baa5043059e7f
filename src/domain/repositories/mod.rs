//! Repository trait definitions for the domain layer.
//!
//! These traits abstract the external collaborators of the redirect path.
//! Concrete implementations live in `crate::infrastructure`, and mock
//! implementations are generated via `mockall` for unit tests.
//!
//! # Available Repositories
//!
//! - [`LinkRepository`] - Slug to link record lookups
//! - [`AccessLogRepository`] - Redirect event recording

pub mod access_log_repository;
pub mod link_repository;

pub use access_log_repository::AccessLogRepository;
pub use link_repository::LinkRepository;

#[cfg(test)]
pub use access_log_repository::MockAccessLogRepository;
#[cfg(test)]
pub use link_repository::MockLinkRepository;
