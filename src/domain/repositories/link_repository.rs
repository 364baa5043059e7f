//! Repository trait for link store reads.

use crate::domain::entities::LinkRecord;
use crate::error::AppError;
use async_trait::async_trait;
use std::time::Duration;

/// Read-only access to the key-value link store.
///
/// The redirect path never writes links; creation and editing belong to the
/// management side of the system.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::RedisLinkRepository`] - Redis store
///   fronted by an in-process freshness cache
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkRepository: Send + Sync {
    /// Point read of `link:{slug}`, with the slug used exactly as given.
    ///
    /// A cached copy may be returned if it is younger than `max_cache_age`;
    /// `Duration::ZERO` forces a read from the store.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(LinkRecord))` if the key exists and decodes
    /// - `Ok(None)` if the key is absent
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] when the store cannot be reached.
    async fn get(&self, slug: &str, max_cache_age: Duration)
    -> Result<Option<LinkRecord>, AppError>;

    /// Checks if the store backend is reachable.
    async fn health_check(&self) -> bool;
}
