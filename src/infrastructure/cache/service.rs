//! Cache service trait.

use async_trait::async_trait;
use std::time::Duration;

use crate::domain::entities::LinkRecord;

/// Trait for caching link records in front of the link store.
///
/// Freshness is decided by the reader, not the writer: entries remember when
/// they were stored and [`CacheService::get`] only returns an entry younger
/// than the age the caller is willing to accept.
///
/// # Implementations
///
/// - [`crate::infrastructure::cache::MemoryCache`] - Bounded in-process Moka cache
/// - [`crate::infrastructure::cache::NullCache`] - No-op implementation for disabled caching
#[async_trait]
pub trait CacheService: Send + Sync {
    /// Retrieves a record stored under `key` at most `max_age` ago.
    ///
    /// Returns `None` on a miss or a stale entry.
    async fn get(&self, key: &str, max_age: Duration) -> Option<LinkRecord>;

    /// Stores a record under `key`, stamped with the current time.
    async fn set(&self, key: &str, link: &LinkRecord);

    /// Removes a cached record.
    async fn invalidate(&self, key: &str);
}
