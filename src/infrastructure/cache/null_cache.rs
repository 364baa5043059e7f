//! No-op cache implementation for disabled caching.

use super::service::CacheService;
use crate::domain::entities::LinkRecord;
use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;

/// A cache implementation that does nothing.
///
/// Used when `LINK_CACHE_TTL=0`, so every lookup goes to the link store.
pub struct NullCache;

impl NullCache {
    /// Creates a new NullCache instance.
    pub fn new() -> Self {
        debug!("Using NullCache (link caching disabled)");
        Self
    }
}

impl Default for NullCache {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CacheService for NullCache {
    async fn get(&self, _key: &str, _max_age: Duration) -> Option<LinkRecord> {
        None
    }

    async fn set(&self, _key: &str, _link: &LinkRecord) {}

    async fn invalidate(&self, _key: &str) {}
}
