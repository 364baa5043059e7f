//! Bounded in-process cache for link records.

use super::service::CacheService;
use crate::domain::entities::LinkRecord;
use async_trait::async_trait;
use moka::future::Cache;
use std::time::{Duration, Instant};
use tracing::debug;

#[derive(Clone)]
struct CachedLink {
    stored_at: Instant,
    link: LinkRecord,
}

/// In-process link cache shared by all requests of one server.
///
/// Backed by a Moka cache holding at most `capacity` entries. Entries expire
/// after `ttl`; readers may additionally demand a shorter age through
/// [`CacheService::get`].
pub struct MemoryCache {
    entries: Cache<String, CachedLink>,
}

impl MemoryCache {
    pub fn new(capacity: u64, ttl: Duration) -> Self {
        debug!("Using MemoryCache (capacity: {}, ttl: {:?})", capacity, ttl);
        let entries = Cache::builder()
            .max_capacity(capacity.max(1))
            .time_to_live(ttl.max(Duration::from_millis(1)))
            .build();

        Self { entries }
    }

    /// Number of entries currently held, after pending evictions ran.
    pub async fn len(&self) -> u64 {
        self.entries.run_pending_tasks().await;
        self.entries.entry_count()
    }
}

#[async_trait]
impl CacheService for MemoryCache {
    async fn get(&self, key: &str, max_age: Duration) -> Option<LinkRecord> {
        match self.entries.get(key).await {
            Some(cached) if cached.stored_at.elapsed() < max_age => {
                debug!("Cache HIT: {}", key);
                Some(cached.link)
            }
            Some(_) => {
                debug!("Cache STALE: {}", key);
                None
            }
            None => {
                debug!("Cache MISS: {}", key);
                None
            }
        }
    }

    async fn set(&self, key: &str, link: &LinkRecord) {
        self.entries
            .insert(
                key.to_string(),
                CachedLink {
                    stored_at: Instant::now(),
                    link: link.clone(),
                },
            )
            .await;
    }

    async fn invalidate(&self, key: &str) {
        if self.entries.remove(key).await.is_some() {
            debug!("Cache INVALIDATE: {}", key);
        }
    }
}
