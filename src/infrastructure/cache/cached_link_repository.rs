//! Read-through cache decorator for link repositories.

use super::service::CacheService;
use crate::domain::entities::LinkRecord;
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

/// Serves links from a [`CacheService`] when fresh enough, otherwise reads
/// through to the wrapped store and caches the result.
///
/// Misses are never cached, so a link created after a miss becomes visible
/// on the next request, and a miss evicts any stale entry.
pub struct CachedLinkRepository {
    inner: Arc<dyn LinkRepository>,
    cache: Arc<dyn CacheService>,
}

impl CachedLinkRepository {
    pub fn new(inner: Arc<dyn LinkRepository>, cache: Arc<dyn CacheService>) -> Self {
        Self { inner, cache }
    }
}

#[async_trait]
impl LinkRepository for CachedLinkRepository {
    async fn get(
        &self,
        slug: &str,
        max_cache_age: Duration,
    ) -> Result<Option<LinkRecord>, AppError> {
        if max_cache_age.is_zero() {
            return self.inner.get(slug, max_cache_age).await;
        }

        if let Some(link) = self.cache.get(slug, max_cache_age).await {
            return Ok(Some(link));
        }

        let link = self.inner.get(slug, max_cache_age).await?;

        match link {
            Some(ref link) => self.cache.set(slug, link).await,
            // Drop a stale entry for a link that no longer exists.
            None => self.cache.invalidate(slug).await,
        }

        Ok(link)
    }

    async fn health_check(&self) -> bool {
        self.inner.health_check().await
    }
}
