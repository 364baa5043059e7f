//! Redis implementation of the link store.

use crate::domain::entities::LinkRecord;
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;
use async_trait::async_trait;
use redis::{AsyncCommands, aio::ConnectionManager};
use serde_json::json;
use std::time::Duration;
use tracing::{debug, error, warn};

/// Link store backed by Redis string keys.
///
/// Each link lives under `link:{slug}` as a JSON document. This repository
/// always reads from Redis; the freshness window is handled by
/// [`crate::infrastructure::cache::CachedLinkRepository`] wrapped around it.
pub struct RedisLinkRepository {
    conn: ConnectionManager,
}

impl RedisLinkRepository {
    pub fn new(conn: ConnectionManager) -> Self {
        Self { conn }
    }
}

#[async_trait]
impl LinkRepository for RedisLinkRepository {
    async fn get(
        &self,
        slug: &str,
        _max_cache_age: Duration,
    ) -> Result<Option<LinkRecord>, AppError> {
        let key = LinkRecord::storage_key(slug);
        let mut conn = self.conn.clone();

        let raw: Option<String> = conn.get(&key).await.map_err(|e| {
            error!("Redis GET error for {}: {}", key, e);
            AppError::internal("Link store unavailable", json!({ "key": key }))
        })?;

        let Some(raw) = raw else {
            debug!("Link store MISS: {}", key);
            return Ok(None);
        };

        match serde_json::from_str::<LinkRecord>(&raw) {
            Ok(link) => {
                debug!("Link store HIT: {} -> {}", key, link.url);
                Ok(Some(link))
            }
            Err(e) => {
                warn!("Ignoring undecodable link record at {}: {}", key, e);
                Ok(None)
            }
        }
    }

    async fn health_check(&self) -> bool {
        let mut conn = self.conn.clone();
        conn.ping::<()>().await.is_ok()
    }
}
