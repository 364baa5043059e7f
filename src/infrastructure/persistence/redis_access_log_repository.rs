//! Redis list implementation of the access log.

use crate::domain::entities::AccessEvent;
use crate::domain::repositories::AccessLogRepository;
use crate::error::AppError;
use async_trait::async_trait;
use redis::{AsyncCommands, aio::ConnectionManager};
use serde_json::json;
use tracing::warn;

/// Appends access events as JSON to a Redis list, newest first.
///
/// When `max_entries` is non-zero the list is trimmed to that length in the
/// same atomic pipeline as the push.
pub struct RedisAccessLogRepository {
    conn: ConnectionManager,
    key: String,
    max_entries: usize,
}

impl RedisAccessLogRepository {
    pub fn new(conn: ConnectionManager, key: impl Into<String>, max_entries: usize) -> Self {
        Self {
            conn,
            key: key.into(),
            max_entries,
        }
    }
}

#[async_trait]
impl AccessLogRepository for RedisAccessLogRepository {
    async fn record(&self, event: AccessEvent) -> Result<(), AppError> {
        let payload = serde_json::to_string(&event).map_err(|e| {
            AppError::internal(
                "Failed to encode access event",
                json!({ "reason": e.to_string() }),
            )
        })?;

        let mut conn = self.conn.clone();
        let mut pipe = redis::pipe();
        pipe.atomic().lpush(&self.key, payload).ignore();
        if self.max_entries > 0 {
            pipe.ltrim(&self.key, 0, self.max_entries as isize - 1)
                .ignore();
        }

        pipe.query_async::<()>(&mut conn).await.map_err(|e| {
            warn!("Redis access log write failed: {}", e);
            AppError::unavailable(
                "Access log unavailable",
                json!({ "reason": e.to_string() }),
            )
        })
    }

    async fn health_check(&self) -> bool {
        let mut conn = self.conn.clone();
        conn.ping::<()>().await.is_ok()
    }
}
