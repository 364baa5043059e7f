//! Redis-backed implementations of the domain repositories.
//!
//! All repositories share one [`ConnectionManager`], which reconnects on its
//! own and is cheap to clone per call.

mod redis_access_log_repository;
mod redis_link_repository;

pub use redis_access_log_repository::RedisAccessLogRepository;
pub use redis_link_repository::RedisLinkRepository;

use anyhow::{Context, Result};
use redis::{AsyncCommands, Client, aio::ConnectionManager};
use tracing::info;

/// Connects to Redis and validates the connection with a PING.
///
/// # Errors
///
/// Returns an error if the URL is invalid, the connection cannot be
/// established, or the PING fails.
pub async fn connect(redis_url: &str) -> Result<ConnectionManager> {
    let client = Client::open(redis_url).context("Failed to create Redis client")?;

    let manager = ConnectionManager::new(client)
        .await
        .context("Failed to connect to Redis")?;

    let mut test_conn = manager.clone();
    test_conn
        .ping::<()>()
        .await
        .context("Redis PING failed")?;

    info!("Connected to Redis");
    Ok(manager)
}
