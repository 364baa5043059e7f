//! Per-client rate limiting using the token bucket algorithm.

use governor::clock::QuantaInstant;
use governor::middleware::NoOpMiddleware;
use std::sync::Arc;
use std::time::Duration;
use tower_governor::{
    GovernorLayer,
    governor::{GovernorConfig, GovernorConfigBuilder},
    key_extractor::{KeyExtractor, PeerIpKeyExtractor, SmartIpKeyExtractor},
};

/// How often stale per-client buckets are dropped.
const CLEANUP_INTERVAL: Duration = Duration::from_secs(60);

pub type RateLimitLayer<K> = GovernorLayer<K, NoOpMiddleware<QuantaInstant>, axum::body::Body>;

/// Creates a rate limiter keyed on the socket peer address.
///
/// # Limits
///
/// - **Rate**: `per_second` tokens replenished per second
/// - **Burst**: `burst` requests
///
/// Requests exceeding the limit receive `429 Too Many Requests`.
///
/// Returns `None` if either limit is zero.
pub fn layer(per_second: u64, burst: u32) -> Option<RateLimitLayer<PeerIpKeyExtractor>> {
    build(PeerIpKeyExtractor, per_second, burst)
}

/// Creates a rate limiter for deployments behind a reverse proxy.
///
/// The client key is taken from `X-Forwarded-For`, `X-Real-IP` or `Forwarded`
/// before falling back to the peer address. Only use this when the proxy
/// overwrites those headers.
pub fn proxy_layer(per_second: u64, burst: u32) -> Option<RateLimitLayer<SmartIpKeyExtractor>> {
    build(SmartIpKeyExtractor, per_second, burst)
}

fn build<K>(key_extractor: K, per_second: u64, burst: u32) -> Option<RateLimitLayer<K>>
where
    K: KeyExtractor + Send + Sync + 'static,
    K::Key: Send + Sync + 'static,
{
    if per_second == 0 {
        return None;
    }

    let governor_conf = Arc::new(
        GovernorConfigBuilder::default()
            .per_millisecond(replenish_interval_ms(per_second))
            .burst_size(burst)
            .key_extractor(key_extractor)
            .finish()?,
    );

    spawn_cleanup(&governor_conf);

    Some(GovernorLayer::new(governor_conf))
}

/// Milliseconds between two replenished tokens for a given per-second rate.
fn replenish_interval_ms(per_second: u64) -> u64 {
    (1000 / per_second).max(1)
}

fn spawn_cleanup<K>(conf: &Arc<GovernorConfig<K, NoOpMiddleware<QuantaInstant>>>)
where
    K: KeyExtractor + Send + Sync + 'static,
    K::Key: Send + Sync + 'static,
{
    let limiter = conf.limiter().clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(CLEANUP_INTERVAL);
        loop {
            interval.tick().await;
            limiter.retain_recent();
            tracing::debug!("Rate limiter tracking {} clients", limiter.len());
        }
    });
}
