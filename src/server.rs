//! HTTP server initialization and runtime setup.
//!
//! Handles the Redis connection, link cache, access log worker, challenge
//! verifier and Axum server lifecycle.

use crate::api::middleware::rate_limit;
use crate::application::services::{ChallengeService, LinkService, RedirectService};
use crate::config::{AccessLogBackend, Config};
use crate::domain::access_worker::run_access_log_worker;
use crate::domain::challenge::ChallengeVerifier;
use crate::domain::repositories::{AccessLogRepository, LinkRepository};
use crate::infrastructure::access_log::{QueuedAccessLog, TracingAccessLog};
use crate::infrastructure::cache::{CacheService, CachedLinkRepository, MemoryCache, NullCache};
use crate::infrastructure::challenge::TurnstileVerifier;
use crate::infrastructure::persistence::{self, RedisAccessLogRepository, RedisLinkRepository};
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::{Context, Result};
use axum::Router;
use redis::aio::ConnectionManager;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

/// How long pending access events may take to drain on shutdown.
const DRAIN_TIMEOUT: Duration = Duration::from_secs(5);

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - Redis connection
/// - Link cache (or NullCache when `LINK_CACHE_TTL=0`)
/// - Background access log worker
/// - Turnstile verifier, when both keys are configured
/// - Axum HTTP server with per-IP rate limiting
///
/// # Errors
///
/// Returns an error if:
/// - Redis connection fails
/// - The verifier HTTP client cannot be built
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let conn = persistence::connect(&config.redis_url).await?;

    let link_repository = build_link_repository(&config, conn.clone());

    let (access_tx, access_rx) = mpsc::channel(config.access_log_queue_capacity);
    let backend: Arc<dyn AccessLogRepository> = match config.access_log_backend {
        AccessLogBackend::Redis => Arc::new(RedisAccessLogRepository::new(
            conn,
            config.access_log_key.clone(),
            config.access_log_max_entries,
        )),
        AccessLogBackend::Tracing => Arc::new(TracingAccessLog),
    };
    let worker = tokio::spawn(run_access_log_worker(access_rx, backend));
    tracing::info!("Access log worker started ({:?})", config.access_log_backend);

    let challenge_service = build_challenge_service(&config)?;

    let state = AppState {
        link_service: Arc::new(LinkService::new(
            link_repository,
            config.slug_policy()?,
            config.case_sensitive,
            config.link_cache_ttl(),
        )),
        challenge_service: Arc::new(challenge_service),
        redirect_service: Arc::new(RedirectService::new(
            Arc::new(QueuedAccessLog::new(access_tx)),
            config.redirect_status()?,
            config.redirect_with_query,
        )),
        home_url: config.home_url.clone(),
        behind_proxy: config.behind_proxy,
    };

    let app = with_rate_limit(app_router(state), &config);

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    // The router (and with it every queue sender) is gone; let the worker drain.
    match tokio::time::timeout(DRAIN_TIMEOUT, worker).await {
        Ok(_) => tracing::info!("Access log drained"),
        Err(_) => tracing::warn!("Access log drain timed out, pending events dropped"),
    }

    tracing::info!("HTTP server stopped");
    Ok(())
}

fn build_link_repository(config: &Config, conn: ConnectionManager) -> Arc<dyn LinkRepository> {
    let store: Arc<dyn LinkRepository> = Arc::new(RedisLinkRepository::new(conn));

    let cache: Arc<dyn CacheService> = if config.link_cache_ttl_seconds == 0 {
        tracing::info!("Link cache disabled (NullCache)");
        Arc::new(NullCache::new())
    } else {
        tracing::info!(
            "Link cache enabled (in-memory, capacity {})",
            config.link_cache_capacity
        );
        Arc::new(MemoryCache::new(
            config.link_cache_capacity,
            config.link_cache_ttl(),
        ))
    };

    Arc::new(CachedLinkRepository::new(store, cache))
}

fn build_challenge_service(config: &Config) -> Result<ChallengeService> {
    if !config.is_challenge_enabled() {
        tracing::info!("Turnstile challenge disabled");
        return Ok(ChallengeService::disabled());
    }

    let (Some(secret), Some(site_key)) = (
        config.turnstile_secret_key.as_deref(),
        config.turnstile_site_key.clone(),
    ) else {
        return Ok(ChallengeService::disabled());
    };

    let verifier: Arc<dyn ChallengeVerifier> = Arc::new(
        TurnstileVerifier::new(
            config.turnstile_verify_url.clone(),
            secret,
            config.verify_timeout(),
        )
        .context("Failed to build Turnstile HTTP client")?,
    );

    tracing::info!("Turnstile challenge enabled");
    Ok(ChallengeService::new(Some(site_key), Some(verifier)))
}

fn with_rate_limit(app: Router, config: &Config) -> Router {
    let (per_second, burst) = (config.rate_limit_per_second, config.rate_limit_burst);

    if config.behind_proxy {
        if let Some(layer) = rate_limit::proxy_layer(per_second, burst) {
            return app.layer(layer);
        }
    } else if let Some(layer) = rate_limit::layer(per_second, burst) {
        return app.layer(layer);
    }

    tracing::warn!("Rate limiting disabled");
    app
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
