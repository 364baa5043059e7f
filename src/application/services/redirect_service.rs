//! Redirect emission with best-effort access logging.

use std::sync::Arc;

use axum::http::StatusCode;
use tracing::warn;

use crate::domain::entities::{AccessEvent, LinkRecord, RedirectDecision, RequestContext};
use crate::domain::repositories::AccessLogRepository;
use crate::utils::query::with_query;

/// Single exit point for every successful resolution, gated or not.
pub struct RedirectService {
    access_log: Arc<dyn AccessLogRepository>,
    status_code: StatusCode,
    forward_query: bool,
}

impl RedirectService {
    /// Creates a new redirect service.
    ///
    /// - `status_code` - redirect status sent to clients (301, 302, 303, 307 or 308)
    /// - `forward_query` - merge the request query string into the target
    pub fn new(
        access_log: Arc<dyn AccessLogRepository>,
        status_code: StatusCode,
        forward_query: bool,
    ) -> Self {
        Self {
            access_log,
            status_code,
            forward_query,
        }
    }

    /// Records the access and builds the redirect for `link`.
    ///
    /// A failing access log is logged and ignored; the returned decision is
    /// the same whether or not the event was recorded.
    pub async fn emit(
        &self,
        slug: &str,
        link: &LinkRecord,
        ctx: &RequestContext,
    ) -> RedirectDecision {
        if let Err(e) = self
            .access_log
            .record(AccessEvent::new(slug, link, ctx))
            .await
        {
            warn!("Failed to write access log for {}: {}", slug, e);
        }

        let (target_url, query_forwarded) = match ctx.query.as_deref() {
            Some(query) if self.forward_query && !query.is_empty() => {
                (with_query(&link.url, query), true)
            }
            _ => (link.url.clone(), false),
        };

        RedirectDecision {
            target_url,
            status_code: self.status_code,
            query_forwarded,
        }
    }

    /// Checks if the access log is accepting events.
    pub async fn access_log_healthy(&self) -> bool {
        self.access_log.health_check().await
    }
}
