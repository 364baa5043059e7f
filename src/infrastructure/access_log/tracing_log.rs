//! Access log backend that writes structured log lines.

use crate::domain::entities::AccessEvent;
use crate::domain::repositories::AccessLogRepository;
use crate::error::AppError;
use async_trait::async_trait;

/// Emits each access event as an `INFO` event on the `access_log` target.
///
/// Selected with `ACCESS_LOG_BACKEND=tracing`; pairs well with
/// `LOG_FORMAT=json` when logs are shipped elsewhere.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingAccessLog;

#[async_trait]
impl AccessLogRepository for TracingAccessLog {
    async fn record(&self, event: AccessEvent) -> Result<(), AppError> {
        tracing::info!(
            target: "access_log",
            slug = %event.slug,
            url = %event.url,
            ip = event.ip.as_deref().unwrap_or("-"),
            user_agent = event.user_agent.as_deref().unwrap_or("-"),
            referer = event.referer.as_deref().unwrap_or("-"),
            language = event.language.as_deref().unwrap_or("-"),
            country = event.country.as_deref().unwrap_or("-"),
            created_at = %event.created_at.to_rfc3339(),
            "redirect"
        );
        Ok(())
    }

    async fn health_check(&self) -> bool {
        true
    }
}
