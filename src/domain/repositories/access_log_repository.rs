//! Repository trait for the append-only access log.

use crate::domain::entities::AccessEvent;
use crate::error::AppError;
use async_trait::async_trait;

/// Append-only recorder of redirect events.
///
/// Callers on the request path treat a failed `record` as advisory: it is
/// logged and dropped, and never changes the response.
///
/// # Implementations
///
/// - [`crate::infrastructure::access_log::QueuedAccessLog`] - Bounded queue in
///   front of a background worker (used by the HTTP handler)
/// - [`crate::infrastructure::persistence::RedisAccessLogRepository`] - Redis list
/// - [`crate::infrastructure::access_log::TracingAccessLog`] - Structured log line
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccessLogRepository: Send + Sync {
    /// Appends one event.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unavailable`] if the event could not be accepted.
    async fn record(&self, event: AccessEvent) -> Result<(), AppError>;

    /// Checks if the sink is accepting events.
    async fn health_check(&self) -> bool;
}
