//! Non-blocking access log front end.

use crate::domain::entities::AccessEvent;
use crate::domain::repositories::AccessLogRepository;
use crate::error::AppError;
use async_trait::async_trait;
use serde_json::json;
use tokio::sync::mpsc::{self, error::TrySendError};

/// Pushes events onto the bounded queue drained by
/// [`crate::domain::access_worker::run_access_log_worker`].
///
/// `record` never waits: a full or closed queue is reported as an error
/// right away.
#[derive(Clone)]
pub struct QueuedAccessLog {
    sender: mpsc::Sender<AccessEvent>,
}

impl QueuedAccessLog {
    pub fn new(sender: mpsc::Sender<AccessEvent>) -> Self {
        Self { sender }
    }
}

#[async_trait]
impl AccessLogRepository for QueuedAccessLog {
    async fn record(&self, event: AccessEvent) -> Result<(), AppError> {
        self.sender.try_send(event).map_err(|e| {
            let reason = match e {
                TrySendError::Full(_) => "queue full",
                TrySendError::Closed(_) => "queue closed",
            };
            metrics::counter!("access_log_dropped_total", "reason" => reason).increment(1);
            AppError::unavailable("Access log unavailable", json!({ "reason": reason }))
        })
    }

    async fn health_check(&self) -> bool {
        !self.sender.is_closed()
    }
}
