//! Background worker draining the access log queue.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio_retry::Retry;
use tokio_retry::strategy::{ExponentialBackoff, jitter};
use tracing::{debug, error, info};

use crate::domain::entities::AccessEvent;
use crate::domain::repositories::AccessLogRepository;

/// Retries after the first attempt; three attempts in total.
const MAX_RETRIES: usize = 2;

/// Consumes queued access events and appends them to `backend`.
///
/// Each event is attempted up to three times with jittered exponential
/// backoff (50ms, 100ms). Events that still fail are logged and dropped.
/// Returns when every sender has been dropped and the queue is empty.
pub async fn run_access_log_worker(
    mut rx: mpsc::Receiver<AccessEvent>,
    backend: Arc<dyn AccessLogRepository>,
) {
    while let Some(event) = rx.recv().await {
        let strategy = ExponentialBackoff::from_millis(2)
            .factor(25)
            .map(jitter)
            .take(MAX_RETRIES);

        let slug = event.slug.clone();
        let result = Retry::spawn(strategy, || {
            let backend = backend.clone();
            let event = event.clone();
            async move { backend.record(event).await }
        })
        .await;

        match result {
            Ok(()) => debug!("Access event recorded for {}", slug),
            Err(e) => {
                metrics::counter!("access_log_dropped_total", "reason" => "backend").increment(1);
                error!("Failed to record access event for {}: {}", slug, e);
            }
        }
    }

    info!("Access log worker stopped");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{LinkRecord, RequestContext};
    use crate::domain::repositories::MockAccessLogRepository;
    use crate::error::AppError;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn event(slug: &str) -> AccessEvent {
        AccessEvent::new(
            slug,
            &LinkRecord::new("https://example.com"),
            &RequestContext::default(),
        )
    }

    #[tokio::test]
    async fn test_worker_records_every_event() {
        let mut backend = MockAccessLogRepository::new();
        backend.expect_record().times(2).returning(|_| Ok(()));

        let (tx, rx) = mpsc::channel(8);
        tx.send(event("a")).await.unwrap();
        tx.send(event("b")).await.unwrap();
        drop(tx);

        run_access_log_worker(rx, Arc::new(backend)).await;
    }

    #[tokio::test]
    async fn test_worker_retries_transient_failures() {
        let attempts = Arc::new(AtomicUsize::new(0));
        let counter = attempts.clone();

        let mut backend = MockAccessLogRepository::new();
        backend.expect_record().times(3).returning(move |_| {
            if counter.fetch_add(1, Ordering::SeqCst) < 2 {
                Err(AppError::unavailable("redis down", json!({})))
            } else {
                Ok(())
            }
        });

        let (tx, rx) = mpsc::channel(8);
        tx.send(event("retry")).await.unwrap();
        drop(tx);

        run_access_log_worker(rx, Arc::new(backend)).await;

        assert_eq!(attempts.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_worker_gives_up_after_three_attempts() {
        let mut backend = MockAccessLogRepository::new();
        backend
            .expect_record()
            .times(3)
            .returning(|_| Err(AppError::unavailable("redis down", json!({}))));

        let (tx, rx) = mpsc::channel(8);
        tx.send(event("lost")).await.unwrap();
        drop(tx);

        run_access_log_worker(rx, Arc::new(backend)).await;
    }
}
