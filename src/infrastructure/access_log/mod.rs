//! Access log front end and non-Redis backend.

mod queued;
mod tracing_log;

pub use queued::QueuedAccessLog;
pub use tracing_log::TracingAccessLog;
