//! Access event model for the redirect access log.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{LinkRecord, RequestContext};

/// A single redirect, as written to the access log.
///
/// Created by [`crate::application::services::RedirectService`] right before
/// the redirect is emitted, then handed to the access log sink. Link metadata
/// is copied verbatim; this crate never looks inside it.
///
/// # Usage Flow
///
/// 1. Built from the resolved link and the [`RequestContext`]
/// 2. Pushed onto the access log queue (non-blocking)
/// 3. Persisted by [`crate::domain::access_worker::run_access_log_worker`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccessEvent {
    pub slug: String,
    pub url: String,
    pub ip: Option<String>,
    pub user_agent: Option<String>,
    pub referer: Option<String>,
    pub language: Option<String>,
    pub country: Option<String>,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub metadata: Map<String, Value>,
}

impl AccessEvent {
    /// Creates an event for a redirect of `slug` to `link`.
    pub fn new(slug: &str, link: &LinkRecord, ctx: &RequestContext) -> Self {
        Self {
            slug: slug.to_string(),
            url: link.url.clone(),
            ip: ctx.client_ip.clone(),
            user_agent: ctx.user_agent.clone(),
            referer: ctx.referer.clone(),
            language: ctx.language.clone(),
            country: ctx.country.clone(),
            created_at: Utc::now(),
            metadata: link.metadata.clone(),
        }
    }
}
