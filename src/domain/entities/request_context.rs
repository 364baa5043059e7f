//! Per-request client metadata threaded through the redirect pipeline.

/// Client metadata extracted once from the request head.
///
/// Built by the HTTP layer (see [`crate::utils::client_info`]) and passed by
/// reference to the resolver, challenge and redirect components. Nothing in
/// here outlives the request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestContext {
    /// Raw query string of the request, without the leading `?`.
    pub query: Option<String>,
    pub client_ip: Option<String>,
    pub user_agent: Option<String>,
    pub referer: Option<String>,
    pub language: Option<String>,
    pub country: Option<String>,
}

impl RequestContext {
    /// Client address for the verification call, empty when unknown.
    pub fn remote_ip(&self) -> &str {
        self.client_ip.as_deref().unwrap_or("")
    }
}
