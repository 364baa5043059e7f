//! Cloudflare Turnstile siteverify client.

use crate::domain::challenge::ChallengeVerifier;
use crate::error::AppError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::time::Duration;
use tracing::{debug, warn};

/// Public Turnstile verification endpoint.
pub const SITEVERIFY_URL: &str = "https://challenges.cloudflare.com/turnstile/v0/siteverify";

#[derive(Serialize)]
struct SiteverifyRequest<'a> {
    secret: &'a str,
    response: &'a str,
    remoteip: &'a str,
}

#[derive(Deserialize)]
struct SiteverifyResponse {
    success: bool,
    #[serde(default, rename = "error-codes")]
    error_codes: Vec<String>,
}

/// Verifies Turnstile tokens against a siteverify endpoint.
///
/// Every call is bounded by the client timeout; redirects from the endpoint
/// are not followed.
pub struct TurnstileVerifier {
    client: reqwest::Client,
    endpoint: String,
    secret: String,
}

impl TurnstileVerifier {
    /// Creates a verifier for `endpoint` using `secret`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(
        endpoint: impl Into<String>,
        secret: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .redirect(reqwest::redirect::Policy::none())
            .build()?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
            secret: secret.into(),
        })
    }
}

#[async_trait]
impl ChallengeVerifier for TurnstileVerifier {
    async fn verify(&self, token: &str, remote_ip: &str) -> Result<bool, AppError> {
        let body = SiteverifyRequest {
            secret: &self.secret,
            response: token,
            remoteip: remote_ip,
        };

        let response = self
            .client
            .post(&self.endpoint)
            .json(&body)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| {
                warn!("Turnstile siteverify request failed: {}", e);
                AppError::unavailable(
                    "Verification service unavailable",
                    json!({ "reason": e.to_string() }),
                )
            })?;

        let result: SiteverifyResponse = response.json().await.map_err(|e| {
            warn!("Turnstile siteverify returned an unreadable body: {}", e);
            AppError::unavailable(
                "Verification service unavailable",
                json!({ "reason": e.to_string() }),
            )
        })?;

        if !result.success {
            debug!("Turnstile rejected token: {:?}", result.error_codes);
        }

        Ok(result.success)
    }
}
