//! Challenge gate and token verification.

use std::sync::Arc;

use serde_json::json;
use tracing::{debug, warn};

use crate::domain::challenge::ChallengeVerifier;
use crate::error::AppError;

/// Message returned to clients whose verification did not pass.
pub const VERIFICATION_FAILED: &str = "Verification failed";

/// Returns true only if both halves of the challenge are configured.
///
/// Empty strings count as not configured.
pub fn challenge_required(secret: Option<&str>, site_key: Option<&str>) -> bool {
    secret.is_some_and(|s| !s.is_empty()) && site_key.is_some_and(|k| !k.is_empty())
}

struct Gate {
    site_key: String,
    verifier: Arc<dyn ChallengeVerifier>,
}

/// Decides whether redirects are gated and verifies submitted tokens.
///
/// Holds no per-client state: the interstitial leg and the verify leg of a
/// challenge are two unrelated requests as far as the server is concerned.
pub struct ChallengeService {
    gate: Option<Gate>,
}

impl ChallengeService {
    /// Creates a service that gates redirects only when both a site key and a
    /// verifier (which owns the secret) are present.
    pub fn new(site_key: Option<String>, verifier: Option<Arc<dyn ChallengeVerifier>>) -> Self {
        let gate = match (site_key, verifier) {
            (Some(site_key), Some(verifier)) if !site_key.is_empty() => {
                Some(Gate { site_key, verifier })
            }
            _ => None,
        };
        Self { gate }
    }

    /// A service that never gates.
    pub fn disabled() -> Self {
        Self { gate: None }
    }

    pub fn is_required(&self) -> bool {
        self.gate.is_some()
    }

    /// Site key to embed in the interstitial, when gating is active.
    pub fn site_key(&self) -> Option<&str> {
        self.gate.as_ref().map(|g| g.site_key.as_str())
    }

    /// Verifies a token submitted on the follow-up request.
    ///
    /// Passes trivially when gating is off.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Forbidden`] if the token is missing, the service
    /// rejects it, or the service cannot be reached.
    pub async fn verify(&self, token: Option<&str>, remote_ip: &str) -> Result<(), AppError> {
        let Some(gate) = &self.gate else {
            return Ok(());
        };

        let Some(token) = token.filter(|t| !t.is_empty()) else {
            debug!("Verification request without token");
            metrics::counter!("challenge_verifications_total", "result" => "missing_token")
                .increment(1);
            return Err(forbidden());
        };

        match gate.verifier.verify(token, remote_ip).await {
            Ok(true) => {
                metrics::counter!("challenge_verifications_total", "result" => "passed")
                    .increment(1);
                Ok(())
            }
            Ok(false) => {
                warn!("Challenge token rejected for {:?}", remote_ip);
                metrics::counter!("challenge_verifications_total", "result" => "rejected")
                    .increment(1);
                Err(forbidden())
            }
            Err(e) => {
                warn!("Challenge verification errored, treating as failure: {}", e);
                metrics::counter!("challenge_verifications_total", "result" => "error")
                    .increment(1);
                Err(forbidden())
            }
        }
    }
}

fn forbidden() -> AppError {
    AppError::forbidden(VERIFICATION_FAILED, json!({}))
}
