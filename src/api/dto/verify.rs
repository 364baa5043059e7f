//! Challenge token submitted by the interstitial page.

use serde::Deserialize;
use serde_with::{NoneAsEmptyString, serde_as};
use validator::Validate;

/// Longest token accepted for verification.
pub const MAX_TOKEN_LENGTH: u64 = 2048;

/// Body of the follow-up `POST`: `{"token": "..."}`.
///
/// A missing, `null` or empty token all deserialize to `None`.
#[serde_as]
#[derive(Debug, Default, Deserialize, Validate)]
pub struct VerifyRequest {
    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    #[validate(length(min = 1, max = MAX_TOKEN_LENGTH))]
    pub token: Option<String>,
}

impl VerifyRequest {
    /// Parses a raw request body.
    ///
    /// Bodies that are not valid JSON yield an empty request, which the
    /// challenge then rejects as missing a token.
    pub fn from_body(body: &[u8]) -> Self {
        serde_json::from_slice(body).unwrap_or_else(|e| {
            tracing::debug!("Unparseable verification body: {}", e);
            Self::default()
        })
    }
}
