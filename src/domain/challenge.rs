//! Bot-verification contract.

use crate::error::AppError;
use async_trait::async_trait;

/// Remote verifier for client-side challenge tokens.
///
/// The implementation owns the server-side secret; callers only supply what
/// the client sent.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ChallengeVerifier: Send + Sync {
    /// Asks the verification service whether `token` is valid for `remote_ip`.
    ///
    /// `remote_ip` is best-effort and may be empty.
    ///
    /// # Returns
    ///
    /// - `Ok(true)` if the service accepted the token
    /// - `Ok(false)` if it rejected it
    ///
    /// # Errors
    ///
    /// Returns an error if the service is unreachable or answers with
    /// something other than a verification result.
    async fn verify(&self, token: &str, remote_ip: &str) -> Result<bool, AppError>;
}
