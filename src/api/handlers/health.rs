//! Handler for health check endpoint.

use axum::{Json, extract::State, http::StatusCode};

use crate::api::dto::health::{CheckStatus, HealthChecks, HealthResponse};
use crate::state::AppState;

/// Returns service health status with component checks.
///
/// # Endpoint
///
/// `GET /health`
///
/// # Response Codes
///
/// - **200 OK**: Link store and access log healthy
/// - **503 Service Unavailable**: One or more components degraded
///
/// # Components Checked
///
/// 1. **Link store**: Redis `PING`
/// 2. **Access log**: Event queue still open
/// 3. **Challenge**: Reported only, never degrades the service
///
/// # Response
///
/// ```json
/// {
///   "status": "healthy",
///   "version": "0.1.0",
///   "checks": {
///     "link_store": { "status": "ok", "message": "Redis connected" },
///     "access_log": { "status": "ok", "message": "Accepting events" },
///     "challenge": { "status": "ok", "message": "Disabled" }
///   }
/// }
/// ```
pub async fn health_handler(
    State(state): State<AppState>,
) -> Result<Json<HealthResponse>, (StatusCode, Json<HealthResponse>)> {
    let link_store = check_link_store(&state).await;
    let access_log = check_access_log(&state).await;
    let challenge = check_challenge(&state);

    let all_healthy = link_store.is_ok() && access_log.is_ok();

    let response = HealthResponse {
        status: if all_healthy { "healthy" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        checks: HealthChecks {
            link_store,
            access_log,
            challenge,
        },
    };

    if all_healthy {
        Ok(Json(response))
    } else {
        Err((StatusCode::SERVICE_UNAVAILABLE, Json(response)))
    }
}

async fn check_link_store(state: &AppState) -> CheckStatus {
    if state.link_service.health_check().await {
        CheckStatus::ok("Redis connected")
    } else {
        CheckStatus::error("Redis connection failed")
    }
}

async fn check_access_log(state: &AppState) -> CheckStatus {
    if state.redirect_service.access_log_healthy().await {
        CheckStatus::ok("Accepting events")
    } else {
        CheckStatus::error("Access log queue is closed")
    }
}

fn check_challenge(state: &AppState) -> CheckStatus {
    if state.challenge_service.is_required() {
        CheckStatus::ok("Turnstile enabled")
    } else {
        CheckStatus::ok("Disabled")
    }
}
