//! Handler for slug redirects, including the challenge interstitial.

use axum::{
    body::{self, Body},
    extract::{Request, State},
    http::{Method, StatusCode, header, request::Parts},
    response::{IntoResponse, Response},
};
use serde_json::json;
use tracing::debug;
use validator::Validate;

use crate::api::dto::verify::VerifyRequest;
use crate::domain::entities::{LinkRecord, RedirectDecision, RequestContext};
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::client_info::request_context;
use crate::utils::slug::normalize_path;
use crate::web::InterstitialTemplate;

/// Largest verification body read before giving up on it.
pub const MAX_VERIFY_BODY_BYTES: usize = 16 * 1024;

/// Resolves the request path to a link and redirects to it.
///
/// Mounted as the router fallback, so it sees every path not claimed by
/// another route.
///
/// # Request Flow
///
/// 1. `/` redirects to the home URL (302) when one is configured
/// 2. The target is reduced to a slug and checked against the admission policy
/// 3. The slug is resolved (lowercase first unless case sensitive)
/// 4. Without a challenge the redirect is emitted immediately
/// 5. With a challenge, `POST` verifies the submitted token and redirects;
///    any other method receives the interstitial page
///
/// # Errors
///
/// - 404 Not Found if the slug is rejected or has no link
/// - 403 Forbidden if challenge verification fails
/// - 500 Internal Server Error if the link store fails
pub async fn redirect_handler(
    State(state): State<AppState>,
    req: Request,
) -> Result<Response, AppError> {
    let (parts, body) = req.into_parts();
    let target = parts
        .uri
        .path_and_query()
        .map(|pq| pq.as_str())
        .unwrap_or("/");

    if target == "/"
        && let Some(home_url) = &state.home_url
    {
        debug!("Root request, redirecting to home URL");
        return Ok(RedirectDecision {
            target_url: home_url.clone(),
            status_code: StatusCode::FOUND,
            query_forwarded: false,
        }
        .into_response());
    }

    let slug = normalize_path(target);

    let link = state
        .link_service
        .find_link(&slug)
        .await?
        .ok_or_else(|| AppError::not_found("Link not found", json!({ "slug": slug })))?;

    let ctx = request_context(&parts, state.behind_proxy);

    let Some(site_key) = state.challenge_service.site_key() else {
        return Ok(emit(&state, &slug, &link, &ctx, false).await);
    };

    if parts.method != Method::POST {
        debug!("Serving challenge interstitial for {}", slug);
        return Ok((
            [(header::CACHE_CONTROL, "no-store")],
            InterstitialTemplate { site_key },
        )
            .into_response());
    }

    let request = read_verify_request(&parts, body).await;
    state
        .challenge_service
        .verify(request.token.as_deref(), ctx.remote_ip())
        .await?;

    Ok(emit(&state, &slug, &link, &ctx, true).await)
}

async fn emit(
    state: &AppState,
    slug: &str,
    link: &LinkRecord,
    ctx: &RequestContext,
    gated: bool,
) -> Response {
    let decision = state.redirect_service.emit(slug, link, ctx).await;

    metrics::counter!("redirects_total", "gated" => if gated { "true" } else { "false" })
        .increment(1);
    debug!(
        "Redirecting {} to {} ({})",
        slug,
        decision.target_url,
        decision.status_code.as_u16()
    );

    decision.into_response()
}

/// Reads the token submission; anything unusable becomes a request without
/// a token.
async fn read_verify_request(parts: &Parts, body: Body) -> VerifyRequest {
    let bytes = match body::to_bytes(body, MAX_VERIFY_BODY_BYTES).await {
        Ok(bytes) => bytes,
        Err(e) => {
            debug!("Discarding verification body for {}: {}", parts.uri.path(), e);
            return VerifyRequest::default();
        }
    };

    let request = VerifyRequest::from_body(&bytes);
    if let Err(e) = request.validate() {
        debug!("Verification body failed validation: {}", e);
        return VerifyRequest::default();
    }

    request
}
