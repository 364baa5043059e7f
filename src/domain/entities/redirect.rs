//! Final output of the redirect pipeline.

use axum::{
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};

/// A redirect ready to be sent to the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedirectDecision {
    pub target_url: String,
    pub status_code: StatusCode,
    /// Whether the request's query string was merged into `target_url`.
    pub query_forwarded: bool,
}

impl IntoResponse for RedirectDecision {
    fn into_response(self) -> Response {
        (self.status_code, [(header::LOCATION, self.target_url)]).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_into_response_sets_location() {
        let decision = RedirectDecision {
            target_url: "https://example.com/".to_string(),
            status_code: StatusCode::PERMANENT_REDIRECT,
            query_forwarded: false,
        };

        let response = decision.into_response();

        assert_eq!(response.status(), StatusCode::PERMANENT_REDIRECT);
        assert_eq!(
            response.headers().get(header::LOCATION).unwrap(),
            "https://example.com/"
        );
    }
}
