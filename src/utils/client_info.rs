//! Client metadata extraction from HTTP request parts.

use axum::extract::ConnectInfo;
use axum::http::{HeaderMap, header, request::Parts};
use std::net::SocketAddr;

use crate::domain::entities::RequestContext;

const CF_CONNECTING_IP: &str = "cf-connecting-ip";
const CF_IPCOUNTRY: &str = "cf-ipcountry";
const X_FORWARDED_FOR: &str = "x-forwarded-for";
const X_REAL_IP: &str = "x-real-ip";

/// Builds the [`RequestContext`] for a request.
///
/// `behind_proxy` controls whether `X-Forwarded-For` / `X-Real-IP` are
/// trusted; see [`client_ip`].
pub fn request_context(parts: &Parts, behind_proxy: bool) -> RequestContext {
    let peer = parts
        .extensions
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| *addr);

    RequestContext {
        query: parts.uri.query().map(str::to_string),
        client_ip: client_ip(&parts.headers, peer, behind_proxy),
        user_agent: header_value(&parts.headers, header::USER_AGENT.as_str()),
        referer: header_value(&parts.headers, header::REFERER.as_str()),
        language: header_value(&parts.headers, header::ACCEPT_LANGUAGE.as_str()),
        country: header_value(&parts.headers, CF_IPCOUNTRY),
    }
}

/// Resolves the originating client address.
///
/// Priority:
/// 1. `CF-Connecting-IP`
/// 2. First entry of `X-Forwarded-For` (only when `behind_proxy`)
/// 3. `X-Real-IP` (only when `behind_proxy`)
/// 4. Socket peer address
pub fn client_ip(
    headers: &HeaderMap,
    peer: Option<SocketAddr>,
    behind_proxy: bool,
) -> Option<String> {
    if let Some(ip) = header_value(headers, CF_CONNECTING_IP) {
        return Some(ip);
    }

    if behind_proxy {
        let forwarded = header_value(headers, X_FORWARDED_FOR).and_then(|v| {
            v.split(',')
                .map(str::trim)
                .find(|s| !s.is_empty())
                .map(str::to_string)
        });
        if let Some(ip) = forwarded.or_else(|| header_value(headers, X_REAL_IP)) {
            return Some(ip);
        }
    }

    peer.map(|addr| addr.ip().to_string())
}

fn header_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{HeaderValue, Request};

    fn peer() -> Option<SocketAddr> {
        Some("10.0.0.5:40000".parse().unwrap())
    }

    #[test]
    fn test_cf_connecting_ip_wins() {
        let mut headers = HeaderMap::new();
        headers.insert(CF_CONNECTING_IP, HeaderValue::from_static("203.0.113.7"));
        headers.insert(X_FORWARDED_FOR, HeaderValue::from_static("198.51.100.1"));

        assert_eq!(
            client_ip(&headers, peer(), true),
            Some("203.0.113.7".to_string())
        );
    }

    #[test]
    fn test_forwarded_for_ignored_without_proxy() {
        let mut headers = HeaderMap::new();
        headers.insert(X_FORWARDED_FOR, HeaderValue::from_static("198.51.100.1"));

        assert_eq!(
            client_ip(&headers, peer(), false),
            Some("10.0.0.5".to_string())
        );
    }

    #[test]
    fn test_forwarded_for_first_entry_behind_proxy() {
        let mut headers = HeaderMap::new();
        headers.insert(
            X_FORWARDED_FOR,
            HeaderValue::from_static(" 198.51.100.1 , 10.0.0.1"),
        );

        assert_eq!(
            client_ip(&headers, peer(), true),
            Some("198.51.100.1".to_string())
        );
    }

    #[test]
    fn test_real_ip_fallback_behind_proxy() {
        let mut headers = HeaderMap::new();
        headers.insert(X_REAL_IP, HeaderValue::from_static("198.51.100.2"));

        assert_eq!(
            client_ip(&headers, None, true),
            Some("198.51.100.2".to_string())
        );
    }

    #[test]
    fn test_no_source_available() {
        assert_eq!(client_ip(&HeaderMap::new(), None, false), None);
    }

    #[test]
    fn test_request_context_from_parts() {
        let request = Request::builder()
            .uri("/docs?utm=1")
            .header("user-agent", "Mozilla/5.0")
            .header("referer", "https://google.com")
            .header("accept-language", "de-DE")
            .header(CF_IPCOUNTRY, "DE")
            .body(())
            .unwrap();
        let (mut parts, _) = request.into_parts();
        parts
            .extensions
            .insert(ConnectInfo::<SocketAddr>("127.0.0.1:12345".parse().unwrap()));

        let ctx = request_context(&parts, false);

        assert_eq!(ctx.query.as_deref(), Some("utm=1"));
        assert_eq!(ctx.client_ip.as_deref(), Some("127.0.0.1"));
        assert_eq!(ctx.user_agent.as_deref(), Some("Mozilla/5.0"));
        assert_eq!(ctx.referer.as_deref(), Some("https://google.com"));
        assert_eq!(ctx.language.as_deref(), Some("de-DE"));
        assert_eq!(ctx.country.as_deref(), Some("DE"));
    }
}
