#![allow(dead_code)]

use async_trait::async_trait;
use axum::extract::ConnectInfo;
use axum::http::StatusCode;
use axum_test::TestServer;
use serde_json::json;
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tower::Layer;

use slug_redirect::application::services::{ChallengeService, LinkService, RedirectService};
use slug_redirect::domain::challenge::ChallengeVerifier;
use slug_redirect::domain::entities::{AccessEvent, LinkRecord};
use slug_redirect::domain::repositories::{AccessLogRepository, LinkRepository};
use slug_redirect::error::AppError;
use slug_redirect::routes::app_router;
use slug_redirect::state::AppState;
use slug_redirect::utils::slug::{DEFAULT_SLUG_PATTERN, SlugPolicy};

pub const PEER_ADDR: &str = "127.0.0.1:12345";
pub const SITE_KEY: &str = "test-site-key";
pub const VALID_TOKEN: &str = "valid-token";

/// Link store backed by a map, recording every key it is asked for.
#[derive(Default)]
pub struct StaticLinkRepository {
    links: HashMap<String, LinkRecord>,
    lookups: Mutex<Vec<String>>,
    failing: bool,
}

impl StaticLinkRepository {
    pub fn with_links(links: &[(&str, &str)]) -> Self {
        Self {
            links: links
                .iter()
                .map(|(slug, url)| (slug.to_string(), LinkRecord::new(*url)))
                .collect(),
            ..Default::default()
        }
    }

    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Default::default()
        }
    }

    pub fn lookups(&self) -> Vec<String> {
        self.lookups.lock().unwrap().clone()
    }
}

#[async_trait]
impl LinkRepository for StaticLinkRepository {
    async fn get(&self, slug: &str, _max_cache_age: Duration) -> Result<Option<LinkRecord>, AppError> {
        self.lookups.lock().unwrap().push(slug.to_string());

        if self.failing {
            return Err(AppError::internal("Link store unavailable", json!({})));
        }
        Ok(self.links.get(slug).cloned())
    }

    async fn health_check(&self) -> bool {
        !self.failing
    }
}

/// Access log keeping every event in memory.
#[derive(Default)]
pub struct RecordingAccessLog {
    events: Mutex<Vec<AccessEvent>>,
}

impl RecordingAccessLog {
    pub fn events(&self) -> Vec<AccessEvent> {
        self.events.lock().unwrap().clone()
    }
}

#[async_trait]
impl AccessLogRepository for RecordingAccessLog {
    async fn record(&self, event: AccessEvent) -> Result<(), AppError> {
        self.events.lock().unwrap().push(event);
        Ok(())
    }

    async fn health_check(&self) -> bool {
        true
    }
}

/// Access log that rejects every event.
pub struct FailingAccessLog;

#[async_trait]
impl AccessLogRepository for FailingAccessLog {
    async fn record(&self, _event: AccessEvent) -> Result<(), AppError> {
        Err(AppError::unavailable("Access log queue is full", json!({})))
    }

    async fn health_check(&self) -> bool {
        false
    }
}

/// Verifier accepting only [`VALID_TOKEN`], recording `(token, remote_ip)` calls.
#[derive(Default)]
pub struct StubVerifier {
    calls: Mutex<Vec<(String, String)>>,
    unreachable: bool,
}

impl StubVerifier {
    pub fn unreachable() -> Self {
        Self {
            unreachable: true,
            ..Default::default()
        }
    }

    pub fn calls(&self) -> Vec<(String, String)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChallengeVerifier for StubVerifier {
    async fn verify(&self, token: &str, remote_ip: &str) -> Result<bool, AppError> {
        self.calls
            .lock()
            .unwrap()
            .push((token.to_string(), remote_ip.to_string()));

        if self.unreachable {
            return Err(AppError::unavailable("siteverify timed out", json!({})));
        }
        Ok(token == VALID_TOKEN)
    }
}

/// Knobs for [`build_state`].
pub struct TestOptions {
    pub home_url: Option<String>,
    pub case_sensitive: bool,
    pub forward_query: bool,
    pub status_code: StatusCode,
    pub reserved: Vec<&'static str>,
    pub verifier: Option<Arc<StubVerifier>>,
    pub behind_proxy: bool,
}

impl Default for TestOptions {
    fn default() -> Self {
        Self {
            home_url: None,
            case_sensitive: false,
            forward_query: false,
            status_code: StatusCode::MOVED_PERMANENTLY,
            reserved: vec!["dashboard"],
            verifier: None,
            behind_proxy: false,
        }
    }
}

pub fn build_state(
    links: Arc<dyn LinkRepository>,
    access_log: Arc<dyn AccessLogRepository>,
    options: TestOptions,
) -> AppState {
    let policy = SlugPolicy::new(options.reserved, DEFAULT_SLUG_PATTERN).unwrap();

    let challenge_service = match options.verifier {
        Some(verifier) => {
            let verifier: Arc<dyn ChallengeVerifier> = verifier;
            ChallengeService::new(Some(SITE_KEY.to_string()), Some(verifier))
        }
        None => ChallengeService::disabled(),
    };

    AppState {
        link_service: Arc::new(LinkService::new(
            links,
            policy,
            options.case_sensitive,
            Duration::from_secs(60),
        )),
        challenge_service: Arc::new(challenge_service),
        redirect_service: Arc::new(RedirectService::new(
            access_log,
            options.status_code,
            options.forward_query,
        )),
        home_url: options.home_url,
        behind_proxy: options.behind_proxy,
    }
}

/// Serves the full application router with a fixed peer address.
pub fn test_server(state: AppState) -> TestServer {
    let app = app_router(state).layer(MockConnectInfoLayer);
    TestServer::new(app).unwrap()
}

#[derive(Clone)]
pub struct MockConnectInfoLayer;

impl<S> Layer<S> for MockConnectInfoLayer {
    type Service = MockConnectInfoService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        MockConnectInfoService { inner }
    }
}

#[derive(Clone)]
pub struct MockConnectInfoService<S> {
    inner: S,
}

impl<S, B> tower::Service<axum::http::Request<B>> for MockConnectInfoService<S>
where
    S: tower::Service<axum::http::Request<B>> + Clone + Send + 'static,
    S::Future: Send + 'static,
    B: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = S::Future;

    fn poll_ready(
        &mut self,
        cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: axum::http::Request<B>) -> Self::Future {
        let addr: SocketAddr = PEER_ADDR.parse().unwrap();
        req.extensions_mut().insert(ConnectInfo(addr));
        self.inner.call(req)
    }
}
