use axum::{Json, Router, http::StatusCode, routing::post};
use serde_json::{Value, json};
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use slug_redirect::domain::challenge::ChallengeVerifier;
use slug_redirect::error::AppError;
use slug_redirect::infrastructure::challenge::TurnstileVerifier;

type Received = Arc<Mutex<Vec<Value>>>;

/// Starts a local siteverify stand-in that accepts only the token `good`.
async fn spawn_siteverify(received: Received) -> SocketAddr {
    let app = Router::new()
        .route(
            "/siteverify",
            post(move |Json(body): Json<Value>| {
                let received = received.clone();
                async move {
                    let success = body["response"] == "good";
                    received.lock().unwrap().push(body);
                    if success {
                        Json(json!({ "success": true, "error-codes": [] }))
                    } else {
                        Json(json!({ "success": false, "error-codes": ["invalid-input-response"] }))
                    }
                }
            }),
        )
        .route(
            "/broken",
            post(|| async { (StatusCode::BAD_GATEWAY, "upstream down") }),
        )
        .route("/garbage", post(|| async { "not json" }))
        .route(
            "/slow",
            post(|| async {
                tokio::time::sleep(Duration::from_secs(2)).await;
                Json(json!({ "success": true }))
            }),
        );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

fn verifier(addr: SocketAddr, path: &str, timeout: Duration) -> TurnstileVerifier {
    TurnstileVerifier::new(format!("http://{addr}{path}"), "test-secret", timeout).unwrap()
}

#[tokio::test]
async fn test_accepted_token() {
    let received = Received::default();
    let addr = spawn_siteverify(received.clone()).await;

    let result = verifier(addr, "/siteverify", Duration::from_secs(5))
        .verify("good", "203.0.113.7")
        .await
        .unwrap();

    assert!(result);

    let bodies = received.lock().unwrap();
    assert_eq!(bodies.len(), 1);
    assert_eq!(bodies[0]["secret"], "test-secret");
    assert_eq!(bodies[0]["response"], "good");
    assert_eq!(bodies[0]["remoteip"], "203.0.113.7");
}

#[tokio::test]
async fn test_rejected_token() {
    let addr = spawn_siteverify(Received::default()).await;

    let result = verifier(addr, "/siteverify", Duration::from_secs(5))
        .verify("forged", "")
        .await
        .unwrap();

    assert!(!result);
}

#[tokio::test]
async fn test_empty_remote_ip_is_sent() {
    let received = Received::default();
    let addr = spawn_siteverify(received.clone()).await;

    verifier(addr, "/siteverify", Duration::from_secs(5))
        .verify("good", "")
        .await
        .unwrap();

    assert_eq!(received.lock().unwrap()[0]["remoteip"], "");
}

#[tokio::test]
async fn test_upstream_error_status_is_unavailable() {
    let addr = spawn_siteverify(Received::default()).await;

    let result = verifier(addr, "/broken", Duration::from_secs(5))
        .verify("good", "")
        .await;

    assert!(matches!(result, Err(AppError::Unavailable { .. })));
}

#[tokio::test]
async fn test_unreadable_body_is_unavailable() {
    let addr = spawn_siteverify(Received::default()).await;

    let result = verifier(addr, "/garbage", Duration::from_secs(5))
        .verify("good", "")
        .await;

    assert!(matches!(result, Err(AppError::Unavailable { .. })));
}

#[tokio::test]
async fn test_timeout_is_unavailable() {
    let addr = spawn_siteverify(Received::default()).await;

    let result = verifier(addr, "/slow", Duration::from_millis(200))
        .verify("good", "")
        .await;

    assert!(matches!(result, Err(AppError::Unavailable { .. })));
}
