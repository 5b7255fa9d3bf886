//! Integration tests for the HTTP API surface.
//!
//! These boot the real router on an ephemeral loopback port and drive it with
//! reqwest. The 400 contract needs no network at all; the 500 pass-through
//! tests use a hostname under the reserved `.invalid` TLD so resolution fails
//! deterministically without reaching the outside world.

use std::net::SocketAddr;
use std::time::{Duration, Instant};

use cert_status::build_router;
use cert_status::initialization::init_crypto_provider;

const ENDPOINTS: [&str; 3] = ["/ssl-info", "/ssl-dates", "/ssl-chain"];

async fn spawn_app() -> SocketAddr {
    init_crypto_provider();
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test listener");
    let addr = listener.local_addr().expect("Failed to read local addr");
    tokio::spawn(async move {
        axum::serve(listener, build_router())
            .await
            .expect("Test server failed");
    });
    addr
}

#[tokio::test]
async fn test_missing_website_parameter_is_400_on_every_endpoint() {
    let addr = spawn_app().await;
    let client = reqwest::Client::new();

    for endpoint in ENDPOINTS {
        let response = client
            .get(format!("http://{addr}{endpoint}"))
            .send()
            .await
            .expect("Request should succeed");

        assert_eq!(response.status(), 400, "endpoint {endpoint}");
        let content_type = response
            .headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();
        assert!(
            content_type.starts_with("application/json"),
            "endpoint {endpoint} content-type was {content_type}"
        );

        let body: serde_json::Value = response.json().await.expect("Should parse body");
        assert_eq!(body["error"], "Missing 'website' parameter");
    }
}

#[tokio::test]
async fn test_empty_website_parameter_is_treated_as_missing() {
    let addr = spawn_app().await;
    let client = reqwest::Client::new();

    for endpoint in ENDPOINTS {
        let response = client
            .get(format!("http://{addr}{endpoint}?website="))
            .send()
            .await
            .expect("Request should succeed");

        assert_eq!(response.status(), 400, "endpoint {endpoint}");
        let body: serde_json::Value = response.json().await.expect("Should parse body");
        assert_eq!(body["error"], "Missing 'website' parameter");
    }
}

#[tokio::test]
async fn test_unresolvable_host_is_500_with_error_text() {
    let addr = spawn_app().await;
    let client = reqwest::Client::new();

    for endpoint in ENDPOINTS {
        let start = Instant::now();
        let response = client
            .get(format!(
                "http://{addr}{endpoint}?website=does-not-exist.invalid"
            ))
            .send()
            .await
            .expect("Request should succeed");
        let elapsed = start.elapsed();

        assert_eq!(response.status(), 500, "endpoint {endpoint}");
        let body: serde_json::Value = response.json().await.expect("Should parse body");
        let error = body["error"].as_str().unwrap_or_default();
        assert!(!error.is_empty(), "endpoint {endpoint} returned empty error");

        // Resolution failure must surface within roughly the dial timeout
        assert!(
            elapsed < Duration::from_secs(5),
            "endpoint {endpoint} took {elapsed:?}"
        );
    }
}

#[tokio::test]
async fn test_unknown_route_is_404() {
    let addr = spawn_app().await;
    let response = reqwest::get(format!("http://{addr}/ssl-everything"))
        .await
        .expect("Request should succeed");
    assert_eq!(response.status(), 404);
}
