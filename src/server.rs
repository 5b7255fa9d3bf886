//! HTTP surface for certificate lookups.
//!
//! Provides three endpoints, each a different projection of the same fetch:
//! - `/ssl-info` - raw leaf certificate details
//! - `/ssl-dates` - summary with a validity verdict
//! - `/ssl-chain` - every certificate the peer presented
//!
//! The router is built once at startup and never mutated afterwards.

use std::future::Future;
use std::net::SocketAddr;

use axum::extract::Query;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use axum::routing::get;
use axum::Router;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::config::HTTPS_PORT;
use crate::error_handling::FetchError;
use crate::models::{ErrorResponse, SslSummary};
use crate::tls::{fetch_certificate, fetch_certificate_chain};

const MISSING_WEBSITE: &str = "Missing 'website' parameter";

#[derive(Deserialize)]
struct WebsiteQuery {
    website: Option<String>,
}

/// Runs the shared request pipeline: validate the `website` parameter, run
/// the endpoint's projection, and serialize the outcome.
///
/// An absent and an empty `website` are treated the same (400). Fetch errors
/// become a 500 whose body carries the error text verbatim.
async fn lookup<T, F, Fut>(website: Option<String>, project: F) -> Response
where
    T: Serialize,
    F: FnOnce(String) -> Fut,
    Fut: Future<Output = Result<T, FetchError>>,
{
    let Some(website) = website.filter(|w| !w.is_empty()) else {
        return error_response(StatusCode::BAD_REQUEST, MISSING_WEBSITE);
    };
    match project(website).await {
        Ok(body) => (StatusCode::OK, Json(body)).into_response(),
        Err(e) => error_response(StatusCode::INTERNAL_SERVER_ERROR, &e.to_string()),
    }
}

fn error_response(status: StatusCode, message: &str) -> Response {
    (
        status,
        Json(ErrorResponse {
            error: message.to_string(),
        }),
    )
        .into_response()
}

/// `GET /ssl-info?website=<host>` - raw leaf certificate
async fn ssl_info_handler(Query(q): Query<WebsiteQuery>) -> Response {
    lookup(q.website, |host| async move {
        fetch_certificate(&host, HTTPS_PORT).await
    })
    .await
}

/// `GET /ssl-dates?website=<host>` - summary with validity verdict
///
/// The only projection that consults the wall clock; the verdict reflects the
/// moment the response is built, not the moment the handshake happened.
async fn ssl_dates_handler(Query(q): Query<WebsiteQuery>) -> Response {
    lookup(q.website, |host| async move {
        let cert = fetch_certificate(&host, HTTPS_PORT).await?;
        Ok(SslSummary::from_certificate(&host, &cert, Utc::now()))
    })
    .await
}

/// `GET /ssl-chain?website=<host>` - full presented chain, leaf first
async fn ssl_chain_handler(Query(q): Query<WebsiteQuery>) -> Response {
    lookup(q.website, |host| async move {
        fetch_certificate_chain(&host, HTTPS_PORT).await
    })
    .await
}

/// Builds the route table.
pub fn build_router() -> Router {
    Router::new()
        .route("/ssl-info", get(ssl_info_handler))
        .route("/ssl-dates", get(ssl_dates_handler))
        .route("/ssl-chain", get(ssl_chain_handler))
}

/// Binds `addr` and serves the API until the process exits.
pub async fn start_server(addr: SocketAddr) -> Result<(), anyhow::Error> {
    let app = build_router();

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to bind HTTP listener to {}: {}", addr, e))?;

    log::info!("Server is running on http://{}/", addr);
    log::info!("  - Raw certificate: http://{}/ssl-info?website=<host>", addr);
    log::info!("  - Validity summary: http://{}/ssl-dates?website=<host>", addr);
    log::info!("  - Full chain: http://{}/ssl-chain?website=<host>", addr);

    axum::serve(listener, app)
        .await
        .map_err(|e| anyhow::anyhow!("HTTP server error: {}", e))?;

    Ok(())
}
