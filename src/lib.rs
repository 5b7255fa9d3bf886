//! cert_status library: remote TLS certificate inspection over HTTP
//!
//! This library fetches the certificate (or full chain) a remote host presents
//! on port 443 and projects it into JSON-serializable views. Peer verification
//! is disabled on purpose: the tool exists to inspect expired, self-signed, or
//! otherwise untrusted certificates, so trust failures must never prevent a
//! lookup.
//!
//! # Example
//!
//! ```no_run
//! use cert_status::{fetch_certificate, initialization::init_crypto_provider};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! init_crypto_provider();
//! let cert = fetch_certificate("example.com", 443).await?;
//! println!("{} expires {}", cert.common_name, cert.not_after);
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! This library requires a Tokio runtime, and `init_crypto_provider` must run
//! before the first fetch.

#![warn(missing_docs)]

pub mod config;
mod error_handling;
pub mod initialization;
mod models;
mod server;
mod tls;

// Re-export public API
pub use config::{Config, LogFormat, LogLevel};
pub use error_handling::{FetchError, InitializationError};
pub use models::{CertificateDetails, ErrorResponse, SslSummary};
pub use server::{build_router, start_server};
pub use tls::{fetch_certificate, fetch_certificate_chain};
