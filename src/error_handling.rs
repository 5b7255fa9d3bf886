//! Error types for certificate fetching and process initialization.

use std::io;

use log::SetLoggerError;
use thiserror::Error;

/// Error types for initialization failures.
#[derive(Error, Debug)]
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),
}

/// Failures while fetching a certificate from a remote host.
///
/// The `Display` text of each variant is returned verbatim in the
/// `{"error": ...}` body of a 500 response, so messages are written for the
/// operator reading the API, not for logs.
#[derive(Error, Debug)]
pub enum FetchError {
    /// The hostname is not usable as a TLS server name (SNI).
    #[error("invalid server name '{host}': {reason}")]
    InvalidServerName {
        /// The hostname that was rejected
        host: String,
        /// Why it was rejected
        reason: String,
    },

    /// DNS resolution and TCP connect did not complete within the dial timeout.
    #[error("connection to {address} timed out after {timeout_secs}s")]
    ConnectTimeout {
        /// The `host:port` address that was dialed
        address: String,
        /// The configured dial timeout
        timeout_secs: u64,
    },

    /// DNS resolution failed, the peer refused, or another dial error occurred.
    #[error("failed to connect to {address}: {source}")]
    Connect {
        /// The `host:port` address that was dialed
        address: String,
        /// The underlying I/O error
        source: io::Error,
    },

    /// The transport connected but TLS negotiation failed.
    #[error("TLS handshake with {host} failed: {source}")]
    Handshake {
        /// The hostname the handshake was attempted with
        host: String,
        /// The underlying I/O error
        source: io::Error,
    },

    /// The handshake succeeded but the peer presented no certificate.
    #[error("unable to retrieve SSL certificate information")]
    NoCertificate,

    /// The peer presented bytes that did not decode as an X.509 certificate.
    #[error("failed to parse peer certificate: {0}")]
    CertificateParse(String),
}
