//! Main application entry point (HTTP service binary).
//!
//! This is a thin wrapper around the `cert_status` library that handles:
//! - Command-line argument parsing
//! - Logger initialization
//! - Crypto provider installation
//! - Starting the HTTP server
//!
//! All core functionality is implemented in the library crate.

use anyhow::{Context, Result};
use clap::Parser;
use std::net::SocketAddr;
use std::process;

use cert_status::initialization::{init_crypto_provider, init_logger_with};
use cert_status::{start_server, Config};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::parse();

    let log_level = config.log_level.clone();
    let log_format = config.log_format.clone();
    init_logger_with(log_level.into(), log_format).context("Failed to initialize logger")?;

    // Initialize crypto provider for TLS operations
    init_crypto_provider();

    let addr = SocketAddr::new(config.bind, config.port);
    if let Err(e) = start_server(addr).await {
        eprintln!("cert_status error: {:#}", e);
        process::exit(1);
    }
    Ok(())
}
