//! Process constants and command-line configuration.

use std::net::IpAddr;

use clap::{Parser, ValueEnum};

// Network operation timeouts
/// TCP connection timeout in seconds.
///
/// Bounds DNS resolution and connection establishment toward the inspected
/// host. The TLS handshake itself is not bounded by this value.
pub const TCP_CONNECT_TIMEOUT_SECS: u64 = 2;

/// Port the inspected hosts are dialed on. The service only speaks TLS
/// toward this port; the listening side is plain HTTP.
pub const HTTPS_PORT: u16 = 443;

/// Default port the HTTP API listens on.
pub const DEFAULT_LISTEN_PORT: u16 = 8080;

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace). Used with the `--log-level` CLI option.
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Errors only
    Error,
    /// Errors and warnings
    Warn,
    /// Informational output (default)
    Info,
    /// Debugging output
    Debug,
    /// Everything
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// Controls how log messages are formatted:
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable, colored
    Plain,
    /// One JSON object per line
    Json,
}

/// Command-line options and configuration.
///
/// This struct is automatically generated by `clap` from the field attributes.
/// All options have sensible defaults and can be overridden via command-line flags.
///
/// # Examples
///
/// ```bash
/// # Listen on the default port (8080)
/// cert_status
///
/// # Custom port, loopback only
/// cert_status --port 9090 --bind 127.0.0.1
/// ```
#[derive(Debug, Parser)]
#[command(
    name = "cert_status",
    about = "Serves TLS certificate details for remote hosts over a small HTTP API."
)]
pub struct Config {
    /// Address to bind the HTTP listener to
    #[arg(long, default_value = "0.0.0.0")]
    pub bind: IpAddr,

    /// Port to bind the HTTP listener to
    #[arg(long, default_value_t = DEFAULT_LISTEN_PORT)]
    pub port: u16,

    /// Log level: error|warn|info|debug|trace
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,

    /// Log format: plain|json
    #[arg(long, value_enum, default_value_t = LogFormat::Plain)]
    pub log_format: LogFormat,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::parse_from(["cert_status"]);
        assert_eq!(config.port, DEFAULT_LISTEN_PORT);
        assert_eq!(config.bind.to_string(), "0.0.0.0");
    }

    #[test]
    fn test_overrides() {
        let config = Config::parse_from(["cert_status", "--port", "9090", "--bind", "::1"]);
        assert_eq!(config.port, 9090);
        assert!(config.bind.is_loopback());
    }

    #[test]
    fn test_log_level_conversion() {
        assert_eq!(
            log::LevelFilter::from(LogLevel::Debug),
            log::LevelFilter::Debug
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Error),
            log::LevelFilter::Error
        );
    }
}
