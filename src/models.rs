//! Response shapes returned by the HTTP API.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// TLS certificate information extracted from an HTTPS connection.
///
/// Owned projection of a parsed X.509 certificate. This is what `/ssl-info`
/// returns directly, and what `/ssl-chain` returns one entry per presented
/// certificate. Timestamps serialize as RFC 3339.
#[derive(Debug, Clone, Serialize)]
pub struct CertificateDetails {
    /// Subject common name, empty when the certificate has none
    pub common_name: String,
    /// Full subject distinguished name
    pub subject: String,
    /// Full issuer distinguished name
    pub issuer: String,
    /// Subject alternative DNS names, in certificate order
    pub dns_names: Vec<String>,
    /// Start of the validity window
    pub not_before: DateTime<Utc>,
    /// End of the validity window
    pub not_after: DateTime<Utc>,
    /// Serial number as colon-separated hex
    pub serial_number: String,
    /// X.509 version number (3 for v3)
    pub version: u32,
    /// Signature algorithm OID
    pub signature_algorithm: String,
    /// Public key algorithm (RSA, ECDSA, Ed25519, Ed448, or the raw OID)
    pub key_algorithm: String,
}

/// Summary view served by `/ssl-dates`.
///
/// Unlike the raw and chain projections, this one computes `is_valid` at
/// response-build time from the current wall clock.
#[derive(Debug, Clone, Serialize)]
pub struct SslSummary {
    /// The hostname that was queried
    pub website: String,
    /// Subject common name of the leaf certificate
    pub common_name: String,
    /// Subject alternative DNS names of the leaf certificate
    pub dns_names: Vec<String>,
    /// Start of the validity window
    pub not_before: DateTime<Utc>,
    /// End of the validity window
    pub not_after: DateTime<Utc>,
    /// Whether `now` falls strictly inside the validity window
    pub is_valid: bool,
}

impl SslSummary {
    /// Builds a summary for `website` from its leaf certificate.
    ///
    /// `is_valid` holds iff `not_before < now < not_after`; a certificate is
    /// not considered valid at the exact boundary instants.
    pub fn from_certificate(website: &str, cert: &CertificateDetails, now: DateTime<Utc>) -> Self {
        SslSummary {
            website: website.to_string(),
            common_name: cert.common_name.clone(),
            dns_names: cert.dns_names.clone(),
            not_before: cert.not_before,
            not_after: cert.not_after,
            is_valid: cert.not_before < now && now < cert.not_after,
        }
    }
}

/// Error body returned by every endpoint on failure.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Human-readable description of what went wrong
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn details(not_before: DateTime<Utc>, not_after: DateTime<Utc>) -> CertificateDetails {
        CertificateDetails {
            common_name: "example.com".into(),
            subject: "CN=example.com".into(),
            issuer: "CN=Test CA".into(),
            dns_names: vec!["example.com".into(), "www.example.com".into()],
            not_before,
            not_after,
            serial_number: "01:02:03".into(),
            version: 3,
            signature_algorithm: "1.2.840.113549.1.1.11".into(),
            key_algorithm: "RSA".into(),
        }
    }

    #[test]
    fn test_summary_copies_identity_fields() {
        let not_before = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let not_after = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
        let cert = details(not_before, not_after);

        let now = Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap();
        let summary = SslSummary::from_certificate("example.com", &cert, now);

        assert_eq!(summary.website, "example.com");
        assert_eq!(summary.common_name, cert.common_name);
        assert_eq!(summary.dns_names, cert.dns_names);
        assert_eq!(summary.not_before, not_before);
        assert_eq!(summary.not_after, not_after);
        assert!(summary.is_valid);
    }

    #[test]
    fn test_validity_window_is_strict_at_both_ends() {
        let not_before = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let not_after = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        let cert = details(not_before, not_after);

        // Exactly not_before: not yet valid
        let summary = SslSummary::from_certificate("example.com", &cert, not_before);
        assert!(!summary.is_valid);

        // Exactly not_after: no longer valid
        let summary = SslSummary::from_certificate("example.com", &cert, not_after);
        assert!(!summary.is_valid);

        // One second inside either boundary: valid
        let just_after_start = not_before + chrono::Duration::seconds(1);
        let summary = SslSummary::from_certificate("example.com", &cert, just_after_start);
        assert!(summary.is_valid);
    }

    #[test]
    fn test_expired_certificate_is_not_valid() {
        let not_before = Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap();
        let not_after = Utc.with_ymd_and_hms(2021, 1, 1, 0, 0, 0).unwrap();
        let cert = details(not_before, not_after);

        let now = Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap();
        let summary = SslSummary::from_certificate("example.com", &cert, now);
        assert!(!summary.is_valid);
    }

    #[test]
    fn test_not_yet_valid_certificate_is_not_valid() {
        let not_before = Utc.with_ymd_and_hms(2030, 1, 1, 0, 0, 0).unwrap();
        let not_after = Utc.with_ymd_and_hms(2031, 1, 1, 0, 0, 0).unwrap();
        let cert = details(not_before, not_after);

        let now = Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap();
        let summary = SslSummary::from_certificate("example.com", &cert, now);
        assert!(!summary.is_valid);
    }

    #[test]
    fn test_timestamps_serialize_as_rfc3339() {
        let not_before = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let not_after = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        let cert = details(not_before, not_after);

        let json = serde_json::to_value(&cert).unwrap();
        assert_eq!(json["not_before"], "2024-01-01T00:00:00Z");
        assert_eq!(json["not_after"], "2025-01-01T00:00:00Z");
    }
}
