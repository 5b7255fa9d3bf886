//! Certificate retrieval over a verification-disabled TLS handshake.
//!
//! The whole point of this service is to inspect whatever certificate a host
//! presents, including expired or self-signed ones, so the TLS client here is
//! deliberately configured to accept every peer certificate. Do not replace
//! this with a verifying configuration; trust evaluation is a non-goal and
//! would turn the interesting cases into connection failures.

use std::sync::Arc;
use std::time::Duration;

use chrono::DateTime;
use log::{debug, error};
use rustls::client::danger::{HandshakeSignatureValid, ServerCertVerified, ServerCertVerifier};
use rustls::pki_types::{CertificateDer, ServerName, UnixTime};
use rustls::{ClientConfig, DigitallySignedStruct, SignatureScheme};
use tokio::net::TcpStream;
use tokio_rustls::TlsConnector;
use x509_parser::extensions::GeneralName;
use x509_parser::parse_x509_certificate;

use crate::config::TCP_CONNECT_TIMEOUT_SECS;
use crate::error_handling::FetchError;
use crate::models::CertificateDetails;

/// Accepts every certificate, signature, and scheme.
///
/// Required because `rustls` has no built-in "skip verification" switch; the
/// only way to inspect an untrusted peer is a custom verifier that waves
/// everything through.
#[derive(Debug)]
struct NoVerification;

impl ServerCertVerifier for NoVerification {
    fn verify_server_cert(
        &self,
        _: &CertificateDer<'_>,
        _: &[CertificateDer<'_>],
        _: &ServerName<'_>,
        _: &[u8],
        _: UnixTime,
    ) -> Result<ServerCertVerified, rustls::Error> {
        Ok(ServerCertVerified::assertion())
    }

    fn verify_tls12_signature(
        &self,
        _: &[u8],
        _: &CertificateDer<'_>,
        _: &DigitallySignedStruct,
    ) -> Result<HandshakeSignatureValid, rustls::Error> {
        Ok(HandshakeSignatureValid::assertion())
    }

    fn verify_tls13_signature(
        &self,
        _: &[u8],
        _: &CertificateDer<'_>,
        _: &DigitallySignedStruct,
    ) -> Result<HandshakeSignatureValid, rustls::Error> {
        Ok(HandshakeSignatureValid::assertion())
    }

    fn supported_verify_schemes(&self) -> Vec<SignatureScheme> {
        vec![
            SignatureScheme::RSA_PKCS1_SHA1,
            SignatureScheme::ECDSA_SHA1_Legacy,
            SignatureScheme::RSA_PKCS1_SHA256,
            SignatureScheme::ECDSA_NISTP256_SHA256,
            SignatureScheme::RSA_PKCS1_SHA384,
            SignatureScheme::ECDSA_NISTP384_SHA384,
            SignatureScheme::RSA_PKCS1_SHA512,
            SignatureScheme::ECDSA_NISTP521_SHA512,
            SignatureScheme::RSA_PSS_SHA256,
            SignatureScheme::RSA_PSS_SHA384,
            SignatureScheme::RSA_PSS_SHA512,
            SignatureScheme::ED25519,
            SignatureScheme::ED448,
        ]
    }
}

/// Dials `host:port`, handshakes, and returns the peer chain as presented.
///
/// The connection (TCP and TLS state) is dropped before returning, on every
/// path. The dial, including DNS resolution, is bounded by
/// `TCP_CONNECT_TIMEOUT_SECS`; the handshake is not.
async fn fetch_peer_chain(
    host: &str,
    port: u16,
) -> Result<Vec<CertificateDer<'static>>, FetchError> {
    debug!("Fetching peer certificates from {host}:{port}");

    let config = ClientConfig::builder()
        .dangerous()
        .with_custom_certificate_verifier(Arc::new(NoVerification))
        .with_no_client_auth();

    let server_name =
        ServerName::try_from(host.to_string()).map_err(|e| FetchError::InvalidServerName {
            host: host.to_string(),
            reason: e.to_string(),
        })?;

    let address = format!("{host}:{port}");
    let sock = match tokio::time::timeout(
        Duration::from_secs(TCP_CONNECT_TIMEOUT_SECS),
        TcpStream::connect(&address),
    )
    .await
    {
        Ok(Ok(sock)) => sock,
        Ok(Err(e)) => {
            error!("Failed to connect to {address}: {e}");
            return Err(FetchError::Connect { address, source: e });
        }
        Err(_) => {
            error!("TCP connection timeout for {address}");
            return Err(FetchError::ConnectTimeout {
                address,
                timeout_secs: TCP_CONNECT_TIMEOUT_SECS,
            });
        }
    };

    let connector = TlsConnector::from(Arc::new(config));
    let tls_stream = match connector.connect(server_name, sock).await {
        Ok(stream) => stream,
        Err(e) => {
            error!("TLS handshake failed for {host}: {e}");
            return Err(FetchError::Handshake {
                host: host.to_string(),
                source: e,
            });
        }
    };

    let chain = tls_stream
        .get_ref()
        .1
        .peer_certificates()
        .map(<[CertificateDer<'static>]>::to_vec)
        .unwrap_or_default();

    debug!("Peer {host}:{port} presented {} certificate(s)", chain.len());
    Ok(chain)
}

/// Fetches the leaf (end-entity) certificate presented by `host`.
///
/// Fails with the fixed no-certificate message when the handshake completes
/// but the peer presents an empty chain.
pub async fn fetch_certificate(host: &str, port: u16) -> Result<CertificateDetails, FetchError> {
    let chain = fetch_peer_chain(host, port).await?;
    leaf_details(&chain)
}

/// Fetches the full certificate chain presented by `host`, leaf first.
///
/// The order is exactly as received from the peer. An empty chain is a valid
/// (empty) result here; only the leaf fetch treats it as an error.
pub async fn fetch_certificate_chain(
    host: &str,
    port: u16,
) -> Result<Vec<CertificateDetails>, FetchError> {
    let chain = fetch_peer_chain(host, port).await?;
    chain_details(&chain)
}

fn leaf_details(chain: &[CertificateDer<'_>]) -> Result<CertificateDetails, FetchError> {
    let leaf = chain.first().ok_or(FetchError::NoCertificate)?;
    parse_certificate(leaf)
}

fn chain_details(chain: &[CertificateDer<'_>]) -> Result<Vec<CertificateDetails>, FetchError> {
    chain.iter().map(parse_certificate).collect()
}

/// Decodes one DER certificate into the owned response projection.
fn parse_certificate(der: &CertificateDer<'_>) -> Result<CertificateDetails, FetchError> {
    let (_, cert) = parse_x509_certificate(der.as_ref())
        .map_err(|e| FetchError::CertificateParse(e.to_string()))?;

    let common_name = cert
        .subject()
        .iter_common_name()
        .next()
        .and_then(|cn| cn.as_str().ok())
        .unwrap_or_default()
        .to_string();

    let dns_names: Vec<String> = cert
        .subject_alternative_name()
        .ok()
        .flatten()
        .map(|ext| {
            ext.value
                .general_names
                .iter()
                .filter_map(|gn| match gn {
                    GeneralName::DNSName(n) => Some((*n).to_owned()),
                    _ => None,
                })
                .collect()
        })
        .unwrap_or_default();

    let not_before = DateTime::from_timestamp(cert.validity().not_before.timestamp(), 0)
        .ok_or_else(|| FetchError::CertificateParse("invalid not_before timestamp".into()))?;
    let not_after = DateTime::from_timestamp(cert.validity().not_after.timestamp(), 0)
        .ok_or_else(|| FetchError::CertificateParse("invalid not_after timestamp".into()))?;

    // Extract public key algorithm from certificate
    let key_algorithm = {
        let oid_str = cert.tbs_certificate.subject_pki.algorithm.algorithm.to_string();
        // Map OID to algorithm name
        if oid_str.contains("1.2.840.113549.1.1.1") {
            "RSA".to_string()
        } else if oid_str.contains("1.2.840.10045.2.1") {
            "ECDSA".to_string()
        } else if oid_str.contains("1.3.101.112") {
            "Ed25519".to_string()
        } else if oid_str.contains("1.3.101.113") {
            "Ed448".to_string()
        } else {
            // Return OID if unknown
            oid_str
        }
    };

    Ok(CertificateDetails {
        common_name,
        subject: cert.subject().to_string(),
        issuer: cert.issuer().to_string(),
        dns_names,
        not_before,
        not_after,
        serial_number: cert.raw_serial_as_string(),
        // DER encodes version N as N-1; report the human numbering
        version: cert.version().0 + 1,
        signature_algorithm: cert.signature_algorithm.algorithm.to_string(),
        key_algorithm,
    })
}
