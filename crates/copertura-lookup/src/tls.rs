//! TLS client configuration for the coverage service.
//!
//! The upstream endpoint does not negotiate with a modern-only client, so the
//! posture is pinned here explicitly instead of relying on library defaults.
//! [`TlsPosture::legacy`] is what production uses.

use std::sync::Arc;

use copertura_core::{CipherLevel, TlsMinVersion};
use rustls::{ClientConfig, RootCertStore, SupportedCipherSuite, SupportedProtocolVersion};

use crate::error::TransportError;

static TLS13_ONLY: &[&SupportedProtocolVersion] = &[&rustls::version::TLS13];

/// Minimum protocol version plus cipher suite policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TlsPosture {
    pub min_version: TlsMinVersion,
    pub ciphers: CipherLevel,
}

impl TlsPosture {
    /// TLS 1.2 floor with every suite the provider offers.
    #[must_use]
    pub const fn legacy() -> Self {
        Self {
            min_version: TlsMinVersion::Tls12,
            ciphers: CipherLevel::Relaxed,
        }
    }

    /// Protocol versions to offer, highest first.
    fn protocol_versions(self) -> &'static [&'static SupportedProtocolVersion] {
        match self.min_version {
            TlsMinVersion::Tls12 => rustls::ALL_VERSIONS,
            TlsMinVersion::Tls13 => TLS13_ONLY,
        }
    }

    fn cipher_suites(self) -> Vec<SupportedCipherSuite> {
        let all = rustls::crypto::ring::ALL_CIPHER_SUITES.iter().copied();
        match self.ciphers {
            CipherLevel::Relaxed => all.collect(),
            CipherLevel::Strict => all
                .filter(|suite| matches!(suite, SupportedCipherSuite::Tls13(_)))
                .collect(),
        }
    }
}

impl Default for TlsPosture {
    fn default() -> Self {
        Self::legacy()
    }
}

/// Builds the `rustls` client configuration for `posture`, trusting the
/// Mozilla root set shipped by `webpki-roots`.
///
/// # Errors
///
/// Returns [`TransportError::Tls`] if the version/suite combination is
/// unusable (for example a TLS 1.2-only posture with no TLS 1.2 suites).
pub fn client_config(posture: TlsPosture) -> Result<ClientConfig, TransportError> {
    let mut provider = rustls::crypto::ring::default_provider();
    provider.cipher_suites = posture.cipher_suites();

    let mut roots = RootCertStore::empty();
    roots.extend(webpki_roots::TLS_SERVER_ROOTS.iter().cloned());

    let config = ClientConfig::builder_with_provider(Arc::new(provider))
        .with_protocol_versions(posture.protocol_versions())?
        .with_root_certificates(roots)
        .with_no_client_auth();

    tracing::info!(
        min_version = %posture.min_version,
        ciphers = %posture.ciphers,
        suites = config.crypto_provider().cipher_suites.len(),
        "upstream TLS posture configured"
    );

    Ok(config)
}
