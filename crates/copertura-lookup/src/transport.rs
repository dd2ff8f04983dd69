//! HTTP transport for the coverage service.
//!
//! [`Transport`] is the seam the stage resolvers talk through. The production
//! implementation, [`HttpTransport`], wraps a single `reqwest::Client` (one
//! connection pool for the whole process), attaches basic-auth credentials to
//! every call, and uses the pinned TLS posture from [`crate::tls`].

use std::time::Duration;

use async_trait::async_trait;
use copertura_core::{AppConfig, Credentials};
use reqwest::{Client, Url};

use crate::error::TransportError;
use crate::tls::{client_config, TlsPosture};

const USER_AGENT: &str = "copertura/0.1 (coverage-lookup)";

/// Status code and body of one upstream call, before any interpretation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    #[must_use]
    pub fn ok(body: impl Into<String>) -> Self {
        Self {
            status: 200,
            body: body.into(),
        }
    }
}

/// One `GET` against the coverage service.
///
/// `path` is the endpoint name relative to the base URL (e.g. `GetCities`).
/// Implementations must map every network-level failure to [`TransportError`];
/// the HTTP status is returned as-is for the caller to interpret.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn get(&self, path: &str, query: &[(&str, &str)]) -> Result<RawResponse, TransportError>;
}

/// Timeouts and TLS posture for [`HttpTransport`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransportSettings {
    pub request_timeout: Duration,
    pub connect_timeout: Duration,
    pub tls: TlsPosture,
}

impl Default for TransportSettings {
    fn default() -> Self {
        Self {
            request_timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
            tls: TlsPosture::legacy(),
        }
    }
}

impl TransportSettings {
    #[must_use]
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            request_timeout: Duration::from_secs(config.request_timeout_secs),
            connect_timeout: Duration::from_secs(config.connect_timeout_secs),
            tls: TlsPosture {
                min_version: config.tls_min_version,
                ciphers: config.tls_ciphers,
            },
        }
    }
}

/// `reqwest`-backed [`Transport`] with fixed basic-auth credentials.
pub struct HttpTransport {
    client: Client,
    base_url: Url,
    credentials: Credentials,
}

impl std::fmt::Debug for HttpTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpTransport")
            .field("base_url", &self.base_url.as_str())
            .field("credentials", &self.credentials)
            .finish_non_exhaustive()
    }
}

impl HttpTransport {
    /// Creates a transport rooted at `base_url`.
    ///
    /// # Errors
    ///
    /// - [`TransportError::Tls`] if the TLS posture cannot be built.
    /// - [`TransportError::Http`] if the `reqwest::Client` cannot be constructed.
    /// - [`TransportError::InvalidBaseUrl`] if `base_url` does not parse.
    pub fn new(
        base_url: &str,
        credentials: Credentials,
        settings: TransportSettings,
    ) -> Result<Self, TransportError> {
        let client = Client::builder()
            .use_preconfigured_tls(client_config(settings.tls)?)
            .timeout(settings.request_timeout)
            .connect_timeout(settings.connect_timeout)
            .user_agent(USER_AGENT)
            .build()?;

        // Exactly one trailing slash so that `Url::join` appends the endpoint
        // name instead of replacing the last path segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| TransportError::InvalidBaseUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            base_url,
            credentials,
        })
    }

    /// Creates a transport from the loaded application configuration.
    ///
    /// # Errors
    ///
    /// Same as [`HttpTransport::new`].
    pub fn from_app_config(config: &AppConfig) -> Result<Self, TransportError> {
        Self::new(
            &config.upstream_base_url,
            config.credentials.clone(),
            TransportSettings::from_app_config(config),
        )
    }

    /// Builds the full request URL with percent-encoded query parameters.
    fn build_url(&self, path: &str, query: &[(&str, &str)]) -> Result<Url, TransportError> {
        let mut url = self
            .base_url
            .join(path)
            .map_err(|e| TransportError::InvalidBaseUrl {
                url: format!("{}{path}", self.base_url),
                reason: e.to_string(),
            })?;
        {
            let mut pairs = url.query_pairs_mut();
            for (k, v) in query {
                pairs.append_pair(k, v);
            }
        }
        Ok(url)
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, path: &str, query: &[(&str, &str)]) -> Result<RawResponse, TransportError> {
        let url = self.build_url(path, query)?;
        tracing::debug!(path, "upstream request");

        let response = self
            .client
            .get(url)
            .basic_auth(&self.credentials.username, Some(&self.credentials.password))
            .send()
            .await
            .map_err(|e| classify_send_error(path, e))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| classify_send_error(path, e))?;

        Ok(RawResponse { status, body })
    }
}

fn classify_send_error(path: &str, err: reqwest::Error) -> TransportError {
    if err.is_timeout() {
        tracing::warn!(path, "upstream request timed out");
        TransportError::Timeout {
            path: path.to_string(),
        }
    } else {
        tracing::warn!(path, error = %err, "upstream request failed");
        TransportError::Http(err)
    }
}
