//! HTTPS transport for gateway requests.
//!
//! The gateway exposes a single XML endpoint, so the transport surface is a
//! single operation: POST an envelope body, return the raw response. The
//! [`Transport`] trait is sealed; the one production implementation is
//! [`HttpTransport`] over reqwest, and tests substitute in-crate mocks.

use std::future::Future;
use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use tracing::{instrument, warn};
use url::Url;

use crate::error::{LiqpayError, Result};

pub(crate) mod sealed {
    /// Sealed trait marker.
    ///
    /// Cannot be implemented outside this crate, so every transport carries
    /// the envelope exactly as signed.
    pub trait Sealed {}
}

/// HTTP transport configuration.
///
/// Certificate verification is on by default. The legacy implementation
/// hardcoded it off; here that behavior requires the explicit
/// `danger_accept_invalid_certs` opt-in.
#[derive(Debug, Clone, Deserialize)]
pub struct HttpConfig {
    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Connection timeout in seconds.
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,

    /// Disables TLS certificate verification. Insecure; leave off unless
    /// testing against a gateway with an untrusted certificate chain.
    #[serde(default)]
    pub danger_accept_invalid_certs: bool,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            connect_timeout_secs: default_connect_timeout_secs(),
            danger_accept_invalid_certs: false,
        }
    }
}

impl HttpConfig {
    /// Validates configuration values are within acceptable bounds.
    ///
    /// # Errors
    ///
    /// Returns error if timeout values are outside valid ranges:
    /// - `timeout_secs`: must be 1-300 seconds
    /// - `connect_timeout_secs`: must be 1-60 seconds
    pub fn validate(&self) -> Result<()> {
        if self.timeout_secs == 0 || self.timeout_secs > 300 {
            return Err(LiqpayError::Transport(
                "timeout_secs must be between 1 and 300".to_owned(),
            ));
        }
        if self.connect_timeout_secs == 0 || self.connect_timeout_secs > 60 {
            return Err(LiqpayError::Transport(
                "connect_timeout_secs must be between 1 and 60".to_owned(),
            ));
        }
        Ok(())
    }

    /// Returns the request timeout as a Duration.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Returns the connect timeout as a Duration.
    #[must_use]
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }
}

fn default_timeout_secs() -> u64 {
    60
}

fn default_connect_timeout_secs() -> u64 {
    10
}

/// Raw response from a transport round-trip.
#[derive(Debug)]
pub struct TransportResponse {
    /// HTTP status code.
    pub status: u16,
    /// Raw response body bytes.
    pub body: Vec<u8>,
}

/// Gateway transport abstraction.
///
/// Sealed: only in-crate implementations are allowed. Each call performs at
/// most one request/response round-trip; the connection is acquired and
/// released within the call on every exit path. No retries.
pub trait Transport: sealed::Sealed + Send + Sync {
    /// POSTs a serialized outer envelope and returns the raw response.
    ///
    /// # Errors
    ///
    /// Returns [`LiqpayError::Http`] on network/TLS failure and
    /// [`LiqpayError::Transport`] on non-success HTTP status.
    fn post_envelope<'a>(
        &'a self,
        body: &'a [u8],
    ) -> impl Future<Output = Result<TransportResponse>> + Send + 'a;
}

/// Validates an endpoint URL for security constraints.
///
/// The endpoint must use HTTPS and must not point at localhost.
fn validate_endpoint(url: &Url) -> Result<()> {
    if url.scheme() != "https" {
        return Err(LiqpayError::Transport("only HTTPS endpoints are allowed".to_owned()));
    }

    if let Some(host) = url.host_str() {
        if host == "localhost" || host == "127.0.0.1" || host == "::1" || host == "[::1]" {
            return Err(LiqpayError::Transport(
                "localhost endpoints are not allowed".to_owned(),
            ));
        }
    }

    Ok(())
}

/// HTTPS transport over reqwest.
#[derive(Debug)]
pub struct HttpTransport {
    client: Client,
    endpoint: Url,
}

impl sealed::Sealed for HttpTransport {}

impl HttpTransport {
    /// Creates a transport bound to the given endpoint.
    ///
    /// # Errors
    ///
    /// Returns error if the configuration is out of bounds, the endpoint URL
    /// is invalid or insecure, or the HTTP client cannot be built.
    pub fn new(endpoint: &str, config: &HttpConfig) -> Result<Self> {
        config.validate()?;

        let endpoint = Url::parse(endpoint)
            .map_err(|e| LiqpayError::Transport(format!("invalid endpoint URL: {e}")))?;
        validate_endpoint(&endpoint)?;

        if config.danger_accept_invalid_certs {
            warn!("TLS certificate verification is disabled for gateway requests");
        }

        let client = Client::builder()
            .timeout(config.timeout())
            .connect_timeout(config.connect_timeout())
            .danger_accept_invalid_certs(config.danger_accept_invalid_certs)
            .build()
            .map_err(LiqpayError::Http)?;

        Ok(Self { client, endpoint })
    }

    /// Returns the endpoint this transport posts to.
    #[must_use]
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

impl Transport for HttpTransport {
    #[instrument(skip(self, body), fields(endpoint = %self.endpoint, body_len = body.len()))]
    async fn post_envelope<'a>(&'a self, body: &'a [u8]) -> Result<TransportResponse> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .header("Content-Type", "text/xml;charset=\"utf-8\"")
            .header("Accept", "text/xml")
            .header("Content-Length", body.len().to_string())
            .body(body.to_vec())
            .send()
            .await?;

        let status = response.status().as_u16();
        if !response.status().is_success() {
            return Err(LiqpayError::Transport(format!(
                "endpoint returned HTTP status {status}"
            )));
        }

        let bytes = response.bytes().await.map_err(LiqpayError::Http)?;
        Ok(TransportResponse { status, body: bytes.to_vec() })
    }
}
