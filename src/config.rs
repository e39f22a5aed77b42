//! Client configuration.

use serde::Deserialize;
use url::Url;

use crate::error::{LiqpayError, Result};
use crate::sign::{DigestAlgorithm, SignatureCheck};
use crate::transport::HttpConfig;

/// Default gateway endpoint for the XML API mode.
pub const DEFAULT_ENDPOINT: &str = "https://www.liqpay.com/?do=api_xml";

/// Default protocol version.
pub const DEFAULT_VERSION: &str = "1.2";

/// Immutable client configuration, supplied once at construction.
///
/// The gateway issues two signing secrets: `send_secret` covers money
/// transfer operations, `operations_secret` covers everything else. The
/// gateway also verifies payment-form fields and callbacks against
/// `operations_secret` rather than a dedicated payment secret, so form
/// generation and callback verification use it here as well.
///
/// # Examples
///
/// ```
/// use liqpay_client::ClientConfig;
///
/// let config = ClientConfig::new("i12345678", "send-secret", "ops-secret");
/// assert_eq!(config.version, "1.2");
/// assert!(config.validate().is_ok());
/// ```
///
/// TOML form, with every optional field defaulted:
///
/// ```
/// use liqpay_client::ClientConfig;
///
/// let toml = r#"
///     merchant_id = "i12345678"
///     send_secret = "send-secret"
///     operations_secret = "ops-secret"
/// "#;
///
/// let config: ClientConfig = toml::from_str(toml).unwrap();
/// assert_eq!(config.endpoint, "https://www.liqpay.com/?do=api_xml");
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct ClientConfig {
    /// Merchant identifier issued by the gateway.
    pub merchant_id: String,

    /// Signing secret for money transfer operations.
    pub send_secret: String,

    /// Signing secret for all other operations, including payment-form
    /// generation and callback verification.
    pub operations_secret: String,

    /// Protocol version string sent in every envelope.
    #[serde(default = "default_version")]
    pub version: String,

    /// Gateway endpoint URL. Must be HTTPS.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Digest algorithm for envelope signatures.
    #[serde(default)]
    pub digest: DigestAlgorithm,

    /// Signature comparison mode for callback verification.
    #[serde(default)]
    pub signature_check: SignatureCheck,

    /// Verifies the digest on response envelopes as well. Off by default:
    /// the reference flow never checked response signatures, and gateways
    /// are not guaranteed to sign them with the request secret.
    #[serde(default)]
    pub verify_response_signature: bool,

    /// HTTP transport settings.
    #[serde(default)]
    pub http: HttpConfig,
}

impl ClientConfig {
    /// Creates a configuration with default version, endpoint, and security
    /// settings.
    #[must_use]
    pub fn new(
        merchant_id: impl Into<String>,
        send_secret: impl Into<String>,
        operations_secret: impl Into<String>,
    ) -> Self {
        Self {
            merchant_id: merchant_id.into(),
            send_secret: send_secret.into(),
            operations_secret: operations_secret.into(),
            version: default_version(),
            endpoint: default_endpoint(),
            digest: DigestAlgorithm::default(),
            signature_check: SignatureCheck::default(),
            verify_response_signature: false,
            http: HttpConfig::default(),
        }
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`LiqpayError::Config`] if the merchant id or a secret is
    /// empty, the endpoint is not a valid HTTPS URL, or the HTTP settings
    /// are out of bounds.
    pub fn validate(&self) -> Result<()> {
        if self.merchant_id.is_empty() {
            return Err(LiqpayError::Config("merchant_id must not be empty".to_owned()));
        }
        if self.send_secret.is_empty() || self.operations_secret.is_empty() {
            return Err(LiqpayError::Config("signing secrets must not be empty".to_owned()));
        }
        if self.version.is_empty() {
            return Err(LiqpayError::Config("version must not be empty".to_owned()));
        }

        let endpoint = Url::parse(&self.endpoint)
            .map_err(|e| LiqpayError::Config(format!("invalid endpoint '{}': {e}", self.endpoint)))?;
        if endpoint.scheme() != "https" {
            return Err(LiqpayError::Config(format!(
                "endpoint must use HTTPS, got: {}",
                endpoint.scheme()
            )));
        }

        self.http
            .validate()
            .map_err(|e| LiqpayError::Config(e.to_string()))?;

        Ok(())
    }
}

fn default_version() -> String {
    DEFAULT_VERSION.to_owned()
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_new_defaults() {
        let config = ClientConfig::new("i123", "send", "ops");
        assert_eq!(config.merchant_id, "i123");
        assert_eq!(config.version, "1.2");
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.digest, DigestAlgorithm::Sha1);
        assert_eq!(config.signature_check, SignatureCheck::Strict);
        assert!(!config.verify_response_signature);
        assert!(!config.http.danger_accept_invalid_certs);
    }

    #[test]
    fn test_config_validate_ok() {
        assert!(ClientConfig::new("i123", "send", "ops").validate().is_ok());
    }

    #[test]
    fn test_config_validate_empty_merchant() {
        let config = ClientConfig::new("", "send", "ops");
        let err = config.validate().unwrap_err();
        assert!(matches!(err, LiqpayError::Config(_)));
        assert!(err.to_string().contains("merchant_id"));
    }

    #[test]
    fn test_config_validate_empty_secret() {
        let config = ClientConfig::new("i123", "", "ops");
        assert!(config.validate().is_err());

        let config = ClientConfig::new("i123", "send", "");
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validate_http_endpoint_rejected() {
        let mut config = ClientConfig::new("i123", "send", "ops");
        config.endpoint = "http://www.liqpay.com/?do=api_xml".to_owned();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("HTTPS"));
    }

    #[test]
    fn test_config_validate_invalid_endpoint_rejected() {
        let mut config = ClientConfig::new("i123", "send", "ops");
        config.endpoint = "not a url".to_owned();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validate_bad_http_settings() {
        let mut config = ClientConfig::new("i123", "send", "ops");
        config.http.timeout_secs = 0;
        let err = config.validate().unwrap_err();
        assert!(matches!(err, LiqpayError::Config(_)));
    }

    #[test]
    fn test_config_from_toml() {
        let toml = r#"
            merchant_id = "i12345678"
            send_secret = "send-secret"
            operations_secret = "ops-secret"
            version = "1.3"
            digest = "sha256"
            signature_check = "legacy_permissive"
            verify_response_signature = true

            [http]
            timeout_secs = 30
            danger_accept_invalid_certs = true
        "#;

        let config: ClientConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.version, "1.3");
        assert_eq!(config.digest, DigestAlgorithm::Sha256);
        assert_eq!(config.signature_check, SignatureCheck::LegacyPermissive);
        assert!(config.verify_response_signature);
        assert_eq!(config.http.timeout_secs, 30);
        assert!(config.http.danger_accept_invalid_certs);
    }

    #[test]
    fn test_config_from_toml_missing_required() {
        let toml = r#"
            merchant_id = "i12345678"
        "#;
        let result: std::result::Result<ClientConfig, _> = toml::from_str(toml);
        assert!(result.is_err());
    }
}
