//! The LiqPay client: payment-form generation, callback verification, and
//! account operations.

use std::collections::HashMap;
use std::path::Path;

use rust_decimal::Decimal;
use tracing::{debug, instrument, warn};

use crate::config::ClientConfig;
use crate::envelope::{RequestEnvelope, SignedPayload};
use crate::error::{LiqpayError, Result};
use crate::response::{OperationResult, ResponseEnvelope};
use crate::sign::SignatureCheck;
use crate::transport::{HttpTransport, Transport};
use crate::types::{Currency, PaywaySet, TransferKind};

/// Parameters for payment-form generation.
///
/// `order_id`, `description`, and `pay_way` are optional and omitted from
/// the envelope when absent. An empty `pay_way` set is treated as absent.
#[derive(Debug, Clone)]
pub struct CheckoutRequest {
    /// Amount to bill. Passed through verbatim; the client does not
    /// validate business semantics.
    pub amount: Decimal,
    /// Billing currency.
    pub currency: Currency,
    /// URL the payer is redirected to after completing the payment.
    pub result_url: String,
    /// URL the gateway posts the server-to-server callback to.
    pub server_url: String,
    /// Merchant order identifier.
    pub order_id: Option<String>,
    /// Human-readable payment description.
    pub description: Option<String>,
    /// Allowed payment methods; all methods when absent.
    pub pay_way: Option<PaywaySet>,
}

/// Client for the LiqPay XML payment API.
///
/// Every operation builds an ordered request envelope, signs it with the
/// appropriate secret, and either returns form-ready fields or performs a
/// single HTTPS round-trip. The client holds no mutable state, so one
/// instance can be shared freely across tasks.
///
/// # Examples
///
/// ```no_run
/// use liqpay_client::{ClientConfig, LiqpayClient};
///
/// # async fn example() -> liqpay_client::Result<()> {
/// let client = LiqpayClient::new(ClientConfig::new("i12345678", "send-secret", "ops-secret"))?;
///
/// let balance = client.view_balance().await?;
/// println!("balance: {:?}", balance.get("balance"));
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct LiqpayClient<T: Transport = HttpTransport> {
    config: ClientConfig,
    transport: T,
}

impl LiqpayClient<HttpTransport> {
    /// Creates a client over the HTTPS transport.
    ///
    /// # Errors
    ///
    /// Returns [`LiqpayError::Config`] for invalid configuration and
    /// [`LiqpayError::Transport`] for an unusable endpoint.
    pub fn new(config: ClientConfig) -> Result<Self> {
        config.validate()?;
        let transport = HttpTransport::new(&config.endpoint, &config.http)?;
        Ok(Self { config, transport })
    }

    /// Creates a client from TOML configuration.
    ///
    /// # Errors
    ///
    /// Returns error if TOML parsing or configuration validation fails.
    pub fn from_toml(toml_str: &str) -> Result<Self> {
        let config: ClientConfig = toml::from_str(toml_str)
            .map_err(|e| LiqpayError::Config(format!("invalid TOML config: {e}")))?;
        Self::new(config)
    }

    /// Creates a client from a configuration file path.
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be read or TOML parsing fails.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| LiqpayError::Config(format!("cannot read config file: {e}")))?;
        Self::from_toml(&content)
    }
}

impl<T: Transport> LiqpayClient<T> {
    /// Creates a client over a custom transport.
    ///
    /// # Errors
    ///
    /// Returns [`LiqpayError::Config`] if the configuration is invalid.
    pub fn with_transport(config: ClientConfig, transport: T) -> Result<Self> {
        config.validate()?;
        Ok(Self { config, transport })
    }

    /// Returns the client configuration.
    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Builds the signed fields for an HTML payment form.
    ///
    /// No network I/O is performed. The returned payload carries the
    /// base64-encoded operation XML and its digest, ready to embed as the
    /// `operation_xml` and `signature` form fields. Signed with the
    /// operations secret, which is what the gateway verifies form
    /// submissions against.
    ///
    /// # Examples
    ///
    /// ```
    /// use liqpay_client::{CheckoutRequest, ClientConfig, Currency, LiqpayClient};
    /// use rust_decimal::Decimal;
    ///
    /// # fn example() -> liqpay_client::Result<()> {
    /// let client = LiqpayClient::new(ClientConfig::new("i12345678", "send", "ops"))?;
    ///
    /// let form = client.checkout_form(&CheckoutRequest {
    ///     amount: Decimal::new(100, 0),
    ///     currency: Currency::Usd,
    ///     result_url: "https://shop.example/thanks".to_owned(),
    ///     server_url: "https://shop.example/callback".to_owned(),
    ///     order_id: Some("order-1".to_owned()),
    ///     description: None,
    ///     pay_way: None,
    /// });
    ///
    /// assert!(!form.operation_xml.is_empty());
    /// assert!(!form.signature.is_empty());
    /// # Ok(())
    /// # }
    /// # example().unwrap();
    /// ```
    #[must_use]
    pub fn checkout_form(&self, request: &CheckoutRequest) -> SignedPayload {
        let mut envelope = RequestEnvelope::new();
        envelope.push("version", self.config.version.clone());
        envelope.push("merchant_id", self.config.merchant_id.clone());
        envelope.push("result_url", request.result_url.clone());
        envelope.push("server_url", request.server_url.clone());
        envelope.push_opt("order_id", request.order_id.as_deref());
        envelope.push("amount", request.amount.to_string());
        envelope.push("currency", request.currency.as_str());
        envelope.push_opt("description", request.description.as_deref());
        let pay_way = request.pay_way.filter(|set| !set.is_empty()).map(PaywaySet::to_wire);
        envelope.push_opt("pay_way", pay_way.as_deref());

        SignedPayload::seal(&envelope, self.config.digest, &self.config.operations_secret)
    }

    /// Verifies a gateway callback and returns its parsed document.
    ///
    /// `params` is the parameter mapping collected by the caller's web
    /// layer from the inbound callback request; this client does not read
    /// request state itself. Verification recomputes the digest over the
    /// decoded `operation_xml` with the operations secret and compares it to
    /// the supplied `signature` according to the configured
    /// [`SignatureCheck`] mode.
    ///
    /// # Errors
    ///
    /// - [`LiqpayError::BadRequest`] if `operation_xml` or `signature` is
    ///   missing or empty, or `operation_xml` is not valid base64.
    /// - [`LiqpayError::MalformedResponse`] if the decoded payload is not
    ///   parseable XML.
    /// - [`LiqpayError::SignatureMismatch`] if the digest does not match
    ///   (never raised in [`SignatureCheck::LegacyPermissive`] mode).
    #[instrument(skip(self, params))]
    pub fn verify_callback(&self, params: &HashMap<String, String>) -> Result<OperationResult> {
        let operation_xml = params
            .get("operation_xml")
            .filter(|v| !v.is_empty())
            .ok_or_else(missing_callback_fields)?;
        let signature = params
            .get("signature")
            .filter(|v| !v.is_empty())
            .ok_or_else(missing_callback_fields)?;

        let compact: String = operation_xml.split_whitespace().collect();
        let decoded = base64::Engine::decode(&base64::engine::general_purpose::STANDARD, compact)
            .map_err(|e| LiqpayError::BadRequest(format!("operation_xml is not valid base64: {e}")))?;

        let result = OperationResult::parse(&decoded)?;

        let expected = self
            .config
            .digest
            .digest_base64(&self.config.operations_secret, &decoded);
        if !self.config.signature_check.matches(signature, &expected) {
            warn!("callback signature mismatch");
            return Err(LiqpayError::SignatureMismatch);
        }

        debug!("callback verified");
        Ok(result)
    }

    /// Sends money to a phone wallet or card.
    ///
    /// Signed with the send secret.
    ///
    /// # Errors
    ///
    /// Returns [`LiqpayError::OperationFailed`] when the gateway reports a
    /// non-success status, or a transport/parse error otherwise.
    #[instrument(skip(self, recipient, description))]
    pub async fn send_money(
        &self,
        kind: TransferKind,
        order_id: &str,
        recipient: &str,
        amount: Decimal,
        currency: Currency,
        description: &str,
    ) -> Result<OperationResult> {
        let mut envelope = RequestEnvelope::new();
        envelope.push("action", "send_money");
        envelope.push("kind", kind.as_str());
        envelope.push("order_id", order_id);
        envelope.push("to", recipient);
        envelope.push("amount", amount.to_string());
        envelope.push("currency", currency.as_str());
        envelope.push("description", description);

        self.perform_signed_request(&self.config.send_secret, envelope).await
    }

    /// Sends money to a phone wallet. See [`LiqpayClient::send_money`].
    ///
    /// # Errors
    ///
    /// As for [`LiqpayClient::send_money`].
    pub async fn send_to_phone(
        &self,
        order_id: &str,
        recipient: &str,
        amount: Decimal,
        currency: Currency,
        description: &str,
    ) -> Result<OperationResult> {
        self.send_money(TransferKind::Phone, order_id, recipient, amount, currency, description)
            .await
    }

    /// Sends money to a card. See [`LiqpayClient::send_money`].
    ///
    /// # Errors
    ///
    /// As for [`LiqpayClient::send_money`].
    pub async fn send_to_card(
        &self,
        order_id: &str,
        recipient: &str,
        amount: Decimal,
        currency: Currency,
        description: &str,
    ) -> Result<OperationResult> {
        self.send_money(TransferKind::Card, order_id, recipient, amount, currency, description)
            .await
    }

    /// Retrieves the current account balance.
    ///
    /// # Errors
    ///
    /// As for [`LiqpayClient::send_money`].
    #[instrument(skip(self))]
    pub async fn view_balance(&self) -> Result<OperationResult> {
        let mut envelope = RequestEnvelope::new();
        envelope.push("action", "view_balance");

        self.perform_signed_request(&self.config.operations_secret, envelope).await
    }

    /// Retrieves the details of a single transaction.
    ///
    /// # Errors
    ///
    /// As for [`LiqpayClient::send_money`].
    #[instrument(skip(self))]
    pub async fn view_transaction(
        &self,
        transaction_id: u64,
        transaction_order_id: &str,
    ) -> Result<OperationResult> {
        let mut envelope = RequestEnvelope::new();
        envelope.push("action", "view_transaction");
        envelope.push("transaction_id", transaction_id.to_string());
        envelope.push("transaction_order_id", transaction_order_id);

        self.perform_signed_request(&self.config.operations_secret, envelope).await
    }

    /// Uploads funds to a mobile phone.
    ///
    /// # Errors
    ///
    /// As for [`LiqpayClient::send_money`].
    #[instrument(skip(self, phone))]
    pub async fn phone_credit(
        &self,
        order_id: &str,
        phone: &str,
        amount: Decimal,
        currency: Currency,
    ) -> Result<OperationResult> {
        let mut envelope = RequestEnvelope::new();
        envelope.push("action", "phone_credit");
        envelope.push("amount", amount.to_string());
        envelope.push("currency", currency.as_str());
        envelope.push("phone", phone);
        envelope.push("order_id", order_id);

        self.perform_signed_request(&self.config.operations_secret, envelope).await
    }

    /// Signs an envelope, performs the round-trip, and decodes the result.
    ///
    /// The `version` and `merchant_id` fields are injected here: existing
    /// values are overwritten in place, absent ones appended, so the caller
    /// controls their position in the serialization.
    #[instrument(skip(self, secret, envelope), fields(action = envelope.get("action").unwrap_or("")))]
    async fn perform_signed_request(
        &self,
        secret: &str,
        mut envelope: RequestEnvelope,
    ) -> Result<OperationResult> {
        envelope.upsert("version", self.config.version.clone());
        envelope.upsert("merchant_id", self.config.merchant_id.clone());

        let payload = SignedPayload::seal(&envelope, self.config.digest, secret);
        let body = payload.to_request_xml();

        let response = self.transport.post_envelope(body.as_bytes()).await?;

        let outer = ResponseEnvelope::parse(&response.body)?;
        let inner = outer.decode_operation_xml()?;

        if self.config.verify_response_signature {
            let expected = self.config.digest.digest_base64(secret, &inner);
            if !SignatureCheck::Strict.matches(&outer.signature, &expected) {
                warn!("response envelope signature mismatch");
                return Err(LiqpayError::SignatureMismatch);
            }
        }

        let result = OperationResult::parse(&inner)?;
        if result.is_success() {
            debug!("gateway accepted operation");
            Ok(result)
        } else {
            let description = result.response_description().unwrap_or("").to_owned();
            warn!(status = result.status().unwrap_or(""), "gateway rejected operation");
            Err(LiqpayError::OperationFailed { description, response: result })
        }
    }
}

fn missing_callback_fields() -> LiqpayError {
    LiqpayError::BadRequest("request must have operation_xml and signature fields".to_owned())
}
