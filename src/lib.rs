//! LiqPay client: signed XML envelopes for the LiqPay payment API.
//!
//! A client SDK for the LiqPay XML payment-processing API. It builds signed
//! XML request envelopes, transmits them over HTTPS, verifies envelope
//! signatures, and exposes typed result objects for payment-form generation,
//! callback verification, and account operations (money transfer, balance
//! inquiry, transaction lookup, phone credit top-up).
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────┐
//! │   Merchant app   │
//! └────────┬─────────┘
//!          │
//! ┌────────▼─────────────────────────────────────────┐
//! │            liqpay-client (this crate)            │
//! │  ┌──────────────┐        ┌───────────────────┐   │
//! │  │ LiqpayClient │────────│ Signed envelopes  │   │
//! │  │ (operations) │        │ (XML + digest)    │   │
//! │  └──────────────┘        └───────────────────┘   │
//! └────────┬─────────────────────────────────────────┘
//!          │ HTTPS POST text/xml
//!          │
//! ┌────────▼─────────┐
//! │  LiqPay gateway  │
//! └──────────────────┘
//! ```
//!
//! Every operation follows the same path: caller parameters become an ordered
//! field envelope, the envelope is serialized to XML, a keyed digest is
//! computed over (secret || xml || secret), both are base64-encoded, and either
//! handed back for form embedding or wrapped in the outer operation envelope
//! and POSTed to the gateway. Responses come back in the mirrored envelope
//! shape and are decoded, optionally verified, and parsed into an
//! [`OperationResult`].
//!
//! # Quick Start
//!
//! ## Check the account balance
//!
//! ```rust,no_run
//! use liqpay_client::{ClientConfig, LiqpayClient};
//!
//! # async fn example() -> liqpay_client::Result<()> {
//! let config = ClientConfig::new("i12345678", "send-secret", "operations-secret");
//! let client = LiqpayClient::new(config)?;
//!
//! let balance = client.view_balance().await?;
//! println!("balance: {:?}", balance.get("balance"));
//! # Ok(())
//! # }
//! ```
//!
//! ## Generate payment-form fields
//!
//! ```rust
//! use liqpay_client::{CheckoutRequest, ClientConfig, Currency, LiqpayClient};
//! use rust_decimal::Decimal;
//!
//! # fn example() -> liqpay_client::Result<()> {
//! let client = LiqpayClient::new(ClientConfig::new("i12345678", "send", "ops"))?;
//!
//! let form = client.checkout_form(&CheckoutRequest {
//!     amount: Decimal::new(100, 0),
//!     currency: Currency::Usd,
//!     result_url: "https://shop.example/thanks".to_owned(),
//!     server_url: "https://shop.example/callback".to_owned(),
//!     order_id: Some("order-1".to_owned()),
//!     description: Some("Tickets".to_owned()),
//!     pay_way: None,
//! });
//!
//! // Embed as hidden form fields:
//! println!("operation_xml = {}", form.operation_xml);
//! println!("signature = {}", form.signature);
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```
//!
//! ## Verify a callback
//!
//! ```rust,no_run
//! use std::collections::HashMap;
//!
//! use liqpay_client::{ClientConfig, LiqpayClient};
//!
//! # fn example(params: HashMap<String, String>) -> liqpay_client::Result<()> {
//! let client = LiqpayClient::new(ClientConfig::new("i12345678", "send", "ops"))?;
//!
//! // `params` is collected from the inbound request by your web framework.
//! let result = client.verify_callback(&params)?;
//! if result.is_success() {
//!     println!("paid order {:?}", result.get("order_id"));
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Module Organization
//!
//! - [`client`]: the [`LiqpayClient`] operations
//! - [`envelope`]: ordered request envelopes and signing
//! - [`response`]: response envelope extraction and result parsing
//! - [`sign`]: digest algorithms and signature comparison modes
//! - [`transport`]: sealed HTTPS transport
//! - [`config`]: construction-time configuration
//! - [`types`]: currencies, transfer kinds, payment-method sets
//! - [`error`]: error types
//!
//! # Security Considerations
//!
//! The legacy implementation this crate replaces shipped three insecure
//! defaults. All three are secure here, with the legacy behavior available
//! only as explicit opt-in:
//!
//! - **Signature comparison**: callbacks are verified with a constant-time
//!   comparison by default. [`SignatureCheck::LegacyPermissive`] reproduces
//!   the legacy always-accept comparison for compatibility testing only.
//! - **TLS**: certificates are verified by default;
//!   `danger_accept_invalid_certs` must be set explicitly to disable.
//! - **XML escaping**: envelope values are always escaped.
//!
//! Secrets are held in [`ClientConfig`] and never logged; tracing spans skip
//! secret and recipient parameters.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

pub mod client;
pub mod config;
pub mod envelope;
pub mod error;
pub mod response;
pub mod sign;
pub mod transport;
pub mod types;

pub use client::{CheckoutRequest, LiqpayClient};
pub use config::{ClientConfig, DEFAULT_ENDPOINT, DEFAULT_VERSION};
pub use envelope::{RequestEnvelope, SignedPayload};
pub use error::{LiqpayError, Result};
pub use response::{OperationResult, ResponseEnvelope};
pub use sign::{DigestAlgorithm, SignatureCheck};
pub use transport::{HttpConfig, HttpTransport, Transport, TransportResponse};
pub use types::{Currency, Payway, PaywaySet, TransferKind};
