//! Error types for the LiqPay client.
//!
//! All errors implement the standard [`std::error::Error`] trait via
//! [`thiserror::Error`].
//!
//! # Error Categories
//!
//! - **Callback errors** ([`LiqpayError::BadRequest`],
//!   [`LiqpayError::SignatureMismatch`]): inbound callback validation failures
//! - **Network errors** ([`LiqpayError::Http`], [`LiqpayError::Transport`]):
//!   HTTP communication failures
//! - **Protocol errors** ([`LiqpayError::OperationFailed`],
//!   [`LiqpayError::MalformedResponse`]): gateway-side failures and malformed
//!   envelopes
//! - **Configuration errors** ([`LiqpayError::Config`]): invalid
//!   construction-time settings
//!
//! # Examples
//!
//! ```
//! use liqpay_client::{LiqpayError, Result};
//!
//! fn require_field(value: Option<&str>) -> Result<&str> {
//!     value.ok_or_else(|| {
//!         LiqpayError::BadRequest("request must have operation_xml and signature fields".to_owned())
//!     })
//! }
//! ```

use thiserror::Error;

use crate::response::OperationResult;

/// Result type alias for client operations.
///
/// This is a convenience type that uses [`LiqpayError`] as the error type.
/// All fallible functions in this crate return this type.
pub type Result<T> = std::result::Result<T, LiqpayError>;

/// Errors that can occur in the LiqPay client.
///
/// All variants include contextual information about what went wrong.
/// No operation has a partial-success state: a call either returns a fully
/// parsed result or fails with one of these variants. Nothing is retried
/// internally.
#[must_use = "errors should be handled, propagated, or explicitly panicked"]
#[derive(Debug, Error)]
pub enum LiqpayError {
    /// Callback parameters are missing or undecodable.
    ///
    /// Raised by callback verification when `operation_xml` or `signature`
    /// is absent or empty, or when `operation_xml` is not valid base64.
    ///
    /// # Recovery
    ///
    /// The inbound request did not come from the gateway in the expected
    /// shape. Reject it at the web layer.
    #[error("bad callback request: {0}")]
    BadRequest(String),

    /// Envelope digest verification failed.
    ///
    /// The digest recomputed over the decoded envelope does not match the
    /// signature supplied with it. The payload must not be trusted.
    #[error("signature mismatch")]
    SignatureMismatch,

    /// HTTP request failed.
    ///
    /// Wraps [`reqwest::Error`]: timeouts, connection failures, DNS errors,
    /// and TLS faults. No response parsing is attempted after this error.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Transport-layer validation or configuration failure.
    ///
    /// Raised before or instead of a network round-trip: invalid endpoint
    /// URL, unexpected HTTP status, or a transport fault that is not a
    /// [`reqwest::Error`].
    #[error("transport failure: {0}")]
    Transport(String),

    /// The gateway reported a non-success status.
    ///
    /// Carries the gateway's `response_description` and the fully parsed
    /// response document for diagnostic inspection.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use liqpay_client::LiqpayError;
    ///
    /// # fn handle(err: LiqpayError) {
    /// if let LiqpayError::OperationFailed { description, response } = err {
    ///     eprintln!("gateway refused: {description}");
    ///     eprintln!("status was: {:?}", response.status());
    /// }
    /// # }
    /// ```
    #[error("operation failed: {description}")]
    OperationFailed {
        /// The gateway's `response_description` field (empty if absent).
        description: String,
        /// The fully parsed response document.
        response: OperationResult,
    },

    /// Response body is not parseable as the expected XML envelope shape.
    ///
    /// Covers invalid XML, a missing operation envelope, missing
    /// `operation_xml`/`signature` children, and undecodable base64 in the
    /// inner document.
    #[error("malformed response: {0}")]
    MalformedResponse(String),

    /// Invalid client configuration.
    ///
    /// Raised at construction time, never during an operation.
    #[error("invalid configuration: {0}")]
    Config(String),
}
