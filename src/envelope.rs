//! Request envelope construction and signing.
//!
//! An envelope is an ordered list of (field, value) pairs. Order matters:
//! it determines the serialized XML and therefore the digest, so the same
//! fields pushed in a different order produce a different signature.

use crate::sign::DigestAlgorithm;

/// Ordered field list serialized as the inner operation XML.
///
/// Fields are emitted in insertion order as `<name>value</name>` elements
/// under a `<request>` root, with values XML-escaped. Absent values are
/// simply not pushed; see [`RequestEnvelope::push_opt`].
///
/// # Examples
///
/// ```
/// use liqpay_client::RequestEnvelope;
///
/// let mut envelope = RequestEnvelope::new();
/// envelope.push("action", "view_balance");
/// envelope.push_opt("order_id", None::<&str>);
///
/// assert_eq!(envelope.to_xml(), "<request><action>view_balance</action></request>");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestEnvelope {
    fields: Vec<(String, String)>,
}

impl RequestEnvelope {
    /// Creates an empty envelope.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a field.
    pub fn push(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.fields.push((name.into(), value.into()));
    }

    /// Appends a field only when a value is present.
    pub fn push_opt(&mut self, name: impl Into<String>, value: Option<&str>) {
        if let Some(value) = value {
            self.push(name, value);
        }
    }

    /// Sets a field, overwriting the value in place when the field already
    /// exists so its position in the serialization is preserved.
    pub fn upsert(&mut self, name: &str, value: impl Into<String>) {
        let value = value.into();
        match self.fields.iter_mut().find(|(n, _)| n == name) {
            Some((_, existing)) => *existing = value,
            None => self.fields.push((name.to_owned(), value)),
        }
    }

    /// Returns the value of the first field with the given name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields.iter().find(|(n, _)| n == name).map(|(_, v)| v.as_str())
    }

    /// Returns the number of fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Checks whether the envelope has no fields.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Serializes the envelope to its canonical XML form.
    ///
    /// Deterministic and idempotent: serializing the same envelope twice
    /// yields byte-identical XML. Values are escaped; the legacy
    /// implementation emitted them raw, which produced malformed markup for
    /// reserved characters.
    #[must_use]
    pub fn to_xml(&self) -> String {
        let mut xml = String::from("<request>");
        for (name, value) in &self.fields {
            xml.push('<');
            xml.push_str(name);
            xml.push('>');
            xml.push_str(&quick_xml::escape::escape(value.as_str()));
            xml.push_str("</");
            xml.push_str(name);
            xml.push('>');
        }
        xml.push_str("</request>");
        xml
    }
}

/// A sealed envelope ready for transmission or form embedding.
///
/// Holds the base64-encoded operation XML and its base64-encoded digest.
/// These are exactly the two fields an HTML payment form must carry, and
/// the two children of the wire `operation_envelope` element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedPayload {
    /// Base64-encoded operation XML.
    pub operation_xml: String,
    /// Base64-encoded digest over (secret || xml || secret).
    pub signature: String,
}

impl SignedPayload {
    /// Serializes and signs an envelope with the given secret.
    #[must_use]
    pub fn seal(envelope: &RequestEnvelope, algorithm: DigestAlgorithm, secret: &str) -> Self {
        let xml = envelope.to_xml();
        let signature = algorithm.digest_base64(secret, xml.as_bytes());
        let operation_xml =
            base64::Engine::encode(&base64::engine::general_purpose::STANDARD, xml.as_bytes());
        Self { operation_xml, signature }
    }

    /// Wraps the payload in the outer wire envelope POSTed to the gateway.
    #[must_use]
    pub fn to_request_xml(&self) -> String {
        format!(
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?><request><liqpay><operation_envelope>\
             <operation_xml>{}</operation_xml><signature>{}</signature>\
             </operation_envelope></liqpay></request>",
            self.operation_xml, self.signature
        )
    }
}
