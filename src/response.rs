//! Response envelope extraction and operation result parsing.

use quick_xml::Reader;
use quick_xml::events::Event;

use crate::error::{LiqpayError, Result};

fn malformed(detail: impl Into<String>) -> LiqpayError {
    LiqpayError::MalformedResponse(detail.into())
}

/// Outer response envelope as received from the gateway.
///
/// Mirrors the request shape: a base64-encoded inner document plus its
/// digest. Extraction only locates the `operation_envelope` element and its
/// `operation_xml`/`signature` children; the surrounding element names are
/// not significant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseEnvelope {
    /// Base64-encoded inner operation XML.
    pub operation_xml: String,
    /// Base64-encoded digest supplied by the gateway.
    pub signature: String,
}

impl ResponseEnvelope {
    /// Parses the outer envelope out of a raw response body.
    ///
    /// # Errors
    ///
    /// Returns [`LiqpayError::MalformedResponse`] if the body is not valid
    /// UTF-8 XML or the operation envelope is absent or incomplete.
    pub fn parse(body: &[u8]) -> Result<Self> {
        let text = std::str::from_utf8(body)
            .map_err(|_| malformed("response body is not valid UTF-8"))?;

        let mut reader = Reader::from_str(text);
        reader.trim_text(true);

        let mut saw_envelope = false;
        let mut operation_xml: Option<String> = None;
        let mut signature: Option<String> = None;
        let mut current: Option<String> = None;

        loop {
            match reader.read_event() {
                Ok(Event::Start(start)) => {
                    let name = String::from_utf8_lossy(start.name().as_ref()).into_owned();
                    if name == "operation_envelope" {
                        saw_envelope = true;
                    }
                    current = Some(name);
                }
                Ok(Event::Text(t)) => {
                    let value = t
                        .unescape()
                        .map_err(|e| malformed(format!("invalid XML text: {e}")))?;
                    match current.as_deref() {
                        Some("operation_xml") => {
                            operation_xml.get_or_insert_with(String::new).push_str(&value);
                        }
                        Some("signature") => {
                            signature.get_or_insert_with(String::new).push_str(&value);
                        }
                        _ => {}
                    }
                }
                Ok(Event::End(_)) => current = None,
                Ok(Event::Eof) => break,
                Ok(_) => {}
                Err(e) => return Err(malformed(format!("invalid XML: {e}"))),
            }
        }

        if !saw_envelope {
            return Err(malformed("missing operation_envelope element"));
        }
        let operation_xml = operation_xml.ok_or_else(|| malformed("missing operation_xml"))?;
        let signature = signature.ok_or_else(|| malformed("missing signature"))?;
        Ok(Self { operation_xml, signature })
    }

    /// Base64-decodes the inner operation XML.
    ///
    /// Whitespace inside the encoded value is tolerated, as gateways that
    /// pretty-print their envelopes wrap the base64 across lines.
    ///
    /// # Errors
    ///
    /// Returns [`LiqpayError::MalformedResponse`] on undecodable base64.
    pub fn decode_operation_xml(&self) -> Result<Vec<u8>> {
        let compact: String = self.operation_xml.split_whitespace().collect();
        base64::Engine::decode(&base64::engine::general_purpose::STANDARD, compact)
            .map_err(|e| malformed(format!("operation_xml is not valid base64: {e}")))
    }
}

/// Parsed inner operation document.
///
/// An ordered view of the gateway's response fields, with accessors for the
/// `status` and `response_description` fields every operation carries. The
/// raw decoded XML is retained for diagnostic inspection; errors embed the
/// whole parsed document (see
/// [`LiqpayError::OperationFailed`](crate::LiqpayError::OperationFailed)),
/// so no response state lives on the client itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationResult {
    fields: Vec<(String, String)>,
    raw_xml: String,
}

impl OperationResult {
    /// Parses an inner operation document.
    ///
    /// # Errors
    ///
    /// Returns [`LiqpayError::MalformedResponse`] if the bytes are not valid
    /// UTF-8 XML or no root element is present.
    pub fn parse(xml: &[u8]) -> Result<Self> {
        let text = std::str::from_utf8(xml)
            .map_err(|_| malformed("operation document is not valid UTF-8"))?;

        let mut reader = Reader::from_str(text);
        reader.trim_text(true);

        let mut fields = Vec::new();
        let mut depth = 0usize;
        let mut saw_root = false;
        let mut name: Option<String> = None;
        let mut value = String::new();

        loop {
            match reader.read_event() {
                Ok(Event::Start(start)) => {
                    depth += 1;
                    if depth == 1 {
                        saw_root = true;
                    } else if depth == 2 {
                        name = Some(String::from_utf8_lossy(start.name().as_ref()).into_owned());
                        value.clear();
                    }
                }
                Ok(Event::Empty(start)) => {
                    if depth == 0 {
                        saw_root = true;
                    } else if depth == 1 {
                        let name = String::from_utf8_lossy(start.name().as_ref()).into_owned();
                        fields.push((name, String::new()));
                    }
                }
                Ok(Event::Text(t)) => {
                    if depth >= 2 {
                        let text = t
                            .unescape()
                            .map_err(|e| malformed(format!("invalid XML text: {e}")))?;
                        value.push_str(&text);
                    }
                }
                Ok(Event::End(_)) => {
                    if depth == 2 {
                        if let Some(name) = name.take() {
                            fields.push((name, std::mem::take(&mut value)));
                        }
                    }
                    depth = depth.saturating_sub(1);
                }
                Ok(Event::Eof) => break,
                Ok(_) => {}
                Err(e) => return Err(malformed(format!("invalid XML: {e}"))),
            }
        }

        if !saw_root {
            return Err(malformed("operation document has no root element"));
        }
        Ok(Self { fields, raw_xml: text.to_owned() })
    }

    /// Returns the value of the first field with the given name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields.iter().find(|(n, _)| n == name).map(|(_, v)| v.as_str())
    }

    /// Returns the gateway `status` field.
    #[must_use]
    pub fn status(&self) -> Option<&str> {
        self.get("status")
    }

    /// Returns the gateway `response_description` field.
    #[must_use]
    pub fn response_description(&self) -> Option<&str> {
        self.get("response_description")
    }

    /// Checks whether the gateway reported success.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status() == Some("success")
    }

    /// Iterates over all fields in document order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    /// Returns the raw decoded XML this result was parsed from.
    #[must_use]
    pub fn raw_xml(&self) -> &str {
        &self.raw_xml
    }

    #[cfg(test)]
    pub(crate) fn empty_for_tests() -> Self {
        Self { fields: Vec::new(), raw_xml: String::new() }
    }
}
