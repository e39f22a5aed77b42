//! Envelope digest computation and signature comparison.
//!
//! The gateway authenticates envelopes with a keyed digest: the hash of the
//! byte concatenation (secret, XML, secret), base64-encoded. The legacy
//! protocol uses SHA-1; the algorithm is pluggable so deployments behind a
//! gateway that accepts stronger hashes can opt into SHA-256.

use serde::Deserialize;
use sha1::Sha1;
use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;

/// Hash algorithm for envelope digests.
///
/// # Examples
///
/// ```
/// use liqpay_client::DigestAlgorithm;
///
/// let digest = DigestAlgorithm::Sha1.digest_base64("secret", b"<request></request>");
/// assert!(!digest.is_empty());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DigestAlgorithm {
    /// SHA-1, the legacy wire algorithm. Weak by modern standards but
    /// required for compatibility with the production gateway.
    #[default]
    Sha1,
    /// SHA-256.
    Sha256,
}

impl DigestAlgorithm {
    /// Computes the base64-encoded digest of (secret || xml || secret).
    ///
    /// Deterministic: the same (secret, xml) pair always yields the same
    /// digest.
    #[must_use]
    pub fn digest_base64(self, secret: &str, xml: &[u8]) -> String {
        let digest = match self {
            Self::Sha1 => {
                let mut hasher = Sha1::new();
                hasher.update(secret.as_bytes());
                hasher.update(xml);
                hasher.update(secret.as_bytes());
                hasher.finalize().to_vec()
            }
            Self::Sha256 => {
                let mut hasher = Sha256::new();
                hasher.update(secret.as_bytes());
                hasher.update(xml);
                hasher.update(secret.as_bytes());
                hasher.finalize().to_vec()
            }
        };

        base64::Engine::encode(&base64::engine::general_purpose::STANDARD, digest)
    }
}

/// Signature comparison mode for callback verification.
///
/// The legacy implementation's comparison was defective: a boolean-coercion
/// bug made it accept any non-empty signature, so verification never actually
/// failed. [`SignatureCheck::LegacyPermissive`] reproduces that acceptance
/// behavior for compatibility testing against the live legacy service and is
/// insecure by construction. [`SignatureCheck::Strict`] is the default and
/// compares digests in constant time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignatureCheck {
    /// Constant-time byte comparison of the base64 digests.
    #[default]
    Strict,
    /// Accepts any well-formed signature without comparing it.
    ///
    /// Do not use outside compatibility testing: this mode performs no
    /// authentication whatsoever.
    LegacyPermissive,
}

impl SignatureCheck {
    /// Compares a provided signature against the expected digest.
    #[must_use]
    pub fn matches(self, provided: &str, expected: &str) -> bool {
        match self {
            Self::Strict => bool::from(provided.as_bytes().ct_eq(expected.as_bytes())),
            Self::LegacyPermissive => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digest_deterministic() {
        let a = DigestAlgorithm::Sha1.digest_base64("secret", b"<request><a>1</a></request>");
        let b = DigestAlgorithm::Sha1.digest_base64("secret", b"<request><a>1</a></request>");
        assert_eq!(a, b);
    }

    #[test]
    fn test_digest_sha1_known_value() {
        // SHA-1 of the empty input, base64-encoded.
        let digest = DigestAlgorithm::Sha1.digest_base64("", b"");
        assert_eq!(digest, "2jmj7l5rSw0yVb/vlWAYkK/YBwk=");
    }

    #[test]
    fn test_digest_sha256_known_value() {
        // SHA-256 of the empty input, base64-encoded.
        let digest = DigestAlgorithm::Sha256.digest_base64("", b"");
        assert_eq!(digest, "47DEQpj8HBSa+/TImW+5JCeuQeRkm5NMpJWZG3hSuFU=");
    }

    #[test]
    fn test_digest_changes_with_xml() {
        let a = DigestAlgorithm::Sha1.digest_base64("secret", b"<request><a>1</a></request>");
        let b = DigestAlgorithm::Sha1.digest_base64("secret", b"<request><a>2</a></request>");
        assert_ne!(a, b);
    }

    #[test]
    fn test_digest_changes_with_secret() {
        let a = DigestAlgorithm::Sha1.digest_base64("secret", b"<request></request>");
        let b = DigestAlgorithm::Sha1.digest_base64("tercet", b"<request></request>");
        assert_ne!(a, b);
    }

    #[test]
    fn test_digest_algorithms_differ() {
        let sha1 = DigestAlgorithm::Sha1.digest_base64("secret", b"payload");
        let sha256 = DigestAlgorithm::Sha256.digest_base64("secret", b"payload");
        assert_ne!(sha1, sha256);
    }

    #[test]
    fn test_digest_covers_trailing_secret() {
        // The secret is appended as well as prepended, so a payload that
        // ends with the secret's bytes still digests differently.
        let a = DigestAlgorithm::Sha1.digest_base64("ab", b"cd");
        let b = DigestAlgorithm::Sha1.digest_base64("ab", b"cdab");
        assert_ne!(a, b);
    }

    #[test]
    fn test_strict_check_accepts_equal() {
        assert!(SignatureCheck::Strict.matches("abc123=", "abc123="));
    }

    #[test]
    fn test_strict_check_rejects_mismatch() {
        assert!(!SignatureCheck::Strict.matches("abc123=", "abc124="));
    }

    #[test]
    fn test_strict_check_rejects_length_mismatch() {
        assert!(!SignatureCheck::Strict.matches("abc", "abc123="));
    }

    #[test]
    fn test_legacy_check_accepts_anything() {
        // The legacy comparison never rejects: this is the preserved defect.
        assert!(SignatureCheck::LegacyPermissive.matches("garbage", "abc123="));
        assert!(SignatureCheck::LegacyPermissive.matches("", "abc123="));
    }

    #[test]
    fn test_default_is_strict() {
        assert_eq!(SignatureCheck::default(), SignatureCheck::Strict);
        assert_eq!(DigestAlgorithm::default(), DigestAlgorithm::Sha1);
    }

    #[test]
    fn test_modes_from_toml() {
        #[derive(Deserialize)]
        struct Wrapper {
            digest: DigestAlgorithm,
            signature_check: SignatureCheck,
        }

        let toml = "digest = \"sha256\"\nsignature_check = \"legacy_permissive\"";
        let wrapper: Wrapper = toml::from_str(toml).unwrap();
        assert_eq!(wrapper.digest, DigestAlgorithm::Sha256);
        assert_eq!(wrapper.signature_check, SignatureCheck::LegacyPermissive);
    }
}
