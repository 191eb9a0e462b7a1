use crate::error::{LedgerError, Result};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// An opaque identity asserted by a caller and bound to an entity at creation.
///
/// The engine never inspects the bytes. It only hands pairs of tokens to an
/// [`IdentityVerifier`].
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct IdentityToken(Vec<u8>);

impl IdentityToken {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }

    /// Decodes a token from its transport encoding (standard base64).
    ///
    /// Empty tokens are rejected: a row bound to an empty identity would be
    /// structurally invalid on every later lookup.
    pub fn from_base64(field: &str, encoded: &str) -> Result<Self> {
        let bytes = STANDARD
            .decode(encoded)
            .map_err(|e| LedgerError::validation(format!("Failed decoding {field}: {e}")))?;
        if bytes.is_empty() {
            return Err(LedgerError::validation(format!(
                "Identity for {field} is empty"
            )));
        }
        Ok(Self(bytes))
    }

    pub fn to_base64(&self) -> String {
        STANDARD.encode(&self.0)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for IdentityToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "IdentityToken({})", self.to_base64())
    }
}

impl Serialize for IdentityToken {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_base64())
    }
}

// Stored rows may legitimately carry an empty token; the engine rejects them
// on lookup, so decoding here must not.
impl<'de> Deserialize<'de> for IdentityToken {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let encoded = String::deserialize(deserializer)?;
        STANDARD
            .decode(encoded)
            .map(Self)
            .map_err(serde::de::Error::custom)
    }
}

/// Decides whether a presented proof establishes possession of a bound identity.
///
/// `claimed` is the identity recorded on the entity, `proof` is what the caller
/// presented for this operation.
pub trait IdentityVerifier: Send + Sync {
    fn verify(&self, claimed: &IdentityToken, proof: &IdentityToken) -> bool;
}

pub type IdentityVerifierBox = Box<dyn IdentityVerifier>;

/// Byte-for-byte comparison of the presented token against the bound one.
#[derive(Debug, Default, Clone, Copy)]
pub struct ByteEqualityVerifier;

impl IdentityVerifier for ByteEqualityVerifier {
    fn verify(&self, claimed: &IdentityToken, proof: &IdentityToken) -> bool {
        claimed.as_bytes() == proof.as_bytes()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_standard_base64() {
        let token = IdentityToken::from_base64("buyer", "YnV5ZXI=").unwrap();
        assert_eq!(token.as_bytes(), b"buyer");
        assert_eq!(token.to_base64(), "YnV5ZXI=");
    }

    #[test]
    fn test_decode_rejects_garbage() {
        let result = IdentityToken::from_base64("buyer", "not base64!");
        assert!(matches!(result, Err(LedgerError::ValidationError(_))));
    }

    #[test]
    fn test_decode_rejects_empty() {
        let result = IdentityToken::from_base64("payer", "");
        assert!(matches!(result, Err(LedgerError::ValidationError(_))));
    }

    #[test]
    fn test_byte_equality_verifier() {
        let verifier = ByteEqualityVerifier;
        let bound = IdentityToken::new(b"B".to_vec());
        assert!(verifier.verify(&bound, &IdentityToken::new(b"B".to_vec())));
        assert!(!verifier.verify(&bound, &IdentityToken::new(b"X".to_vec())));
        assert!(!verifier.verify(&bound, &IdentityToken::new(b"BB".to_vec())));
    }

    #[test]
    fn test_serde_uses_base64_text() {
        let token = IdentityToken::new(vec![0u8, 1, 2, 255]);
        let json = serde_json::to_string(&token).unwrap();
        assert_eq!(json, "\"AAEC/w==\"");
        let back: IdentityToken = serde_json::from_str(&json).unwrap();
        assert_eq!(back, token);
    }
}
