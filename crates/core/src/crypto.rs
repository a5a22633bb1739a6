//! Credential decryption seam.
//!
//! Clinics may carry encrypted database credentials. The cache layer never knows the cipher; it
//! hands the bytes to a [`CredentialDecryptor`] supplied by the deployment. Without one, the bytes
//! are kept base64-encoded so the value is still printable.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

pub type DecryptError = Box<dyn std::error::Error + Send + Sync>;

/// Turns encrypted credential bytes into their plaintext form.
pub trait CredentialDecryptor: Send + Sync {
    fn decrypt_string(&self, bytes: &[u8]) -> Result<String, DecryptError>;
}

/// Base64 rendering used when no decryptor is configured.
pub fn encode_base64(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}

/// Serde adapter for optional byte fields stored as base64 text.
pub(crate) mod base64_bytes {
    use base64::engine::general_purpose::STANDARD;
    use base64::Engine;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Option<Vec<u8>>, serializer: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(bytes) => serializer.serialize_some(&STANDARD.encode(bytes)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Vec<u8>>, D::Error> {
        let encoded: Option<String> = Option::deserialize(deserializer)?;
        encoded
            .map(|text| STANDARD.decode(text.trim()).map_err(serde::de::Error::custom))
            .transpose()
    }
}
