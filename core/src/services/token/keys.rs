//! Signing key set for JWT signing and verification

use jsonwebtoken::{DecodingKey, EncodingKey};

use ag_shared::SigningKeyConfig;

use crate::errors::DomainError;

/// One HMAC key with its identifier
#[derive(Clone)]
pub struct SigningKey {
    kid: String,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl SigningKey {
    pub fn from_secret(kid: impl Into<String>, secret: &[u8]) -> Self {
        Self {
            kid: kid.into(),
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
        }
    }

    pub fn kid(&self) -> &str {
        &self.kid
    }

    pub fn encoding_key(&self) -> &EncodingKey {
        &self.encoding_key
    }

    pub fn decoding_key(&self) -> &DecodingKey {
        &self.decoding_key
    }
}

impl std::fmt::Debug for SigningKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SigningKey").field("kid", &self.kid).finish()
    }
}

/// The currently valid keys, newest first
///
/// The first key signs every new token; any key in the set verifies.
/// Rotating keys is a redeploy with a new list: prepend the new key and
/// keep the old one until every token it signed has expired.
#[derive(Clone, Debug)]
pub struct KeySet {
    keys: Vec<SigningKey>,
}

impl KeySet {
    /// Build a key set; fails when `keys` is empty
    pub fn new(keys: Vec<SigningKey>) -> Result<Self, DomainError> {
        if keys.is_empty() {
            return Err(DomainError::Internal {
                message: "Signing key set is empty".to_string(),
            });
        }
        Ok(Self { keys })
    }

    pub fn from_config(keys: &[SigningKeyConfig]) -> Result<Self, DomainError> {
        Self::new(
            keys.iter()
                .map(|k| SigningKey::from_secret(k.kid.clone(), k.secret.as_bytes()))
                .collect(),
        )
    }

    /// The key new tokens are signed with
    pub fn signing_key(&self) -> &SigningKey {
        // `new` guarantees at least one key
        &self.keys[0]
    }

    /// Look up a verification key by its identifier
    pub fn find(&self, kid: &str) -> Option<&SigningKey> {
        self.keys.iter().find(|k| k.kid == kid)
    }

    pub fn key_ids(&self) -> Vec<&str> {
        self.keys.iter().map(|k| k.kid.as_str()).collect()
    }
}
