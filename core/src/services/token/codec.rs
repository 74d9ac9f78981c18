//! JWT encoding and decoding against the signing key set

use chrono::Utc;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, decode_header, encode, Algorithm, Header, Validation};

use crate::domain::entities::token::{Claims, TokenType};
use crate::errors::TokenError;

use super::keys::KeySet;

/// Tolerated clock difference between workers for `nbf`, in seconds
pub const DEFAULT_CLOCK_SKEW_SECS: i64 = 30;

/// Signs and verifies session tokens
///
/// Expiry is checked here rather than by `jsonwebtoken` so that the
/// boundary is exact (`now >= exp` is expired, no leeway) and so that
/// logout can still read a stale token. `nbf` alone gets a skew
/// allowance, since another worker's clock may run slightly ahead.
#[derive(Debug, Clone)]
pub struct TokenCodec {
    keys: KeySet,
    issuer: String,
    audience: String,
    validation: Validation,
    clock_skew_secs: i64,
}

impl TokenCodec {
    pub fn new(keys: KeySet, issuer: impl Into<String>, audience: impl Into<String>) -> Self {
        let issuer = issuer.into();
        let audience = audience.into();

        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.validate_exp = false;
        validation.validate_nbf = false;
        validation.set_issuer(&[issuer.as_str()]);
        validation.set_audience(&[audience.as_str()]);
        validation.set_required_spec_claims(&["exp", "iss", "aud", "sub"]);

        Self {
            keys,
            issuer,
            audience,
            validation,
            clock_skew_secs: DEFAULT_CLOCK_SKEW_SECS,
        }
    }

    /// Override the `nbf` skew allowance; negative values count as zero
    pub fn with_clock_skew(mut self, secs: i64) -> Self {
        self.clock_skew_secs = secs.max(0);
        self
    }

    pub fn keys(&self) -> &KeySet {
        &self.keys
    }

    /// Encode a signed token
    ///
    /// `ttl_secs` may be zero, which yields a token that is already expired.
    pub fn encode(
        &self,
        subject: &str,
        token_type: TokenType,
        session_id: &str,
        token_id: &str,
        ttl_secs: i64,
    ) -> Result<String, TokenError> {
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: subject.to_string(),
            sid: session_id.to_string(),
            jti: token_id.to_string(),
            typ: token_type,
            iat: now,
            nbf: now,
            exp: now + ttl_secs,
            iss: self.issuer.clone(),
            aud: self.audience.clone(),
        };

        let signing_key = self.keys.signing_key();
        let mut header = Header::new(Algorithm::HS256);
        header.kid = Some(signing_key.kid().to_string());

        encode(&header, &claims, signing_key.encoding_key()).map_err(|e| {
            tracing::error!(error = %e, "Failed to sign token");
            TokenError::GenerationFailed
        })
    }

    /// Sign a throwaway token with the current key and read it back
    ///
    /// Used by the health endpoint; touches no store.
    pub fn self_check(&self) -> Result<(), TokenError> {
        let token = self.encode(
            "health-check",
            TokenType::Access,
            "health-check",
            "health-check",
            60,
        )?;
        let claims = self.decode_ignoring_expiry(&token)?;
        if claims.sub != "health-check" {
            return Err(TokenError::Malformed);
        }
        Ok(())
    }

    /// Decode a token of any type, rejecting expired ones
    pub fn decode(&self, token: &str) -> Result<Claims, TokenError> {
        let claims = self.decode_ignoring_expiry(token)?;
        if claims.is_expired_at(Utc::now().timestamp()) {
            return Err(TokenError::Expired);
        }
        Ok(claims)
    }

    /// Decode a token that must be of `expected` type
    ///
    /// The type is checked last: an expired token of the wrong type is
    /// reported as `Expired`.
    pub fn decode_expecting(&self, token: &str, expected: TokenType) -> Result<Claims, TokenError> {
        let claims = self.decode(token)?;
        if claims.typ != expected {
            return Err(TokenError::WrongTokenType {
                expected,
                found: claims.typ,
            });
        }
        Ok(claims)
    }

    /// Verify signature and structure but accept expired tokens
    pub fn decode_ignoring_expiry(&self, token: &str) -> Result<Claims, TokenError> {
        let token = token.trim();
        if token.is_empty() {
            return Err(TokenError::Missing);
        }

        let header = decode_header(token).map_err(|_| TokenError::Malformed)?;
        if header.alg != Algorithm::HS256 {
            return Err(TokenError::InvalidSignature);
        }
        let key = header
            .kid
            .as_deref()
            .and_then(|kid| self.keys.find(kid))
            .ok_or(TokenError::InvalidSignature)?;

        let data = decode::<Claims>(token, key.decoding_key(), &self.validation)
            .map_err(|e| map_decode_error(e.kind()))?;
        let claims = data.claims;

        if claims.nbf > Utc::now().timestamp() + self.clock_skew_secs {
            return Err(TokenError::Malformed);
        }
        if claims.sub.is_empty() || claims.sid.is_empty() || claims.jti.is_empty() {
            return Err(TokenError::Malformed);
        }
        Ok(claims)
    }
}

fn map_decode_error(kind: &ErrorKind) -> TokenError {
    match kind {
        ErrorKind::InvalidSignature
        | ErrorKind::InvalidAlgorithm
        | ErrorKind::InvalidAlgorithmName
        | ErrorKind::InvalidKeyFormat => TokenError::InvalidSignature,
        ErrorKind::ExpiredSignature => TokenError::Expired,
        _ => TokenError::Malformed,
    }
}
