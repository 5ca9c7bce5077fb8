//! Signed Compact Tokens
//!
//! HS256 JSON Web Tokens used as bearer credentials.
//!
//! - Only HS256 is accepted on decode (`alg: none` and others are rejected)
//! - Zero clock leeway: a token is expired as soon as `exp <= now`
//! - Claims are decoded into a caller-chosen type, so a token carrying an
//!   unexpected shape fails as [`TokenError::Malformed`]

use chrono::Utc;
use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, errors::ErrorKind as JwtErrorKind,
};
use serde::{Serialize, de::DeserializeOwned};
use thiserror::Error;

/// Token codec errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    /// Signature does not match the secret
    #[error("Token signature is invalid")]
    InvalidSignature,

    /// `exp` is at or before the current time
    #[error("Token has expired")]
    Expired,

    /// Not a compact JWT, wrong algorithm, or claims of the wrong shape
    #[error("Token is malformed")]
    Malformed,

    /// Claims could not be serialized or signed
    #[error("Token signing failed: {0}")]
    Signing(String),
}

/// Claims that carry an expiry timestamp (seconds since the Unix epoch)
pub trait ExpiringClaims {
    fn expires_at(&self) -> i64;
}

/// Sign `claims` with `secret` as an HS256 compact token
pub fn encode<C: Serialize>(claims: &C, secret: &[u8]) -> Result<String, TokenError> {
    jsonwebtoken::encode(
        &Header::new(Algorithm::HS256),
        claims,
        &EncodingKey::from_secret(secret),
    )
    .map_err(|e| TokenError::Signing(e.to_string()))
}

/// Verify and decode `token` against the current UTC time
pub fn decode<C>(token: &str, secret: &[u8]) -> Result<C, TokenError>
where
    C: DeserializeOwned + ExpiringClaims,
{
    decode_at(token, secret, Utc::now().timestamp())
}

/// Verify and decode `token`, treating `now` as the current Unix time
pub fn decode_at<C>(token: &str, secret: &[u8], now: i64) -> Result<C, TokenError>
where
    C: DeserializeOwned + ExpiringClaims,
{
    let mut validation = Validation::new(Algorithm::HS256);
    validation.leeway = 0;
    // `exp` stays a required claim; the comparison itself happens below
    validation.validate_exp = false;

    let data = jsonwebtoken::decode::<C>(token, &DecodingKey::from_secret(secret), &validation)
        .map_err(|e| match e.kind() {
            JwtErrorKind::InvalidSignature => TokenError::InvalidSignature,
            JwtErrorKind::ExpiredSignature => TokenError::Expired,
            _ => TokenError::Malformed,
        })?;

    if data.claims.expires_at() <= now {
        return Err(TokenError::Expired);
    }

    Ok(data.claims)
}
