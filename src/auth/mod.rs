use std::env;

use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The only claim carried by issued tokens. No expiry is set or enforced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    #[serde(default)]
    pub sub: String,
}

impl Claims {
    pub fn new(username: impl Into<String>) -> Self {
        Self { sub: username.into() }
    }
}

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("provide your token using the Authorization header and Bearer schema.")]
    MissingHeader,

    #[error("Authorization header must look like `Bearer <token>`")]
    MalformedHeader,

    #[error("Invalid token: {0}")]
    InvalidToken(#[source] jsonwebtoken::errors::Error),

    #[error("Token secret is not configured: {0}")]
    MissingSecret(String),

    #[error("JWT generation error: {0}")]
    Signing(#[source] jsonwebtoken::errors::Error),
}

/// Where the HMAC secret comes from
#[derive(Debug, Clone)]
pub enum SecretSource {
    /// Re-read from this environment variable on every call
    Env(String),
    Fixed(Vec<u8>),
}

impl SecretSource {
    pub fn load(&self) -> Result<Vec<u8>, AuthError> {
        match self {
            SecretSource::Env(var) => match env::var(var) {
                Ok(value) if !value.is_empty() => Ok(value.into_bytes()),
                _ => Err(AuthError::MissingSecret(format!("{var} is unset or empty"))),
            },
            SecretSource::Fixed(bytes) if bytes.is_empty() => {
                Err(AuthError::MissingSecret("empty secret".to_string()))
            }
            SecretSource::Fixed(bytes) => Ok(bytes.clone()),
        }
    }
}

/// Sign an HS256 token for `username`. No credential check happens here or
/// anywhere upstream.
pub fn issue_token(username: &str, secret: &[u8]) -> Result<String, AuthError> {
    let encoding_key = EncodingKey::from_secret(secret);
    encode(&Header::new(Algorithm::HS256), &Claims::new(username), &encoding_key)
        .map_err(AuthError::Signing)
}

/// Verify algorithm family and signature. Claim content and token age are
/// not checked.
pub fn validate_token(token: &str, secret: &[u8]) -> Result<Claims, AuthError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.algorithms = vec![Algorithm::HS256, Algorithm::HS384, Algorithm::HS512];
    validation.required_spec_claims.clear();
    validation.validate_exp = false;
    validation.validate_aud = false;

    decode::<Claims>(token, &DecodingKey::from_secret(secret), &validation)
        .map(|data| data.claims)
        .map_err(AuthError::InvalidToken)
}

/// Pull the token out of an `Authorization` header value.
///
/// The value must be exactly two whitespace-separated parts, the first being
/// `Bearer` in any case.
pub fn bearer_token(header: Option<&str>) -> Result<&str, AuthError> {
    let value = header
        .filter(|v| !v.trim().is_empty())
        .ok_or(AuthError::MissingHeader)?;

    let mut parts = value.split_whitespace();
    match (parts.next(), parts.next(), parts.next()) {
        (Some(scheme), Some(token), None) if scheme.eq_ignore_ascii_case("bearer") => Ok(token),
        _ => Err(AuthError::MalformedHeader),
    }
}
