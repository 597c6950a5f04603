//! JWT access token management.
//!
//! Tokens are self-contained HS256 bearer credentials: the subject carries
//! the user id, `jti` uniquely identifies the token for revocation, and no
//! server-side lookup is needed beyond the revocation check.

use std::{
    collections::HashSet,
    time::{Duration, SystemTime},
};

use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from token creation and validation.
#[derive(Debug, Error)]
pub enum TokenError {
    #[error("Token has expired")]
    Expired,

    #[error("Invalid token signature")]
    InvalidSignature,

    #[error("Invalid token")]
    Invalid,

    #[error("Token encoding failed: {0}")]
    Encoding(String),
}

/// JWT configuration.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// Signing secret (raw bytes).
    pub secret: String,
    /// Token lifetime in seconds.
    pub expiration_seconds: u64,
    /// Token issuer.
    pub issuer: String,
}

impl JwtConfig {
    /// 24-hour tokens issued as `taskish`.
    pub fn new(secret: impl ToString) -> Self {
        Self {
            secret: secret.to_string(),
            expiration_seconds: 24 * 60 * 60,
            issuer: "taskish".to_string(),
        }
    }
}

/// JWT claims structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user id as string).
    pub sub: String,

    /// Token issuer.
    pub iss: String,

    /// Expiration time (Unix timestamp).
    pub exp: u64,

    /// Issued at (Unix timestamp).
    pub iat: u64,

    /// Unique token id, used as the revocation key.
    pub jti: String,
}

impl Claims {
    /// Parse the subject back into a user id.
    pub fn user_id(&self) -> Result<i32, TokenError> {
        self.sub.parse().map_err(|_| TokenError::Invalid)
    }
}

/// Creates a new signed access token for a user.
///
/// # Errors
///
/// Returns an error if the system clock is unavailable or encoding fails.
pub fn create_access_token(config: &JwtConfig, user_id: i32) -> Result<String, TokenError> {
    let now = SystemTime::now()
        .duration_since(SystemTime::UNIX_EPOCH)
        .map_err(|e| TokenError::Encoding(format!("Failed to get current time: {}", e)))?;

    let issued_at = now.as_secs();
    let expires_at = (now + Duration::from_secs(config.expiration_seconds)).as_secs();

    let claims = Claims {
        sub: user_id.to_string(),
        iss: config.issuer.clone(),
        exp: expires_at,
        iat: issued_at,
        jti: cuid2::create_id(),
    };

    jsonwebtoken::encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
    .map_err(|e| TokenError::Encoding(e.to_string()))
}

/// Validates a token and returns its claims.
///
/// # Errors
///
/// Maps expiry and signature failures to their own variants so callers can
/// produce precise 401 messages.
pub fn validate_token(config: &JwtConfig, token: &str) -> Result<Claims, TokenError> {
    let mut validation = Validation::default();
    let mut issuers = HashSet::new();
    issuers.insert(config.issuer.clone());
    validation.iss = Some(issuers);
    validation.validate_exp = true;

    let decoded = jsonwebtoken::decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &validation,
    )
    .map_err(|e| {
        match e.kind() {
            jsonwebtoken::errors::ErrorKind::ExpiredSignature => TokenError::Expired,
            jsonwebtoken::errors::ErrorKind::InvalidSignature => TokenError::InvalidSignature,
            _ => TokenError::Invalid,
        }
    })?;

    Ok(decoded.claims)
}

/// Extracts the Bearer token from an Authorization header value.
pub fn extract_bearer_token(auth_header: &str) -> Option<String> {
    if !auth_header.starts_with("Bearer ") {
        return None;
    }

    let token = auth_header.trim_start_matches("Bearer ").trim();

    if token.is_empty() {
        return None;
    }

    Some(token.to_string())
}
