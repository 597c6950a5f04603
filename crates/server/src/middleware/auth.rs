//! # Authentication Middleware
//!
//! JWT authentication middleware for protecting API endpoints.

use auth::{extract_bearer_token, validate_token, TokenError};
use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::{IntoResponse, Response},
};
use chrono::{DateTime, TimeZone, Utc};
use error::AppError;

use crate::{revocation::RevocationList, AppState};

/// Token facts carried into handlers after authentication
#[derive(Debug, Clone)]
pub struct AuthContext {
    /// Authenticated user id from the `sub` claim
    pub user_id:    i32,
    /// Token id, needed to revoke the token on logout
    pub jti:        String,
    /// Natural expiry of the token
    pub expires_at: DateTime<Utc>,
}

/// Authentication middleware
///
/// 1. Extracts the Bearer token from the Authorization header
/// 2. Validates the JWT
/// 3. Rejects revoked tokens (failing closed when Redis is unreachable)
/// 4. Adds an [`AuthContext`] to request extensions
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let auth_header = match request.headers().get(header::AUTHORIZATION) {
        Some(value) => {
            match value.to_str() {
                Ok(h) => h,
                Err(_) => {
                    return unauthorized("Invalid authorization header encoding");
                },
            }
        },
        None => {
            return unauthorized("Missing authorization header");
        },
    };

    let token = match extract_bearer_token(auth_header) {
        Some(token) => token,
        None => {
            return unauthorized("Invalid authorization header format");
        },
    };

    let claims = match validate_token(&state.jwt_config, &token) {
        Ok(claims) => claims,
        Err(TokenError::Expired) => {
            return unauthorized("Token has expired");
        },
        Err(TokenError::InvalidSignature) => {
            return unauthorized("Invalid token signature");
        },
        Err(_) => {
            return unauthorized("Invalid token");
        },
    };

    let revocation = RevocationList::new(state.redis.clone());
    match revocation.is_revoked(&claims.jti).await {
        Ok(true) => {
            return unauthorized("Token has been revoked");
        },
        Ok(false) => {},
        Err(e) => {
            // Fail closed: deny when revocation status cannot be verified
            tracing::error!("Failed to check token revocation, denying request: {}", e);
            return unauthorized("Authentication service temporarily unavailable");
        },
    }

    let user_id = match claims.user_id() {
        Ok(id) => id,
        Err(_) => {
            return unauthorized("Invalid token");
        },
    };

    let expires_at = Utc
        .timestamp_opt(claims.exp as i64, 0)
        .single()
        .unwrap_or_else(Utc::now);

    request.extensions_mut().insert(AuthContext {
        user_id,
        jti: claims.jti,
        expires_at,
    });

    next.run(request).await
}

fn unauthorized(message: &str) -> Response { AppError::unauthorized(message).into_response() }
