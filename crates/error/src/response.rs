//! # API Response Types
//!
//! The JSON envelope shared by every endpoint.
//!
//! ## Response Format
//!
//! ```json
//! { "success": true, "data": { ... }, "message": "..." }
//! { "success": false, "error": { "message": "...", "code": 403, "details": { ... } } }
//! ```

use axum::{
    body::Body,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::AppError;

/// Success envelope. `data` and `message` are both optional so that
/// message-only responses (logout, deletes) serialize without noise.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ApiResponse<T> {
    /// Always `true` for this envelope.
    pub success: bool,

    /// Response payload.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,

    /// Human-readable status message.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> ApiResponse<T> {
    /// Create a success response with data.
    #[inline]
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
        }
    }

    /// Create a success response with data and a message.
    #[inline]
    pub fn with_message(data: T, message: impl ToString) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: Some(message.to_string()),
        }
    }
}

impl ApiResponse<()> {
    /// Create a message-only success response.
    #[inline]
    pub fn message(message: impl ToString) -> Self {
        Self {
            success: true,
            data: None,
            message: Some(message.to_string()),
        }
    }
}

/// Inner error object of the error envelope.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorBody {
    /// Human-readable error message.
    pub message: String,

    /// Numeric error code, identical to the HTTP status.
    pub code: u16,

    /// Optional per-field error map.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

/// Error envelope.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorEnvelope {
    /// Always `false` for this envelope.
    pub success: bool,

    /// Error detail.
    pub error: ErrorBody,
}

impl ErrorEnvelope {
    /// Build the envelope for an application error.
    pub fn from_error(err: &AppError) -> Self {
        Self {
            success: false,
            error: ErrorBody {
                message: err.public_message(),
                code: err.status().as_u16(),
                details: err.details().cloned(),
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        // Server-side faults keep their detail in the logs only.
        if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(error = %self, "Request failed with internal error");
        }

        let envelope = ErrorEnvelope::from_error(&self);
        let mut res = (status, Json(envelope)).into_response();

        if status == StatusCode::UNAUTHORIZED {
            res.headers_mut()
                .insert(header::WWW_AUTHENTICATE, "Bearer".parse().expect("static header"));
        }

        res
    }
}

/// Convert a raw body into the standard 400 envelope. Used for JSON body
/// rejections where no `AppError` exists yet.
pub fn bad_request_body(message: impl ToString) -> Response {
    AppError::bad_request(message).into_response()
}

/// Minimal response helper for plain-text routes (health checks).
pub fn plain_text(body: &'static str) -> Response {
    Response::builder()
        .status(StatusCode::OK)
        .header("Content-Type", "text/plain")
        .body(Body::from(body))
        .expect("static response")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_serialization() {
        let response = ApiResponse::ok(vec![1, 2, 3]);
        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("\"success\":true"));
        assert!(json.contains("\"data\":[1,2,3]"));
        assert!(!json.contains("message"));
    }

    #[test]
    fn test_success_with_message() {
        let response = ApiResponse::with_message(serde_json::json!({"id": 1}), "Todo created successfully");
        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("\"message\":\"Todo created successfully\""));
    }

    #[test]
    fn test_message_only_omits_data() {
        let response = ApiResponse::message("Logout successful");
        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("\"success\":true"));
        assert!(!json.contains("data"));
    }

    #[test]
    fn test_error_envelope_code_matches_status() {
        let err = AppError::forbidden("Access denied");
        let envelope = ErrorEnvelope::from_error(&err);
        assert!(!envelope.success);
        assert_eq!(envelope.error.code, 403);
        assert_eq!(envelope.error.message, "Access denied");
        assert!(envelope.error.details.is_none());
    }

    #[test]
    fn test_error_envelope_with_details() {
        let err = AppError::validation_fields(
            "Validation failed",
            serde_json::json!({"name": "Name must be at least 2 characters"}),
        );
        let envelope = ErrorEnvelope::from_error(&err);
        assert_eq!(envelope.error.code, 400);
        assert_eq!(
            envelope.error.details.unwrap()["name"],
            "Name must be at least 2 characters"
        );
    }

    #[test]
    fn test_error_envelope_serialization() {
        let err = AppError::conflict("Email already registered");
        let envelope = ErrorEnvelope::from_error(&err);
        let json = serde_json::to_string(&envelope).unwrap();
        assert!(json.contains("\"success\":false"));
        assert!(json.contains("\"code\":409"));
        assert!(json.contains("\"message\":\"Email already registered\""));
    }

    #[test]
    fn test_into_response_status() {
        let res = AppError::not_found("Task not found").into_response();
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_unauthorized_response_sets_challenge_header() {
        let res = AppError::unauthorized("Token has been revoked").into_response();
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            res.headers().get(header::WWW_AUTHENTICATE).unwrap(),
            "Bearer"
        );
    }

    #[test]
    fn test_internal_error_body_is_generic() {
        let err = AppError::database("secret connection string leaked");
        let envelope = ErrorEnvelope::from_error(&err);
        assert_eq!(envelope.error.message, "Internal server error");
        assert_eq!(envelope.error.code, 500);
    }
}
