//! # Taskish Error Infrastructure
//!
//! Error types and API response handling for the Taskish application.

pub mod response;

pub use response::{ApiResponse, ErrorBody, ErrorEnvelope};

/// Convenience type alias for Result with AppError.
pub type Result<T, E = AppError> = std::result::Result<T, E>;

/// Main application error type.
///
/// Each variant maps to exactly one HTTP status code; the numeric code is
/// repeated inside the response envelope so clients never have to look at
/// transport headers to branch on it.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("NotFound: {message}")]
    NotFound { message: String },

    #[error("BadRequest: {message}")]
    BadRequest { message: String },

    #[error("Unauthorized: {message}")]
    Unauthorized { message: String },

    #[error("Forbidden: {message}")]
    Forbidden { message: String },

    #[error("Conflict: {message}")]
    Conflict { message: String },

    #[error("Validation: {message}")]
    Validation {
        message: String,
        /// Optional per-field error map, e.g. `{"email": "Invalid email format"}`.
        details: Option<serde_json::Value>,
    },

    #[error("Internal: {message}")]
    Internal { message: String },

    #[error("Database: {message}")]
    Database { message: String },

    #[error("Config: {message}")]
    Config { message: String },

    #[error("IO: {message}")]
    Io { message: String },
}

impl AppError {
    /// Create a not found error.
    #[inline]
    pub fn not_found(message: impl ToString) -> Self {
        Self::NotFound {
            message: message.to_string(),
        }
    }

    /// Create a bad request error.
    #[inline]
    pub fn bad_request(message: impl ToString) -> Self {
        Self::BadRequest {
            message: message.to_string(),
        }
    }

    /// Create an unauthorized error.
    #[inline]
    pub fn unauthorized(message: impl ToString) -> Self {
        Self::Unauthorized {
            message: message.to_string(),
        }
    }

    /// Create a forbidden error.
    #[inline]
    pub fn forbidden(message: impl ToString) -> Self {
        Self::Forbidden {
            message: message.to_string(),
        }
    }

    /// Create a conflict error.
    #[inline]
    pub fn conflict(message: impl ToString) -> Self {
        Self::Conflict {
            message: message.to_string(),
        }
    }

    /// Create a validation error with a single message.
    #[inline]
    pub fn validation(message: impl ToString) -> Self {
        Self::Validation {
            message: message.to_string(),
            details: None,
        }
    }

    /// Create a validation error carrying a per-field detail map.
    #[inline]
    pub fn validation_fields(message: impl ToString, details: serde_json::Value) -> Self {
        Self::Validation {
            message: message.to_string(),
            details: Some(details),
        }
    }

    /// Create an internal error.
    #[inline]
    pub fn internal(message: impl ToString) -> Self {
        Self::Internal {
            message: message.to_string(),
        }
    }

    /// Create a database error.
    #[inline]
    pub fn database(message: impl ToString) -> Self {
        Self::Database {
            message: message.to_string(),
        }
    }

    /// Create a config error.
    #[inline]
    pub fn config(message: impl ToString) -> Self {
        Self::Config {
            message: message.to_string(),
        }
    }

    /// Get the HTTP status code.
    pub fn status(&self) -> http::StatusCode {
        match self {
            AppError::NotFound { .. } => http::StatusCode::NOT_FOUND,
            AppError::BadRequest { .. } => http::StatusCode::BAD_REQUEST,
            AppError::Unauthorized { .. } => http::StatusCode::UNAUTHORIZED,
            AppError::Forbidden { .. } => http::StatusCode::FORBIDDEN,
            AppError::Conflict { .. } => http::StatusCode::CONFLICT,
            AppError::Validation { .. } => http::StatusCode::BAD_REQUEST,
            AppError::Internal { .. } => http::StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Database { .. } => http::StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Config { .. } => http::StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Io { .. } => http::StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the client-facing error message.
    ///
    /// Server-side faults (database, IO, config, internal) are collapsed to a
    /// generic message; the detail is logged, never leaked.
    pub fn public_message(&self) -> String {
        match self {
            AppError::NotFound { message }
            | AppError::BadRequest { message }
            | AppError::Unauthorized { message }
            | AppError::Forbidden { message }
            | AppError::Conflict { message }
            | AppError::Validation { message, .. } => message.clone(),
            AppError::Internal { .. }
            | AppError::Database { .. }
            | AppError::Config { .. }
            | AppError::Io { .. } => "Internal server error".to_string(),
        }
    }

    /// Get the validation detail map, if any.
    pub fn details(&self) -> Option<&serde_json::Value> {
        match self {
            AppError::Validation { details, .. } => details.as_ref(),
            _ => None,
        }
    }
}

/// Convert anyhow errors to AppError.
impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal {
            message: err.to_string(),
        }
    }
}

/// Convert std::io errors to AppError.
impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: err.to_string(),
        }
    }
}

/// Convert Sea-ORM database errors to AppError.
impl From<sea_orm::DbErr> for AppError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database {
            message: err.to_string(),
        }
    }
}

/// Convert Redis errors to AppError.
impl From<redis::RedisError> for AppError {
    fn from(err: redis::RedisError) -> Self {
        Self::Internal {
            message: format!("Redis error: {}", err),
        }
    }
}

/// Convert validator validation errors to AppError.
impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        let messages: Vec<String> = err
            .field_errors()
            .iter()
            .flat_map(|(_, errors)| {
                errors
                    .iter()
                    .map(|e| {
                        e.message
                            .as_ref()
                            .map(|s| s.to_string())
                            .unwrap_or_else(|| "Invalid value".to_string())
                    })
                    .collect::<Vec<_>>()
            })
            .collect();

        let message = if messages.is_empty() {
            "Validation failed".to_string()
        }
        else {
            messages.join(", ")
        };

        Self::Validation {
            message,
            details: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_not_found() {
        let err = AppError::not_found("Todo not found");
        assert_eq!(err.status(), http::StatusCode::NOT_FOUND);
        assert_eq!(err.public_message(), "Todo not found");
    }

    #[test]
    fn test_error_unauthorized() {
        let err = AppError::unauthorized("Invalid email or password");
        assert_eq!(err.status(), http::StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_error_forbidden() {
        let err = AppError::forbidden("Access denied");
        assert_eq!(err.status(), http::StatusCode::FORBIDDEN);
    }

    #[test]
    fn test_error_conflict() {
        let err = AppError::conflict("Email already registered");
        assert_eq!(err.status(), http::StatusCode::CONFLICT);
    }

    #[test]
    fn test_validation_maps_to_400() {
        let err = AppError::validation("Title must be less than 255 characters");
        assert_eq!(err.status(), http::StatusCode::BAD_REQUEST);
        assert!(err.details().is_none());
    }

    #[test]
    fn test_validation_field_details() {
        let details = serde_json::json!({"email": "Invalid email format"});
        let err = AppError::validation_fields("Validation failed", details.clone());
        assert_eq!(err.status(), http::StatusCode::BAD_REQUEST);
        assert_eq!(err.details(), Some(&details));
    }

    #[test]
    fn test_internal_detail_never_leaks() {
        let err = AppError::database("connection refused at 10.0.0.3:5432");
        assert_eq!(err.status(), http::StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.public_message(), "Internal server error");
    }

    #[test]
    fn test_from_anyhow() {
        let err: AppError = anyhow::anyhow!("boom").into();
        assert_eq!(err.status(), http::StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: AppError = io_err.into();
        assert_eq!(err.status(), http::StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_from_validation_errors() {
        use validator::Validate;

        #[derive(Validate)]
        struct TestStruct {
            #[validate(length(min = 1, message = "Password is required"))]
            value: String,
        }

        let s = TestStruct {
            value: String::new(),
        };
        let errors = s.validate().unwrap_err();
        let err: AppError = errors.into();

        assert_eq!(err.status(), http::StatusCode::BAD_REQUEST);
        assert!(err.public_message().contains("Password is required"));
    }
}
