//! # Authentication Data Transfer Objects
//!
//! Request and response types for authentication endpoints.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::dto::users::UserResponse;

/// Request body for user registration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RegisterRequest {
    /// Display name
    pub name: String,

    /// Email address (case-insensitive unique)
    pub email: String,

    /// Plaintext password, hashed before storage
    pub password: String,
}

/// Request body for user login
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Validate)]
pub struct LoginRequest {
    /// User's email address
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    /// User's password
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Response body for register and login
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthResponse {
    /// Authenticated user, including team
    pub user: UserResponse,

    /// JWT bearer token for subsequent requests
    pub access_token: String,
}
