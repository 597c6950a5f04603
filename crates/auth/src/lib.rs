//! # Authentication & Authorization Primitives
//!
//! Self-contained building blocks for the Taskish credential and access
//! control layers:
//! - Argon2id password hashing and verification
//! - JWT access token issuance and validation
//! - Stateless access-control policy predicates

pub mod jwt;
pub mod password;
pub mod policy;

pub use jwt::{create_access_token, extract_bearer_token, validate_token, Claims, JwtConfig, TokenError};
pub use password::{hash_password, verify_password, PasswordError};
pub use policy::{
    ensure_admin,
    ensure_assignee_or_admin,
    ensure_owner,
    ensure_responsible_or_admin,
    ensure_team_member,
    PolicyError,
};
pub use secrecy;
