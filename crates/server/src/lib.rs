//! # Taskish API Server
//!
//! Axum-based HTTP API server for the Taskish task-management backend.
//!
//! ## Modules
//!
//! - [`api`]: Request handlers for auth, todos, tasks, and teams
//! - [`dto`]: Request/response data transfer objects
//! - [`middleware`]: JWT authentication middleware
//! - [`router`]: API route configuration
//! - [`store`]: Persistence layer over Sea-ORM
//! - [`progress`]: Derived task progress calculation
//! - [`revocation`]: Redis-backed token revocation list

pub mod api;
pub mod dto;
pub mod middleware;
pub mod progress;
pub mod revocation;
pub mod router;
pub mod store;
pub mod validation;

pub use router::create_app_router;

use ::auth::JwtConfig;

/// Application state shared across request handlers
#[derive(Clone, Debug)]
pub struct AppState {
    /// Database connection pool
    pub db:         sea_orm::DbConn,
    /// JWT configuration
    pub jwt_config: JwtConfig,
    /// Redis connection for token revocation
    pub redis:      redis::Client,
}
