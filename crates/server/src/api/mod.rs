//! # Request Handlers
//!
//! Inner handlers for every endpoint. These take `&AppState` plus plain
//! arguments instead of axum extractors, so the router wires the transport
//! and the logic stays directly callable.
//!
//! Protected reads follow the 404-then-403 pattern: a missing resource is
//! reported before authorization is evaluated.

use entity::users;
use error::{AppError, Result};

use crate::{middleware::auth::AuthContext, store, AppState};

pub mod auth;
pub mod private_todos;
pub mod sub_tasks;
pub mod team_tasks;
pub mod teams;

/// Resolves the authenticated token to its user row. The token outliving
/// its user is the one case where auth yields a 404.
pub async fn load_current_user(state: &AppState, ctx: &AuthContext) -> Result<users::Model> {
    store::users::find_by_id(&state.db, ctx.user_id)
        .await?
        .ok_or_else(|| AppError::not_found("User not found"))
}

/// Checks that a user referenced by an assignment exists and belongs to
/// the given team. Failures are validation errors, raised before any
/// mutation.
pub async fn ensure_team_assignee(
    state: &AppState,
    team_id: i32,
    user_id: i32,
    message: &str,
) -> Result<()> {
    match store::users::find_by_id(&state.db, user_id).await? {
        Some(user) if user.team_id == Some(team_id) => Ok(()),
        _ => Err(AppError::validation(message)),
    }
}
