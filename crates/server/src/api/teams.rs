//! # Team Handlers

use auth::ensure_team_member;
use axum::Json;
use error::{ApiResponse, AppError, Result};

use crate::{
    api::load_current_user,
    dto::users::UserSummary,
    middleware::auth::AuthContext,
    store,
    AppState,
};

/// Lists the members of a team. Only members of that team may look.
pub async fn list_team_users_inner(
    state: &AppState,
    ctx: AuthContext,
    team_id: i32,
) -> Result<Json<ApiResponse<Vec<UserSummary>>>> {
    let user = load_current_user(state, &ctx).await?;

    let team = store::teams::find_by_id(&state.db, team_id)
        .await?
        .ok_or_else(|| AppError::not_found("Team not found"))?;

    ensure_team_member(user.team_id, team.id).map_err(AppError::forbidden)?;

    let members = store::users::list_by_team(&state.db, team.id).await?;

    Ok(Json(ApiResponse::ok(
        members.into_iter().map(UserSummary::from).collect(),
    )))
}
