//! # Sub-Task Handlers
//!
//! Sub-tasks live under a team task and inherit its team scope. Mutations
//! are admin-only except status updates, which the responsible user may
//! also perform.

use auth::{ensure_admin, ensure_responsible_or_admin, ensure_team_member};
use axum::Json;
use entity::{sub_tasks, team_tasks, TaskStatus};
use error::{ApiResponse, AppError, Result};

use crate::{
    api::{ensure_team_assignee, load_current_user},
    dto::{
        sub_tasks::{CreateSubTaskRequest, SubTaskResponse, UpdateSubTaskRequest},
        UpdateStatusRequest,
    },
    middleware::auth::AuthContext,
    store::{
        self,
        sub_tasks::{NewSubTask, SubTaskPatch},
    },
    validation,
    AppState,
};

const RESPONSIBLE_NOT_IN_TEAM: &str = "Responsible user must be a member of the team";

/// Loads the parent task and checks the actor can see it. The sub-task id,
/// when given, must belong to that parent.
async fn load_scoped_task(
    state: &AppState,
    actor_team_id: Option<i32>,
    task_id: i32,
) -> Result<team_tasks::Model> {
    let task = store::team_tasks::find_by_id(&state.db, task_id)
        .await?
        .ok_or_else(|| AppError::not_found("Task not found"))?;

    ensure_team_member(actor_team_id, task.team_id).map_err(AppError::forbidden)?;

    Ok(task)
}

async fn load_scoped_sub_task(state: &AppState, task: &team_tasks::Model, sub_task_id: i32) -> Result<sub_tasks::Model> {
    let sub_task = store::sub_tasks::find_by_id(&state.db, sub_task_id)
        .await?
        .filter(|s| s.team_task_id == task.id)
        .ok_or_else(|| AppError::not_found("Sub-task not found"))?;

    Ok(sub_task)
}

pub async fn list_sub_tasks_inner(
    state: &AppState,
    ctx: AuthContext,
    task_id: i32,
) -> Result<Json<ApiResponse<Vec<SubTaskResponse>>>> {
    let user = load_current_user(state, &ctx).await?;
    let task = load_scoped_task(state, user.team_id, task_id).await?;

    let sub_tasks = store::sub_tasks::list_by_task(&state.db, task.id).await?;

    Ok(Json(ApiResponse::ok(
        sub_tasks.into_iter().map(SubTaskResponse::from).collect(),
    )))
}

pub async fn create_sub_task_inner(
    state: &AppState,
    ctx: AuthContext,
    task_id: i32,
    req: CreateSubTaskRequest,
) -> Result<Json<ApiResponse<SubTaskResponse>>> {
    let user = load_current_user(state, &ctx).await?;
    let task = load_scoped_task(state, user.team_id, task_id).await?;

    ensure_admin(user.role.is_admin()).map_err(AppError::forbidden)?;
    validation::validate_title(&req.title).map_err(AppError::validation)?;

    let status = match &req.status {
        Some(raw) => {
            validation::parse_status::<TaskStatus>(raw, TaskStatus::VALUES).map_err(AppError::validation)?
        },
        None => TaskStatus::Todo,
    };

    if let Some(responsible_id) = req.responsible_user_id {
        ensure_team_assignee(state, task.team_id, responsible_id, RESPONSIBLE_NOT_IN_TEAM).await?;
    }

    let sub_task = store::sub_tasks::create_sub_task(
        &state.db,
        NewSubTask {
            team_task_id: task.id,
            title: req.title.trim(),
            status,
            responsible_user_id: req.responsible_user_id,
        },
    )
    .await?;

    Ok(Json(ApiResponse::with_message(
        SubTaskResponse::from(sub_task),
        "Sub-task created successfully",
    )))
}

pub async fn update_sub_task_inner(
    state: &AppState,
    ctx: AuthContext,
    task_id: i32,
    sub_task_id: i32,
    req: UpdateSubTaskRequest,
) -> Result<Json<ApiResponse<SubTaskResponse>>> {
    let user = load_current_user(state, &ctx).await?;
    let task = load_scoped_task(state, user.team_id, task_id).await?;
    let sub_task = load_scoped_sub_task(state, &task, sub_task_id).await?;

    ensure_admin(user.role.is_admin()).map_err(AppError::forbidden)?;

    let mut patch = SubTaskPatch::default();

    if let Some(title) = req.title {
        validation::validate_title(&title).map_err(AppError::validation)?;
        patch.title = Some(title.trim().to_string());
    }
    if let Some(raw) = req.status {
        let status =
            validation::parse_status::<TaskStatus>(&raw, TaskStatus::VALUES).map_err(AppError::validation)?;
        patch.status = Some(status);
    }
    if let Some(assignment) = req.responsible_user_id {
        if let Some(responsible_id) = assignment {
            ensure_team_assignee(state, task.team_id, responsible_id, RESPONSIBLE_NOT_IN_TEAM).await?;
        }
        patch.responsible_user_id = Some(assignment);
    }

    let updated = store::sub_tasks::update_sub_task(&state.db, sub_task, patch).await?;

    Ok(Json(ApiResponse::with_message(
        SubTaskResponse::from(updated),
        "Sub-task updated successfully",
    )))
}

pub async fn update_sub_task_status_inner(
    state: &AppState,
    ctx: AuthContext,
    task_id: i32,
    sub_task_id: i32,
    req: UpdateStatusRequest,
) -> Result<Json<ApiResponse<SubTaskResponse>>> {
    let user = load_current_user(state, &ctx).await?;
    let task = load_scoped_task(state, user.team_id, task_id).await?;
    let sub_task = load_scoped_sub_task(state, &task, sub_task_id).await?;

    ensure_responsible_or_admin(user.role.is_admin(), user.id, sub_task.responsible_user_id)
        .map_err(AppError::forbidden)?;

    let status =
        validation::parse_status::<TaskStatus>(&req.status, TaskStatus::VALUES).map_err(AppError::validation)?;

    let updated = store::sub_tasks::set_status(&state.db, sub_task, status).await?;

    Ok(Json(ApiResponse::with_message(
        SubTaskResponse::from(updated),
        "Sub-task status updated",
    )))
}

pub async fn delete_sub_task_inner(
    state: &AppState,
    ctx: AuthContext,
    task_id: i32,
    sub_task_id: i32,
) -> Result<Json<ApiResponse<()>>> {
    let user = load_current_user(state, &ctx).await?;
    let task = load_scoped_task(state, user.team_id, task_id).await?;
    let sub_task = load_scoped_sub_task(state, &task, sub_task_id).await?;

    ensure_admin(user.role.is_admin()).map_err(AppError::forbidden)?;

    store::sub_tasks::delete_sub_task(&state.db, sub_task).await?;

    Ok(Json(ApiResponse::message("Sub-task deleted successfully")))
}
