//! # Team Task Handlers
//!
//! Tasks are visible to every member of their team. Creation, deletion,
//! general updates, and assignment are admin-only; status updates are open
//! to the assignee.

use auth::{ensure_admin, ensure_assignee_or_admin, ensure_team_member};
use axum::Json;
use entity::{team_tasks, TaskStatus};
use error::{ApiResponse, AppError, Result};
use sea_orm::TransactionTrait;

use crate::{
    api::{ensure_team_assignee, load_current_user},
    dto::{
        sub_tasks::SubTaskResponse,
        team_tasks::{AssignTaskRequest, CreateTaskRequest, TeamTaskResponse, UpdateTaskRequest},
        UpdateStatusRequest,
    },
    middleware::auth::AuthContext,
    progress::task_progress,
    store::{
        self,
        team_tasks::{NewTask, TaskPatch},
    },
    validation,
    AppState,
};

const ASSIGNEE_NOT_IN_TEAM: &str = "Assigned user must be a member of the team";

/// Listing shape: progress included, sub-tasks omitted.
async fn task_summary(state: &AppState, task: team_tasks::Model) -> Result<TeamTaskResponse> {
    let statuses: Vec<TaskStatus> = store::sub_tasks::list_by_task(&state.db, task.id)
        .await?
        .into_iter()
        .map(|s| s.status)
        .collect();
    let progress = task_progress(task.status, &statuses);

    Ok(TeamTaskResponse::from_task(task, progress, None))
}

/// Detail shape: progress and embedded sub-tasks.
async fn task_detail(state: &AppState, task: team_tasks::Model) -> Result<TeamTaskResponse> {
    let sub_tasks = store::sub_tasks::list_by_task(&state.db, task.id).await?;
    let statuses: Vec<TaskStatus> = sub_tasks.iter().map(|s| s.status).collect();
    let progress = task_progress(task.status, &statuses);
    let embedded = sub_tasks.into_iter().map(SubTaskResponse::from).collect();

    Ok(TeamTaskResponse::from_task(task, progress, Some(embedded)))
}

pub async fn list_tasks_inner(
    state: &AppState,
    ctx: AuthContext,
) -> Result<Json<ApiResponse<Vec<TeamTaskResponse>>>> {
    let user = load_current_user(state, &ctx).await?;

    // A user without a team has no team tasks to see
    let Some(team_id) = user.team_id else {
        return Ok(Json(ApiResponse::ok(Vec::new())));
    };

    let tasks = store::team_tasks::list_by_team(&state.db, team_id).await?;
    let mut responses = Vec::with_capacity(tasks.len());
    for task in tasks {
        responses.push(task_summary(state, task).await?);
    }

    Ok(Json(ApiResponse::ok(responses)))
}

pub async fn create_task_inner(
    state: &AppState,
    ctx: AuthContext,
    req: CreateTaskRequest,
) -> Result<Json<ApiResponse<TeamTaskResponse>>> {
    let user = load_current_user(state, &ctx).await?;
    ensure_admin(user.role.is_admin()).map_err(AppError::forbidden)?;

    let team_id = user
        .team_id
        .ok_or_else(|| AppError::validation("You must belong to a team to create tasks"))?;

    validation::validate_title(&req.title).map_err(AppError::validation)?;

    let status = match &req.status {
        Some(raw) => {
            validation::parse_status::<TaskStatus>(raw, TaskStatus::VALUES).map_err(AppError::validation)?
        },
        None => TaskStatus::Todo,
    };

    if let Some(assignee_id) = req.assigned_user_id {
        ensure_team_assignee(state, team_id, assignee_id, ASSIGNEE_NOT_IN_TEAM).await?;
    }

    let task = store::team_tasks::create_task(
        &state.db,
        NewTask {
            team_id,
            title: req.title.trim(),
            description: req.description.as_deref(),
            status,
            assigned_user_id: req.assigned_user_id,
        },
    )
    .await?;

    let progress = task_progress(task.status, &[]);

    Ok(Json(ApiResponse::with_message(
        TeamTaskResponse::from_task(task, progress, None),
        "Task created successfully",
    )))
}

pub async fn get_task_inner(
    state: &AppState,
    ctx: AuthContext,
    id: i32,
) -> Result<Json<ApiResponse<TeamTaskResponse>>> {
    let user = load_current_user(state, &ctx).await?;

    let task = store::team_tasks::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| AppError::not_found("Task not found"))?;

    ensure_team_member(user.team_id, task.team_id).map_err(AppError::forbidden)?;

    Ok(Json(ApiResponse::ok(task_detail(state, task).await?)))
}

pub async fn update_task_inner(
    state: &AppState,
    ctx: AuthContext,
    id: i32,
    req: UpdateTaskRequest,
) -> Result<Json<ApiResponse<TeamTaskResponse>>> {
    let user = load_current_user(state, &ctx).await?;

    let task = store::team_tasks::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| AppError::not_found("Task not found"))?;

    ensure_team_member(user.team_id, task.team_id).map_err(AppError::forbidden)?;
    ensure_admin(user.role.is_admin()).map_err(AppError::forbidden)?;

    let mut patch = TaskPatch::default();

    if let Some(title) = req.title {
        validation::validate_title(&title).map_err(AppError::validation)?;
        patch.title = Some(title.trim().to_string());
    }
    if let Some(description) = req.description {
        patch.description = Some(description);
    }
    if let Some(raw) = req.status {
        let status =
            validation::parse_status::<TaskStatus>(&raw, TaskStatus::VALUES).map_err(AppError::validation)?;
        patch.status = Some(status);
    }
    if let Some(assignment) = req.assigned_user_id {
        if let Some(assignee_id) = assignment {
            ensure_team_assignee(state, task.team_id, assignee_id, ASSIGNEE_NOT_IN_TEAM).await?;
        }
        patch.assigned_user_id = Some(assignment);
    }

    let updated = store::team_tasks::update_task(&state.db, task, patch).await?;

    Ok(Json(ApiResponse::with_message(
        task_summary(state, updated).await?,
        "Task updated successfully",
    )))
}

pub async fn update_task_status_inner(
    state: &AppState,
    ctx: AuthContext,
    id: i32,
    req: UpdateStatusRequest,
) -> Result<Json<ApiResponse<TeamTaskResponse>>> {
    let user = load_current_user(state, &ctx).await?;

    let task = store::team_tasks::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| AppError::not_found("Task not found"))?;

    ensure_team_member(user.team_id, task.team_id).map_err(AppError::forbidden)?;
    ensure_assignee_or_admin(user.role.is_admin(), user.id, task.assigned_user_id)
        .map_err(AppError::forbidden)?;

    let status =
        validation::parse_status::<TaskStatus>(&req.status, TaskStatus::VALUES).map_err(AppError::validation)?;

    let updated = store::team_tasks::set_status(&state.db, task, status).await?;

    Ok(Json(ApiResponse::with_message(
        task_summary(state, updated).await?,
        "Task status updated",
    )))
}

pub async fn assign_task_inner(
    state: &AppState,
    ctx: AuthContext,
    id: i32,
    req: AssignTaskRequest,
) -> Result<Json<ApiResponse<TeamTaskResponse>>> {
    let user = load_current_user(state, &ctx).await?;

    let task = store::team_tasks::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| AppError::not_found("Task not found"))?;

    ensure_team_member(user.team_id, task.team_id).map_err(AppError::forbidden)?;
    ensure_admin(user.role.is_admin()).map_err(AppError::forbidden)?;

    if let Some(assignee_id) = req.assigned_user_id {
        ensure_team_assignee(state, task.team_id, assignee_id, ASSIGNEE_NOT_IN_TEAM).await?;
    }

    let patch = TaskPatch {
        assigned_user_id: Some(req.assigned_user_id),
        ..Default::default()
    };
    let updated = store::team_tasks::update_task(&state.db, task, patch).await?;

    Ok(Json(ApiResponse::with_message(
        task_summary(state, updated).await?,
        "Task assignment updated",
    )))
}

pub async fn delete_task_inner(state: &AppState, ctx: AuthContext, id: i32) -> Result<Json<ApiResponse<()>>> {
    let user = load_current_user(state, &ctx).await?;

    let task = store::team_tasks::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| AppError::not_found("Task not found"))?;

    ensure_team_member(user.team_id, task.team_id).map_err(AppError::forbidden)?;
    ensure_admin(user.role.is_admin()).map_err(AppError::forbidden)?;

    // Sub-tasks go with the task, atomically
    let txn = state.db.begin().await?;
    store::team_tasks::delete_task(&txn, task).await?;
    txn.commit().await?;

    Ok(Json(ApiResponse::message("Task deleted successfully")))
}
