//! # Private Todo Handlers
//!
//! Strictly owner-scoped: every item is visible and mutable only to the
//! user who created it.

use auth::ensure_owner;
use axum::Json;
use entity::TodoStatus;
use error::{ApiResponse, AppError, Result};

use crate::{
    dto::private_todos::{CreateTodoRequest, TodoResponse, UpdateTodoRequest},
    middleware::auth::AuthContext,
    store::{
        self,
        private_todos::{NewTodo, TodoPatch},
    },
    validation,
    AppState,
};

pub async fn list_todos_inner(state: &AppState, ctx: AuthContext) -> Result<Json<ApiResponse<Vec<TodoResponse>>>> {
    let todos = store::private_todos::list_by_owner(&state.db, ctx.user_id).await?;

    Ok(Json(ApiResponse::ok(
        todos.into_iter().map(TodoResponse::from).collect(),
    )))
}

pub async fn create_todo_inner(
    state: &AppState,
    ctx: AuthContext,
    req: CreateTodoRequest,
) -> Result<Json<ApiResponse<TodoResponse>>> {
    validation::validate_title(&req.title).map_err(AppError::validation)?;

    let status = match &req.status {
        Some(raw) => {
            validation::parse_status::<TodoStatus>(raw, TodoStatus::VALUES).map_err(AppError::validation)?
        },
        None => TodoStatus::Todo,
    };

    let due_date = match &req.due_date {
        Some(raw) => Some(validation::parse_due_date(raw).map_err(AppError::validation)?),
        None => None,
    };

    let todo = store::private_todos::create_todo(
        &state.db,
        NewTodo {
            owner_user_id: ctx.user_id,
            title: req.title.trim(),
            description: req.description.as_deref(),
            status,
            due_date,
        },
    )
    .await?;

    Ok(Json(ApiResponse::with_message(
        TodoResponse::from(todo),
        "Todo created successfully",
    )))
}

pub async fn get_todo_inner(
    state: &AppState,
    ctx: AuthContext,
    id: i32,
) -> Result<Json<ApiResponse<TodoResponse>>> {
    let todo = store::private_todos::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| AppError::not_found("Todo not found"))?;

    ensure_owner(ctx.user_id, todo.owner_user_id).map_err(AppError::forbidden)?;

    Ok(Json(ApiResponse::ok(TodoResponse::from(todo))))
}

pub async fn update_todo_inner(
    state: &AppState,
    ctx: AuthContext,
    id: i32,
    req: UpdateTodoRequest,
) -> Result<Json<ApiResponse<TodoResponse>>> {
    let todo = store::private_todos::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| AppError::not_found("Todo not found"))?;

    ensure_owner(ctx.user_id, todo.owner_user_id).map_err(AppError::forbidden)?;

    let mut patch = TodoPatch::default();

    if let Some(title) = req.title {
        validation::validate_title(&title).map_err(AppError::validation)?;
        patch.title = Some(title.trim().to_string());
    }
    if let Some(description) = req.description {
        patch.description = Some(description);
    }
    if let Some(raw) = req.status {
        let status =
            validation::parse_status::<TodoStatus>(&raw, TodoStatus::VALUES).map_err(AppError::validation)?;
        patch.status = Some(status);
    }
    if let Some(raw) = req.due_date {
        patch.due_date = Some(match raw {
            Some(value) => Some(validation::parse_due_date(&value).map_err(AppError::validation)?),
            None => None,
        });
    }

    let updated = store::private_todos::update_todo(&state.db, todo, patch).await?;

    Ok(Json(ApiResponse::with_message(
        TodoResponse::from(updated),
        "Todo updated successfully",
    )))
}

pub async fn delete_todo_inner(state: &AppState, ctx: AuthContext, id: i32) -> Result<Json<ApiResponse<()>>> {
    let todo = store::private_todos::find_by_id(&state.db, id)
        .await?
        .ok_or_else(|| AppError::not_found("Todo not found"))?;

    ensure_owner(ctx.user_id, todo.owner_user_id).map_err(AppError::forbidden)?;

    store::private_todos::delete_todo(&state.db, todo).await?;

    Ok(Json(ApiResponse::message("Todo deleted successfully")))
}
