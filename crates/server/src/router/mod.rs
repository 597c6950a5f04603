//! # API Router Configuration
//!
//! Configures API routes for the Taskish application. Wrapper handlers own
//! the axum extractors and delegate to the inner handlers in [`crate::api`].

use axum::{
    extract::{rejection::JsonRejection, Extension, Path, State as AxumState},
    http::StatusCode,
    middleware,
    response::IntoResponse,
    routing::{get, patch, post},
    Json,
    Router,
};
use error::{AppError, Result};

use crate::{middleware::auth::AuthContext, AppState};

/// Creates the API router with all routes
pub fn create_router(state: AppState) -> Router {
    let protected_routes = Router::new()
        .route("/api/auth/logout", post(logout_handler))
        .route("/api/auth/me", get(me_handler))
        .route(
            "/api/private-todos",
            get(list_todos_handler).post(create_todo_handler),
        )
        .route(
            "/api/private-todos/:id",
            get(get_todo_handler)
                .put(update_todo_handler)
                .delete(delete_todo_handler),
        )
        .route(
            "/api/team-tasks",
            get(list_tasks_handler).post(create_task_handler),
        )
        .route(
            "/api/team-tasks/:id",
            get(get_task_handler)
                .put(update_task_handler)
                .delete(delete_task_handler),
        )
        .route("/api/team-tasks/:id/status", patch(update_task_status_handler))
        .route("/api/team-tasks/:id/assign", patch(assign_task_handler))
        .route(
            "/api/team-tasks/:id/sub-tasks",
            get(list_sub_tasks_handler).post(create_sub_task_handler),
        )
        .route(
            "/api/team-tasks/:id/sub-tasks/:sid",
            axum::routing::put(update_sub_task_handler).delete(delete_sub_task_handler),
        )
        .route(
            "/api/team-tasks/:id/sub-tasks/:sid/status",
            patch(update_sub_task_status_handler),
        )
        .route("/api/teams/:id/users", get(list_team_users_handler))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            crate::middleware::auth::auth_middleware,
        ));

    let public_routes = Router::new()
        .route("/api/auth/register", post(register_handler))
        .route("/api/auth/login", post(login_handler));

    public_routes.merge(protected_routes).with_state(state)
}

/// Unwraps a JSON body, mapping axum's rejection into the 400 envelope
fn json_body<T>(payload: std::result::Result<Json<T>, JsonRejection>) -> Result<T> {
    match payload {
        Ok(Json(value)) => Ok(value),
        Err(rejection) => {
            Err(AppError::bad_request(format!(
                "Invalid request body: {}",
                rejection.body_text()
            )))
        },
    }
}

// ---- auth ----

async fn register_handler(
    AxumState(state): AxumState<AppState>,
    payload: std::result::Result<Json<crate::dto::auth::RegisterRequest>, JsonRejection>,
) -> Result<impl IntoResponse> {
    let req = json_body(payload)?;
    let body = crate::api::auth::register_handler_inner(&state, req).await?;
    Ok((StatusCode::CREATED, body))
}

async fn login_handler(
    AxumState(state): AxumState<AppState>,
    payload: std::result::Result<Json<crate::dto::auth::LoginRequest>, JsonRejection>,
) -> Result<impl IntoResponse> {
    let req = json_body(payload)?;
    crate::api::auth::login_handler_inner(&state, req).await
}

async fn logout_handler(
    AxumState(state): AxumState<AppState>,
    Extension(ctx): Extension<AuthContext>,
) -> Result<impl IntoResponse> {
    crate::api::auth::logout_handler_inner(&state, ctx).await
}

async fn me_handler(
    AxumState(state): AxumState<AppState>,
    Extension(ctx): Extension<AuthContext>,
) -> Result<impl IntoResponse> {
    crate::api::auth::me_handler_inner(&state, ctx).await
}

// ---- private todos ----

async fn list_todos_handler(
    AxumState(state): AxumState<AppState>,
    Extension(ctx): Extension<AuthContext>,
) -> Result<impl IntoResponse> {
    crate::api::private_todos::list_todos_inner(&state, ctx).await
}

async fn create_todo_handler(
    AxumState(state): AxumState<AppState>,
    Extension(ctx): Extension<AuthContext>,
    payload: std::result::Result<Json<crate::dto::private_todos::CreateTodoRequest>, JsonRejection>,
) -> Result<impl IntoResponse> {
    let req = json_body(payload)?;
    let body = crate::api::private_todos::create_todo_inner(&state, ctx, req).await?;
    Ok((StatusCode::CREATED, body))
}

async fn get_todo_handler(
    AxumState(state): AxumState<AppState>,
    Extension(ctx): Extension<AuthContext>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse> {
    crate::api::private_todos::get_todo_inner(&state, ctx, id).await
}

async fn update_todo_handler(
    AxumState(state): AxumState<AppState>,
    Extension(ctx): Extension<AuthContext>,
    Path(id): Path<i32>,
    payload: std::result::Result<Json<crate::dto::private_todos::UpdateTodoRequest>, JsonRejection>,
) -> Result<impl IntoResponse> {
    let req = json_body(payload)?;
    crate::api::private_todos::update_todo_inner(&state, ctx, id, req).await
}

async fn delete_todo_handler(
    AxumState(state): AxumState<AppState>,
    Extension(ctx): Extension<AuthContext>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse> {
    crate::api::private_todos::delete_todo_inner(&state, ctx, id).await
}

// ---- team tasks ----

async fn list_tasks_handler(
    AxumState(state): AxumState<AppState>,
    Extension(ctx): Extension<AuthContext>,
) -> Result<impl IntoResponse> {
    crate::api::team_tasks::list_tasks_inner(&state, ctx).await
}

async fn create_task_handler(
    AxumState(state): AxumState<AppState>,
    Extension(ctx): Extension<AuthContext>,
    payload: std::result::Result<Json<crate::dto::team_tasks::CreateTaskRequest>, JsonRejection>,
) -> Result<impl IntoResponse> {
    let req = json_body(payload)?;
    let body = crate::api::team_tasks::create_task_inner(&state, ctx, req).await?;
    Ok((StatusCode::CREATED, body))
}

async fn get_task_handler(
    AxumState(state): AxumState<AppState>,
    Extension(ctx): Extension<AuthContext>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse> {
    crate::api::team_tasks::get_task_inner(&state, ctx, id).await
}

async fn update_task_handler(
    AxumState(state): AxumState<AppState>,
    Extension(ctx): Extension<AuthContext>,
    Path(id): Path<i32>,
    payload: std::result::Result<Json<crate::dto::team_tasks::UpdateTaskRequest>, JsonRejection>,
) -> Result<impl IntoResponse> {
    let req = json_body(payload)?;
    crate::api::team_tasks::update_task_inner(&state, ctx, id, req).await
}

async fn update_task_status_handler(
    AxumState(state): AxumState<AppState>,
    Extension(ctx): Extension<AuthContext>,
    Path(id): Path<i32>,
    payload: std::result::Result<Json<crate::dto::UpdateStatusRequest>, JsonRejection>,
) -> Result<impl IntoResponse> {
    let req = json_body(payload)?;
    crate::api::team_tasks::update_task_status_inner(&state, ctx, id, req).await
}

async fn assign_task_handler(
    AxumState(state): AxumState<AppState>,
    Extension(ctx): Extension<AuthContext>,
    Path(id): Path<i32>,
    payload: std::result::Result<Json<crate::dto::team_tasks::AssignTaskRequest>, JsonRejection>,
) -> Result<impl IntoResponse> {
    let req = json_body(payload)?;
    crate::api::team_tasks::assign_task_inner(&state, ctx, id, req).await
}

async fn delete_task_handler(
    AxumState(state): AxumState<AppState>,
    Extension(ctx): Extension<AuthContext>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse> {
    crate::api::team_tasks::delete_task_inner(&state, ctx, id).await
}

// ---- sub-tasks ----

async fn list_sub_tasks_handler(
    AxumState(state): AxumState<AppState>,
    Extension(ctx): Extension<AuthContext>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse> {
    crate::api::sub_tasks::list_sub_tasks_inner(&state, ctx, id).await
}

async fn create_sub_task_handler(
    AxumState(state): AxumState<AppState>,
    Extension(ctx): Extension<AuthContext>,
    Path(id): Path<i32>,
    payload: std::result::Result<Json<crate::dto::sub_tasks::CreateSubTaskRequest>, JsonRejection>,
) -> Result<impl IntoResponse> {
    let req = json_body(payload)?;
    let body = crate::api::sub_tasks::create_sub_task_inner(&state, ctx, id, req).await?;
    Ok((StatusCode::CREATED, body))
}

async fn update_sub_task_handler(
    AxumState(state): AxumState<AppState>,
    Extension(ctx): Extension<AuthContext>,
    Path((id, sid)): Path<(i32, i32)>,
    payload: std::result::Result<Json<crate::dto::sub_tasks::UpdateSubTaskRequest>, JsonRejection>,
) -> Result<impl IntoResponse> {
    let req = json_body(payload)?;
    crate::api::sub_tasks::update_sub_task_inner(&state, ctx, id, sid, req).await
}

async fn update_sub_task_status_handler(
    AxumState(state): AxumState<AppState>,
    Extension(ctx): Extension<AuthContext>,
    Path((id, sid)): Path<(i32, i32)>,
    payload: std::result::Result<Json<crate::dto::UpdateStatusRequest>, JsonRejection>,
) -> Result<impl IntoResponse> {
    let req = json_body(payload)?;
    crate::api::sub_tasks::update_sub_task_status_inner(&state, ctx, id, sid, req).await
}

async fn delete_sub_task_handler(
    AxumState(state): AxumState<AppState>,
    Extension(ctx): Extension<AuthContext>,
    Path((id, sid)): Path<(i32, i32)>,
) -> Result<impl IntoResponse> {
    crate::api::sub_tasks::delete_sub_task_inner(&state, ctx, id, sid).await
}

// ---- teams ----

async fn list_team_users_handler(
    AxumState(state): AxumState<AppState>,
    Extension(ctx): Extension<AuthContext>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse> {
    crate::api::teams::list_team_users_inner(&state, ctx, id).await
}

/// Creates the health check router
pub fn create_health_router() -> Router { Router::new().route("/health", get(|| async { "OK" })) }

/// Creates the main application router
pub fn create_app_router(state: AppState) -> Router {
    Router::new()
        .merge(create_health_router())
        .merge(create_router(state))
}
