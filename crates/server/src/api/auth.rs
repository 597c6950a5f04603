//! # Authentication Handlers
//!
//! Registration, login, logout, and the current-user profile.

use auth::{create_access_token, hash_password, secrecy::SecretString, verify_password};
use axum::Json;
use entity::users::UserRole;
use error::{ApiResponse, AppError, Result};
use sea_orm::TransactionTrait;
use tracing::info;
use validator::Validate;

use crate::{
    api::load_current_user,
    dto::{
        auth::{AuthResponse, LoginRequest, RegisterRequest},
        users::UserResponse,
    },
    middleware::auth::AuthContext,
    revocation::RevocationList,
    store,
    validation,
    AppState,
};

/// Inner handler for user registration.
///
/// The first user ever created becomes ADMIN; everyone after is MEMBER.
/// All users join the shared default team, created lazily here.
pub async fn register_handler_inner(
    state: &AppState,
    req: RegisterRequest,
) -> Result<Json<ApiResponse<AuthResponse>>> {
    // Aggregate field failures into one 400 with a per-field map
    let mut field_errors = serde_json::Map::new();
    if let Err(message) = validation::validate_name(&req.name) {
        field_errors.insert("name".to_string(), message.into());
    }
    if let Err(message) = validation::validate_email(&req.email) {
        field_errors.insert("email".to_string(), message.into());
    }
    if let Err(message) = validation::validate_password(&req.password) {
        field_errors.insert("password".to_string(), message.into());
    }
    if !field_errors.is_empty() {
        return Err(AppError::validation_fields(
            "Validation failed",
            serde_json::Value::Object(field_errors),
        ));
    }

    let email = req.email.trim().to_lowercase();

    if store::users::find_by_email(&state.db, &email).await?.is_some() {
        return Err(AppError::conflict("Email already registered"));
    }

    let password = SecretString::from(req.password);
    let password_hash =
        hash_password(&password).map_err(|e| AppError::internal(format!("Password hashing failed: {}", e)))?;

    let txn = state.db.begin().await?;

    let team = store::teams::get_or_create_default(&txn).await?;
    let role = if store::users::count(&txn).await? == 0 {
        UserRole::Admin
    }
    else {
        UserRole::Member
    };

    let user = store::users::create_user(
        &txn,
        store::users::NewUser {
            name: req.name.trim(),
            email: &email,
            password_hash: &password_hash,
            role,
            team_id: Some(team.id),
        },
    )
    .await?;

    txn.commit().await?;

    let access_token = create_access_token(&state.jwt_config, user.id)
        .map_err(|e| AppError::internal(format!("Token issuance failed: {}", e)))?;

    info!(user_id = user.id, role = %user.role, "User registered");

    Ok(Json(ApiResponse::with_message(
        AuthResponse {
            user: UserResponse::from_user(user, Some(team)),
            access_token,
        },
        "User registered successfully",
    )))
}

/// Inner handler for login.
///
/// Unknown email and wrong password produce the same message, so the
/// endpoint never confirms whether an address is registered.
pub async fn login_handler_inner(
    state: &AppState,
    req: LoginRequest,
) -> Result<Json<ApiResponse<AuthResponse>>> {
    req.validate()?;

    let email = req.email.trim().to_lowercase();

    let user = store::users::find_by_email(&state.db, &email)
        .await?
        .ok_or_else(|| AppError::unauthorized("Invalid email or password"))?;

    let password = SecretString::from(req.password);
    verify_password(&password, &user.password_hash)
        .map_err(|_| AppError::unauthorized("Invalid email or password"))?;

    let team = match user.team_id {
        Some(team_id) => store::teams::find_by_id(&state.db, team_id).await?,
        None => None,
    };

    let access_token = create_access_token(&state.jwt_config, user.id)
        .map_err(|e| AppError::internal(format!("Token issuance failed: {}", e)))?;

    info!(user_id = user.id, "User logged in");

    Ok(Json(ApiResponse::with_message(
        AuthResponse {
            user: UserResponse::from_user(user, team),
            access_token,
        },
        "Login successful",
    )))
}

/// Inner handler for logout. Revokes the presented token's `jti`; the
/// entry expires when the token would have.
pub async fn logout_handler_inner(state: &AppState, ctx: AuthContext) -> Result<Json<ApiResponse<()>>> {
    let revocation = RevocationList::new(state.redis.clone());
    revocation.revoke(&ctx.jti, ctx.expires_at).await?;

    info!(user_id = ctx.user_id, "User logged out");

    Ok(Json(ApiResponse::message("Logout successful")))
}

/// Inner handler for the current-user profile.
pub async fn me_handler_inner(state: &AppState, ctx: AuthContext) -> Result<Json<ApiResponse<UserResponse>>> {
    let user = load_current_user(state, &ctx).await?;

    let team = match user.team_id {
        Some(team_id) => store::teams::find_by_id(&state.db, team_id).await?,
        None => None,
    };

    Ok(Json(ApiResponse::ok(UserResponse::from_user(user, team))))
}
