//! End-to-end handler tests over in-memory SQLite.
//!
//! These call the inner handlers directly with a constructed auth context,
//! covering registration roles, credential checks, ownership and team
//! isolation, status-update authorization, and derived progress.

use auth::JwtConfig;
use chrono::{Duration, Utc};
use entity::users::UserRole;
use error::AppError;
use migration::{Migrator, MigratorTrait};
use sea_orm::Database;
use server::{
    api,
    dto::{
        auth::{LoginRequest, RegisterRequest},
        private_todos::{CreateTodoRequest, UpdateTodoRequest},
        sub_tasks::CreateSubTaskRequest,
        team_tasks::{AssignTaskRequest, CreateTaskRequest},
        UpdateStatusRequest,
    },
    middleware::auth::AuthContext,
    store,
    AppState,
};

async fn setup_state() -> AppState {
    let db = Database::connect("sqlite::memory:").await.expect("connect");
    Migrator::up(&db, None).await.expect("migrate");

    AppState {
        db,
        jwt_config: JwtConfig::new("handler-test-secret-key"),
        redis: redis::Client::open("redis://127.0.0.1:6379").expect("redis url"),
    }
}

fn ctx_for(user_id: i32) -> AuthContext {
    AuthContext {
        user_id,
        jti: format!("test-jti-{}", user_id),
        expires_at: Utc::now() + Duration::hours(24),
    }
}

async fn register(state: &AppState, name: &str, email: &str) -> i32 {
    let response = api::auth::register_handler_inner(
        state,
        RegisterRequest {
            name:     name.to_string(),
            email:    email.to_string(),
            password: "correct horse battery".to_string(),
        },
    )
    .await
    .expect("register");

    response.0.data.unwrap().user.id
}

#[tokio::test]
async fn test_first_user_is_admin_rest_are_members() {
    let state = setup_state().await;

    let ids = [
        register(&state, "Alice", "alice@example.com").await,
        register(&state, "Bob", "bob@example.com").await,
        register(&state, "Carol", "carol@example.com").await,
    ];

    let roles: Vec<UserRole> = {
        let mut roles = Vec::new();
        for id in ids {
            let user = store::users::find_by_id(&state.db, id).await.unwrap().unwrap();
            roles.push(user.role);
        }
        roles
    };

    assert_eq!(roles, vec![UserRole::Admin, UserRole::Member, UserRole::Member]);
}

#[tokio::test]
async fn test_registration_joins_default_team() {
    let state = setup_state().await;
    let id = register(&state, "Alice", "alice@example.com").await;

    let user = store::users::find_by_id(&state.db, id).await.unwrap().unwrap();
    let team = store::teams::find_by_id(&state.db, user.team_id.unwrap())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(team.name, "Default Team");
}

#[tokio::test]
async fn test_duplicate_email_is_case_insensitive_conflict() {
    let state = setup_state().await;
    register(&state, "Alice", "Alice@Example.com").await;

    let err = api::auth::register_handler_inner(
        &state,
        RegisterRequest {
            name:     "Imposter".to_string(),
            email:    "alice@example.COM".to_string(),
            password: "another password".to_string(),
        },
    )
    .await
    .unwrap_err();

    assert!(matches!(err, AppError::Conflict { .. }));
}

#[tokio::test]
async fn test_registration_validation_aggregates_fields() {
    let state = setup_state().await;

    let err = api::auth::register_handler_inner(
        &state,
        RegisterRequest {
            name:     "A".to_string(),
            email:    "not-an-email".to_string(),
            password: "short".to_string(),
        },
    )
    .await
    .unwrap_err();

    match err {
        AppError::Validation { details, .. } => {
            let map = details.expect("field map");
            assert!(map.get("name").is_some());
            assert!(map.get("email").is_some());
            assert!(map.get("password").is_some());
        },
        other => panic!("expected validation error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_login_rejects_bad_credentials_uniformly() {
    let state = setup_state().await;
    register(&state, "Alice", "alice@example.com").await;

    let wrong_password = api::auth::login_handler_inner(
        &state,
        LoginRequest {
            email:    "alice@example.com".to_string(),
            password: "wrong password".to_string(),
        },
    )
    .await
    .unwrap_err();

    let unknown_email = api::auth::login_handler_inner(
        &state,
        LoginRequest {
            email:    "nobody@example.com".to_string(),
            password: "whatever password".to_string(),
        },
    )
    .await
    .unwrap_err();

    // Same message either way, so the endpoint never confirms an address
    assert_eq!(wrong_password.public_message(), "Invalid email or password");
    assert_eq!(unknown_email.public_message(), "Invalid email or password");
}

#[tokio::test]
async fn test_login_succeeds_with_differently_cased_email() {
    let state = setup_state().await;
    register(&state, "Alice", "alice@example.com").await;

    let response = api::auth::login_handler_inner(
        &state,
        LoginRequest {
            email:    "ALICE@example.com".to_string(),
            password: "correct horse battery".to_string(),
        },
    )
    .await
    .expect("login");

    assert!(!response.0.data.unwrap().access_token.is_empty());
}

#[tokio::test]
async fn test_me_returns_profile_with_team() {
    let state = setup_state().await;
    let id = register(&state, "Alice", "alice@example.com").await;

    let response = api::auth::me_handler_inner(&state, ctx_for(id)).await.expect("me");
    let profile = response.0.data.unwrap();

    assert_eq!(profile.id, id);
    assert_eq!(profile.team.unwrap().name, "Default Team");
}

#[tokio::test]
async fn test_me_404_when_user_deleted() {
    let state = setup_state().await;

    let err = api::auth::me_handler_inner(&state, ctx_for(999)).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound { .. }));
}

#[tokio::test]
async fn test_private_todo_invisible_to_other_users() {
    let state = setup_state().await;
    let alice = register(&state, "Alice", "alice@example.com").await;
    let bob = register(&state, "Bob", "bob@example.com").await;

    let created = api::private_todos::create_todo_inner(
        &state,
        ctx_for(alice),
        CreateTodoRequest {
            title:       "secret plan".to_string(),
            description: None,
            status:      None,
            due_date:    None,
        },
    )
    .await
    .expect("create");
    let todo_id = created.0.data.unwrap().id;

    // Bob holds a valid token and knows the id; still forbidden
    let read = api::private_todos::get_todo_inner(&state, ctx_for(bob), todo_id)
        .await
        .unwrap_err();
    assert!(matches!(read, AppError::Forbidden { .. }));

    let update = api::private_todos::update_todo_inner(
        &state,
        ctx_for(bob),
        todo_id,
        UpdateTodoRequest::default(),
    )
    .await
    .unwrap_err();
    assert!(matches!(update, AppError::Forbidden { .. }));

    let delete = api::private_todos::delete_todo_inner(&state, ctx_for(bob), todo_id)
        .await
        .unwrap_err();
    assert!(matches!(delete, AppError::Forbidden { .. }));

    // Absent resources 404 before any ownership check
    let missing = api::private_todos::get_todo_inner(&state, ctx_for(bob), 9999)
        .await
        .unwrap_err();
    assert!(matches!(missing, AppError::NotFound { .. }));
}

#[tokio::test]
async fn test_todo_status_must_be_valid_for_todos() {
    let state = setup_state().await;
    let alice = register(&state, "Alice", "alice@example.com").await;

    let err = api::private_todos::create_todo_inner(
        &state,
        ctx_for(alice),
        CreateTodoRequest {
            title:       "blocked?".to_string(),
            description: None,
            status:      Some("BLOCKED".to_string()),
            due_date:    None,
        },
    )
    .await
    .unwrap_err();

    assert!(matches!(err, AppError::Validation { .. }));
    assert_eq!(err.public_message(), "Status must be one of: TODO, IN_PROGRESS, DONE");
}

#[tokio::test]
async fn test_member_cannot_create_team_task() {
    let state = setup_state().await;
    register(&state, "Alice", "alice@example.com").await;
    let bob = register(&state, "Bob", "bob@example.com").await;

    let err = api::team_tasks::create_task_inner(
        &state,
        ctx_for(bob),
        CreateTaskRequest {
            title:            "not allowed".to_string(),
            description:      None,
            status:           None,
            assigned_user_id: None,
        },
    )
    .await
    .unwrap_err();

    assert!(matches!(err, AppError::Forbidden { .. }));
    assert_eq!(err.public_message(), "Admin access required");
}

#[tokio::test]
async fn test_task_progress_from_sub_tasks() {
    let state = setup_state().await;
    let admin = register(&state, "Alice", "alice@example.com").await;

    let created = api::team_tasks::create_task_inner(
        &state,
        ctx_for(admin),
        CreateTaskRequest {
            title:            "release".to_string(),
            description:      None,
            status:           None,
            assigned_user_id: None,
        },
    )
    .await
    .expect("create task");
    let task_id = created.0.data.unwrap().id;

    for (title, status) in [("a", "DONE"), ("b", "TODO"), ("c", "TODO")] {
        api::sub_tasks::create_sub_task_inner(
            &state,
            ctx_for(admin),
            task_id,
            CreateSubTaskRequest {
                title:               title.to_string(),
                status:              Some(status.to_string()),
                responsible_user_id: None,
            },
        )
        .await
        .expect("create sub-task");
    }

    let detail = api::team_tasks::get_task_inner(&state, ctx_for(admin), task_id)
        .await
        .expect("get task");
    let task = detail.0.data.unwrap();

    // 1 of 3 done truncates to 33
    assert_eq!(task.progress, 33);
    assert_eq!(task.sub_tasks.unwrap().len(), 3);
}

#[tokio::test]
async fn test_task_status_update_authorization() {
    let state = setup_state().await;
    let admin = register(&state, "Alice", "alice@example.com").await;
    let bob = register(&state, "Bob", "bob@example.com").await;
    let carol = register(&state, "Carol", "carol@example.com").await;

    let created = api::team_tasks::create_task_inner(
        &state,
        ctx_for(admin),
        CreateTaskRequest {
            title:            "assigned work".to_string(),
            description:      None,
            status:           None,
            assigned_user_id: Some(bob),
        },
    )
    .await
    .expect("create task");
    let task_id = created.0.data.unwrap().id;

    // The assignee may update status
    let by_assignee = api::team_tasks::update_task_status_inner(
        &state,
        ctx_for(bob),
        task_id,
        UpdateStatusRequest {
            status: "IN_PROGRESS".to_string(),
        },
    )
    .await;
    assert!(by_assignee.is_ok());

    // Another member may not
    let by_other = api::team_tasks::update_task_status_inner(
        &state,
        ctx_for(carol),
        task_id,
        UpdateStatusRequest {
            status: "DONE".to_string(),
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(by_other, AppError::Forbidden { .. }));

    // Unassign, then a non-admin member is still rejected
    api::team_tasks::assign_task_inner(
        &state,
        ctx_for(admin),
        task_id,
        AssignTaskRequest {
            assigned_user_id: None,
        },
    )
    .await
    .expect("unassign");

    let unassigned = api::team_tasks::update_task_status_inner(
        &state,
        ctx_for(bob),
        task_id,
        UpdateStatusRequest {
            status: "DONE".to_string(),
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(unassigned, AppError::Forbidden { .. }));
}

#[tokio::test]
async fn test_team_isolation_on_task_reads() {
    let state = setup_state().await;
    let admin = register(&state, "Alice", "alice@example.com").await;

    let created = api::team_tasks::create_task_inner(
        &state,
        ctx_for(admin),
        CreateTaskRequest {
            title:            "ours".to_string(),
            description:      None,
            status:           None,
            assigned_user_id: None,
        },
    )
    .await
    .expect("create task");
    let task_id = created.0.data.unwrap().id;

    // An outsider in a different team sees 403 on an existing task
    let other_team = store::teams::create_team(&state.db, "Other Team").await.unwrap();
    let outsider = store::users::create_user(
        &state.db,
        store::users::NewUser {
            name:          "Mallory",
            email:         "mallory@example.com",
            password_hash: "$argon2id$v=19$m=19456,t=2,p=1$placeholder$placeholder",
            role:          UserRole::Admin,
            team_id:       Some(other_team.id),
        },
    )
    .await
    .unwrap();

    let err = api::team_tasks::get_task_inner(&state, ctx_for(outsider.id), task_id)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Forbidden { .. }));

    // Missing task is a 404 even for the outsider
    let missing = api::team_tasks::get_task_inner(&state, ctx_for(outsider.id), 9999)
        .await
        .unwrap_err();
    assert!(matches!(missing, AppError::NotFound { .. }));
}

#[tokio::test]
async fn test_assignment_requires_same_team() {
    let state = setup_state().await;
    let admin = register(&state, "Alice", "alice@example.com").await;

    let other_team = store::teams::create_team(&state.db, "Other Team").await.unwrap();
    let outsider = store::users::create_user(
        &state.db,
        store::users::NewUser {
            name:          "Mallory",
            email:         "mallory@example.com",
            password_hash: "$argon2id$v=19$m=19456,t=2,p=1$placeholder$placeholder",
            role:          UserRole::Member,
            team_id:       Some(other_team.id),
        },
    )
    .await
    .unwrap();

    let err = api::team_tasks::create_task_inner(
        &state,
        ctx_for(admin),
        CreateTaskRequest {
            title:            "misassigned".to_string(),
            description:      None,
            status:           None,
            assigned_user_id: Some(outsider.id),
        },
    )
    .await
    .unwrap_err();

    assert!(matches!(err, AppError::Validation { .. }));
}

#[tokio::test]
async fn test_sub_task_status_update_by_responsible_user() {
    let state = setup_state().await;
    let admin = register(&state, "Alice", "alice@example.com").await;
    let bob = register(&state, "Bob", "bob@example.com").await;

    let created = api::team_tasks::create_task_inner(
        &state,
        ctx_for(admin),
        CreateTaskRequest {
            title:            "parent".to_string(),
            description:      None,
            status:           None,
            assigned_user_id: None,
        },
    )
    .await
    .expect("create task");
    let task_id = created.0.data.unwrap().id;

    let sub = api::sub_tasks::create_sub_task_inner(
        &state,
        ctx_for(admin),
        task_id,
        CreateSubTaskRequest {
            title:               "child".to_string(),
            status:              None,
            responsible_user_id: Some(bob),
        },
    )
    .await
    .expect("create sub-task");
    let sub_id = sub.0.data.unwrap().id;

    let by_responsible = api::sub_tasks::update_sub_task_status_inner(
        &state,
        ctx_for(bob),
        task_id,
        sub_id,
        UpdateStatusRequest {
            status: "DONE".to_string(),
        },
    )
    .await;
    assert!(by_responsible.is_ok());

    // Non-admin member deleting is rejected
    let delete = api::sub_tasks::delete_sub_task_inner(&state, ctx_for(bob), task_id, sub_id)
        .await
        .unwrap_err();
    assert!(matches!(delete, AppError::Forbidden { .. }));
}

#[tokio::test]
async fn test_sub_task_must_belong_to_parent_task() {
    let state = setup_state().await;
    let admin = register(&state, "Alice", "alice@example.com").await;

    let mut task_ids = Vec::new();
    for title in ["one", "two"] {
        let created = api::team_tasks::create_task_inner(
            &state,
            ctx_for(admin),
            CreateTaskRequest {
                title:            title.to_string(),
                description:      None,
                status:           None,
                assigned_user_id: None,
            },
        )
        .await
        .expect("create task");
        task_ids.push(created.0.data.unwrap().id);
    }

    let sub = api::sub_tasks::create_sub_task_inner(
        &state,
        ctx_for(admin),
        task_ids[0],
        CreateSubTaskRequest {
            title:               "child of one".to_string(),
            status:              None,
            responsible_user_id: None,
        },
    )
    .await
    .expect("create sub-task");
    let sub_id = sub.0.data.unwrap().id;

    // Addressing the sub-task through the wrong parent is a 404
    let err = api::sub_tasks::update_sub_task_status_inner(
        &state,
        ctx_for(admin),
        task_ids[1],
        sub_id,
        UpdateStatusRequest {
            status: "DONE".to_string(),
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::NotFound { .. }));
}

#[tokio::test]
async fn test_delete_task_removes_sub_tasks() {
    let state = setup_state().await;
    let admin = register(&state, "Alice", "alice@example.com").await;

    let created = api::team_tasks::create_task_inner(
        &state,
        ctx_for(admin),
        CreateTaskRequest {
            title:            "short lived".to_string(),
            description:      None,
            status:           None,
            assigned_user_id: None,
        },
    )
    .await
    .expect("create task");
    let task_id = created.0.data.unwrap().id;

    api::sub_tasks::create_sub_task_inner(
        &state,
        ctx_for(admin),
        task_id,
        CreateSubTaskRequest {
            title:               "child".to_string(),
            status:              None,
            responsible_user_id: None,
        },
    )
    .await
    .expect("create sub-task");

    api::team_tasks::delete_task_inner(&state, ctx_for(admin), task_id)
        .await
        .expect("delete task");

    assert!(store::team_tasks::find_by_id(&state.db, task_id)
        .await
        .unwrap()
        .is_none());
    assert!(store::sub_tasks::list_by_task(&state.db, task_id)
        .await
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn test_team_member_listing_scoped_to_own_team() {
    let state = setup_state().await;
    let alice = register(&state, "Alice", "alice@example.com").await;
    register(&state, "Bob", "bob@example.com").await;

    let user = store::users::find_by_id(&state.db, alice).await.unwrap().unwrap();
    let team_id = user.team_id.unwrap();

    let members = api::teams::list_team_users_inner(&state, ctx_for(alice), team_id)
        .await
        .expect("list members");
    assert_eq!(members.0.data.unwrap().len(), 2);

    // Another team's roster is off limits
    let other_team = store::teams::create_team(&state.db, "Other Team").await.unwrap();
    let err = api::teams::list_team_users_inner(&state, ctx_for(alice), other_team.id)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Forbidden { .. }));

    let missing = api::teams::list_team_users_inner(&state, ctx_for(alice), 9999)
        .await
        .unwrap_err();
    assert!(matches!(missing, AppError::NotFound { .. }));
}
