//! Private todo persistence. Strictly owner-scoped; the policy layer
//! enforces that before any call lands here.

use chrono::{DateTime, Utc};
use entity::private_todos::{ActiveModel, Column, Entity as PrivateTodos, Model, TodoStatus};
use error::Result;
use sea_orm::{
    ActiveModelTrait,
    ColumnTrait,
    ConnectionTrait,
    EntityTrait,
    IntoActiveModel,
    ModelTrait,
    QueryFilter,
    QueryOrder,
    Set,
};

pub struct NewTodo<'a> {
    pub owner_user_id: i32,
    pub title:         &'a str,
    pub description:   Option<&'a str>,
    pub status:        TodoStatus,
    pub due_date:      Option<DateTime<Utc>>,
}

/// Field deltas for a partial update. Outer `None` means "leave alone";
/// for clearable fields the inner `None` means "set to null".
#[derive(Debug, Default)]
pub struct TodoPatch {
    pub title:       Option<String>,
    pub description: Option<Option<String>>,
    pub status:      Option<TodoStatus>,
    pub due_date:    Option<Option<DateTime<Utc>>>,
}

pub async fn create_todo<C: ConnectionTrait>(conn: &C, new: NewTodo<'_>) -> Result<Model> {
    let now = Utc::now();
    let todo = ActiveModel {
        owner_user_id: Set(new.owner_user_id),
        title: Set(new.title.to_string()),
        description: Set(new.description.map(str::to_string)),
        status: Set(new.status),
        due_date: Set(new.due_date),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };

    Ok(todo.insert(conn).await?)
}

pub async fn find_by_id<C: ConnectionTrait>(conn: &C, id: i32) -> Result<Option<Model>> {
    Ok(PrivateTodos::find_by_id(id).one(conn).await?)
}

pub async fn list_by_owner<C: ConnectionTrait>(conn: &C, owner_user_id: i32) -> Result<Vec<Model>> {
    Ok(PrivateTodos::find()
        .filter(Column::OwnerUserId.eq(owner_user_id))
        .order_by_desc(Column::CreatedAt)
        .all(conn)
        .await?)
}

pub async fn update_todo<C: ConnectionTrait>(conn: &C, todo: Model, patch: TodoPatch) -> Result<Model> {
    let mut active = todo.into_active_model();

    if let Some(title) = patch.title {
        active.title = Set(title);
    }
    if let Some(description) = patch.description {
        active.description = Set(description);
    }
    if let Some(status) = patch.status {
        active.status = Set(status);
    }
    if let Some(due_date) = patch.due_date {
        active.due_date = Set(due_date);
    }
    active.updated_at = Set(Utc::now());

    Ok(active.update(conn).await?)
}

pub async fn delete_todo<C: ConnectionTrait>(conn: &C, todo: Model) -> Result<()> {
    todo.delete(conn).await?;
    Ok(())
}

pub async fn delete_by_owner<C: ConnectionTrait>(conn: &C, owner_user_id: i32) -> Result<()> {
    PrivateTodos::delete_many()
        .filter(Column::OwnerUserId.eq(owner_user_id))
        .exec(conn)
        .await?;
    Ok(())
}
