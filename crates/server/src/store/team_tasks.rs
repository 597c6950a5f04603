//! Team task persistence.

use chrono::Utc;
use entity::team_tasks::{ActiveModel, Column, Entity as TeamTasks, Model, TaskStatus};
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

pub struct NewTask<'a> {
    pub team_id:          i32,
    pub title:            &'a str,
    pub description:      Option<&'a str>,
    pub status:           TaskStatus,
    pub assigned_user_id: Option<i32>,
}

/// Field deltas for a partial update. Outer `None` means "leave alone";
/// for clearable fields the inner `None` means "set to null".
#[derive(Debug, Default)]
pub struct TaskPatch {
    pub title:            Option<String>,
    pub description:      Option<Option<String>>,
    pub status:           Option<TaskStatus>,
    pub assigned_user_id: Option<Option<i32>>,
}

pub async fn create_task<C: ConnectionTrait>(conn: &C, new: NewTask<'_>) -> Result<Model> {
    let now = Utc::now();
    let task = ActiveModel {
        team_id: Set(new.team_id),
        title: Set(new.title.to_string()),
        description: Set(new.description.map(str::to_string)),
        status: Set(new.status),
        assigned_user_id: Set(new.assigned_user_id),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };

    Ok(task.insert(conn).await?)
}

pub async fn find_by_id<C: ConnectionTrait>(conn: &C, id: i32) -> Result<Option<Model>> {
    Ok(TeamTasks::find_by_id(id).one(conn).await?)
}

pub async fn list_by_team<C: ConnectionTrait>(conn: &C, team_id: i32) -> Result<Vec<Model>> {
    Ok(TeamTasks::find()
        .filter(Column::TeamId.eq(team_id))
        .order_by_desc(Column::CreatedAt)
        .all(conn)
        .await?)
}

pub async fn update_task<C: ConnectionTrait>(conn: &C, task: Model, patch: TaskPatch) -> Result<Model> {
    let mut active = task.into_active_model();

    if let Some(title) = patch.title {
        active.title = Set(title);
    }
    if let Some(description) = patch.description {
        active.description = Set(description);
    }
    if let Some(status) = patch.status {
        active.status = Set(status);
    }
    if let Some(assigned_user_id) = patch.assigned_user_id {
        active.assigned_user_id = Set(assigned_user_id);
    }
    active.updated_at = Set(Utc::now());

    Ok(active.update(conn).await?)
}

pub async fn set_status<C: ConnectionTrait>(conn: &C, task: Model, status: TaskStatus) -> Result<Model> {
    let mut active = task.into_active_model();
    active.status = Set(status);
    active.updated_at = Set(Utc::now());

    Ok(active.update(conn).await?)
}

/// Deletes a task and its sub-tasks. Run inside a transaction: the schema
/// restricts the FK instead of cascading.
pub async fn delete_task<C: ConnectionTrait>(conn: &C, task: Model) -> Result<()> {
    crate::store::sub_tasks::delete_by_task(conn, task.id).await?;
    task.delete(conn).await?;
    Ok(())
}
