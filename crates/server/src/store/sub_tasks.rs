//! Sub-task persistence. Sub-tasks drive the parent task's derived
//! progress, so listings are ordered oldest-first for stable display.

use chrono::Utc;
use entity::sub_tasks::{ActiveModel, Column, Entity as SubTasks, Model};
use entity::TaskStatus;
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

pub struct NewSubTask<'a> {
    pub team_task_id:        i32,
    pub title:               &'a str,
    pub status:              TaskStatus,
    pub responsible_user_id: Option<i32>,
}

/// Field deltas for a partial update. Outer `None` means "leave alone";
/// the inner `None` on `responsible_user_id` means "set to null".
#[derive(Debug, Default)]
pub struct SubTaskPatch {
    pub title:               Option<String>,
    pub status:              Option<TaskStatus>,
    pub responsible_user_id: Option<Option<i32>>,
}

pub async fn create_sub_task<C: ConnectionTrait>(conn: &C, new: NewSubTask<'_>) -> Result<Model> {
    let now = Utc::now();
    let sub_task = ActiveModel {
        team_task_id: Set(new.team_task_id),
        title: Set(new.title.to_string()),
        status: Set(new.status),
        responsible_user_id: Set(new.responsible_user_id),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };

    Ok(sub_task.insert(conn).await?)
}

pub async fn find_by_id<C: ConnectionTrait>(conn: &C, id: i32) -> Result<Option<Model>> {
    Ok(SubTasks::find_by_id(id).one(conn).await?)
}

pub async fn list_by_task<C: ConnectionTrait>(conn: &C, team_task_id: i32) -> Result<Vec<Model>> {
    Ok(SubTasks::find()
        .filter(Column::TeamTaskId.eq(team_task_id))
        .order_by_asc(Column::CreatedAt)
        .all(conn)
        .await?)
}

pub async fn update_sub_task<C: ConnectionTrait>(
    conn: &C,
    sub_task: Model,
    patch: SubTaskPatch,
) -> Result<Model> {
    let mut active = sub_task.into_active_model();

    if let Some(title) = patch.title {
        active.title = Set(title);
    }
    if let Some(status) = patch.status {
        active.status = Set(status);
    }
    if let Some(responsible_user_id) = patch.responsible_user_id {
        active.responsible_user_id = Set(responsible_user_id);
    }
    active.updated_at = Set(Utc::now());

    Ok(active.update(conn).await?)
}

pub async fn set_status<C: ConnectionTrait>(conn: &C, sub_task: Model, status: TaskStatus) -> Result<Model> {
    let mut active = sub_task.into_active_model();
    active.status = Set(status);
    active.updated_at = Set(Utc::now());

    Ok(active.update(conn).await?)
}

pub async fn delete_sub_task<C: ConnectionTrait>(conn: &C, sub_task: Model) -> Result<()> {
    sub_task.delete(conn).await?;
    Ok(())
}

pub async fn delete_by_task<C: ConnectionTrait>(conn: &C, team_task_id: i32) -> Result<()> {
    SubTasks::delete_many()
        .filter(Column::TeamTaskId.eq(team_task_id))
        .exec(conn)
        .await?;
    Ok(())
}
