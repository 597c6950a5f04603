//! Sub-Tasks Entity
//!
//! Child items of a team task. Their DONE ratio drives the parent task's
//! derived progress.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

pub use super::team_tasks::TaskStatus;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "sub_tasks")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id:                  i32,
    pub team_task_id:        i32,
    pub title:               String,
    pub status:              TaskStatus,
    pub responsible_user_id: Option<i32>,
    pub created_at:          chrono::DateTime<chrono::Utc>,
    pub updated_at:          chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::team_tasks::Entity",
        from = "Column::TeamTaskId",
        to = "super::team_tasks::Column::Id",
        on_update = "NoAction",
        on_delete = "Restrict"
    )]
    TeamTask,
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::ResponsibleUserId",
        to = "super::users::Column::Id",
        on_update = "NoAction",
        on_delete = "SetNull"
    )]
    ResponsibleUser,
}

impl Related<super::team_tasks::Entity> for Entity {
    fn to() -> RelationDef { Relation::TeamTask.def() }
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef { Relation::ResponsibleUser.def() }
}

impl ActiveModelBehavior for ActiveModel {}
