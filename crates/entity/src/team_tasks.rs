//! Team Tasks Entity
//!
//! Tasks visible to every member of their team. The `progress` metric is
//! derived from sub-task completion on read and is never stored here.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "team_tasks")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id:               i32,
    pub team_id:          i32,
    pub title:            String,
    #[sea_orm(column_type = "Text", nullable)]
    pub description:      Option<String>,
    pub status:           TaskStatus,
    pub assigned_user_id: Option<i32>,
    pub created_at:       chrono::DateTime<chrono::Utc>,
    pub updated_at:       chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::teams::Entity",
        from = "Column::TeamId",
        to = "super::teams::Column::Id",
        on_update = "NoAction",
        on_delete = "Restrict"
    )]
    Team,
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::AssignedUserId",
        to = "super::users::Column::Id",
        on_update = "NoAction",
        on_delete = "SetNull"
    )]
    AssignedUser,
    #[sea_orm(has_many = "super::sub_tasks::Entity")]
    SubTasks,
}

impl Related<super::teams::Entity> for Entity {
    fn to() -> RelationDef { Relation::Team.def() }
}

impl Related<super::sub_tasks::Entity> for Entity {
    fn to() -> RelationDef { Relation::SubTasks.def() }
}

impl ActiveModelBehavior for ActiveModel {}

/// Status enumeration shared by team tasks and sub-tasks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskStatus {
    #[sea_orm(string_value = "TODO")]
    Todo,
    #[sea_orm(string_value = "IN_PROGRESS")]
    InProgress,
    #[sea_orm(string_value = "BLOCKED")]
    Blocked,
    #[sea_orm(string_value = "DONE")]
    Done,
}

impl TaskStatus {
    /// Wire values accepted for this enum, for validation messages.
    pub const VALUES: &'static [&'static str] = &["TODO", "IN_PROGRESS", "BLOCKED", "DONE"];
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TaskStatus::Todo => write!(f, "TODO"),
            TaskStatus::InProgress => write!(f, "IN_PROGRESS"),
            TaskStatus::Blocked => write!(f, "BLOCKED"),
            TaskStatus::Done => write!(f, "DONE"),
        }
    }
}

impl std::str::FromStr for TaskStatus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "TODO" => Ok(TaskStatus::Todo),
            "IN_PROGRESS" => Ok(TaskStatus::InProgress),
            "BLOCKED" => Ok(TaskStatus::Blocked),
            "DONE" => Ok(TaskStatus::Done),
            _ => Err(()),
        }
    }
}
