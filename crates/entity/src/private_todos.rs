//! Private Todos Entity
//!
//! Todo items strictly scoped to their owning user.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "private_todos")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id:            i32,
    pub owner_user_id: i32,
    pub title:         String,
    #[sea_orm(column_type = "Text", nullable)]
    pub description:   Option<String>,
    pub status:        TodoStatus,
    pub due_date:      Option<chrono::DateTime<chrono::Utc>>,
    pub created_at:    chrono::DateTime<chrono::Utc>,
    pub updated_at:    chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::OwnerUserId",
        to = "super::users::Column::Id",
        on_update = "NoAction",
        on_delete = "Restrict"
    )]
    Owner,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef { Relation::Owner.def() }
}

impl ActiveModelBehavior for ActiveModel {}

/// Private todo status enumeration (no BLOCKED state, unlike team tasks).
#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TodoStatus {
    #[sea_orm(string_value = "TODO")]
    Todo,
    #[sea_orm(string_value = "IN_PROGRESS")]
    InProgress,
    #[sea_orm(string_value = "DONE")]
    Done,
}

impl TodoStatus {
    /// Wire values accepted for this enum, for validation messages.
    pub const VALUES: &'static [&'static str] = &["TODO", "IN_PROGRESS", "DONE"];
}

impl std::fmt::Display for TodoStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TodoStatus::Todo => write!(f, "TODO"),
            TodoStatus::InProgress => write!(f, "IN_PROGRESS"),
            TodoStatus::Done => write!(f, "DONE"),
        }
    }
}

impl std::str::FromStr for TodoStatus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "TODO" => Ok(TodoStatus::Todo),
            "IN_PROGRESS" => Ok(TodoStatus::InProgress),
            "DONE" => Ok(TodoStatus::Done),
            _ => Err(()),
        }
    }
}
