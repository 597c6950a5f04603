//! Users Entity
//!
//! System users with credentials, role, and optional team membership.
//! Emails are stored lower-cased; uniqueness is therefore case-insensitive.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id:            i32,
    pub name:          String,
    #[sea_orm(unique)]
    pub email:         String,
    pub password_hash: String,
    pub role:          UserRole,
    pub team_id:       Option<i32>,
    pub created_at:    chrono::DateTime<chrono::Utc>,
    pub updated_at:    chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::teams::Entity",
        from = "Column::TeamId",
        to = "super::teams::Column::Id",
        on_update = "NoAction",
        on_delete = "SetNull"
    )]
    Team,
    #[sea_orm(has_many = "super::private_todos::Entity")]
    PrivateTodos,
}

impl Related<super::teams::Entity> for Entity {
    fn to() -> RelationDef { Relation::Team.def() }
}

impl Related<super::private_todos::Entity> for Entity {
    fn to() -> RelationDef { Relation::PrivateTodos.def() }
}

impl ActiveModelBehavior for ActiveModel {}

/// User role enumeration. The first registered user is `Admin`; every
/// subsequent user is `Member`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserRole {
    #[sea_orm(string_value = "ADMIN")]
    Admin,
    #[sea_orm(string_value = "MEMBER")]
    Member,
}

impl UserRole {
    /// True for users allowed to mutate team tasks and sub-tasks.
    pub fn is_admin(self) -> bool { matches!(self, UserRole::Admin) }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UserRole::Admin => write!(f, "ADMIN"),
            UserRole::Member => write!(f, "MEMBER"),
        }
    }
}
