//! User persistence.
//!
//! Emails are normalized to lower case before they reach this module, so
//! the unique index on `email` enforces case-insensitive uniqueness.

use chrono::Utc;
use entity::users::{ActiveModel, Column, Entity as Users, Model, UserRole};
use error::Result;
use sea_orm::{
    ActiveModelTrait,
    ColumnTrait,
    ConnectionTrait,
    EntityTrait,
    ModelTrait,
    PaginatorTrait,
    QueryFilter,
    QueryOrder,
    Set,
};

pub struct NewUser<'a> {
    pub name:          &'a str,
    pub email:         &'a str,
    pub password_hash: &'a str,
    pub role:          UserRole,
    pub team_id:       Option<i32>,
}

pub async fn create_user<C: ConnectionTrait>(conn: &C, new: NewUser<'_>) -> Result<Model> {
    let now = Utc::now();
    let user = ActiveModel {
        name: Set(new.name.to_string()),
        email: Set(new.email.to_string()),
        password_hash: Set(new.password_hash.to_string()),
        role: Set(new.role),
        team_id: Set(new.team_id),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };

    Ok(user.insert(conn).await?)
}

pub async fn find_by_id<C: ConnectionTrait>(conn: &C, id: i32) -> Result<Option<Model>> {
    Ok(Users::find_by_id(id).one(conn).await?)
}

pub async fn find_by_email<C: ConnectionTrait>(conn: &C, email: &str) -> Result<Option<Model>> {
    Ok(Users::find()
        .filter(Column::Email.eq(email))
        .one(conn)
        .await?)
}

pub async fn count<C: ConnectionTrait>(conn: &C) -> Result<u64> {
    Ok(Users::find().count(conn).await?)
}

pub async fn list_by_team<C: ConnectionTrait>(conn: &C, team_id: i32) -> Result<Vec<Model>> {
    Ok(Users::find()
        .filter(Column::TeamId.eq(team_id))
        .order_by_asc(Column::Id)
        .all(conn)
        .await?)
}

/// Deletes a user and, first, everything they own. Run inside a
/// transaction: the schema restricts the FK instead of cascading.
pub async fn delete_user<C: ConnectionTrait>(conn: &C, user: Model) -> Result<()> {
    crate::store::private_todos::delete_by_owner(conn, user.id).await?;
    user.delete(conn).await?;
    Ok(())
}
