//! Team persistence.

use chrono::Utc;
use entity::teams::{ActiveModel, Entity as Teams, Model};
use error::Result;
use sea_orm::{ActiveModelTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryOrder, Set};

pub async fn create_team<C: ConnectionTrait>(conn: &C, name: &str) -> Result<Model> {
    let now = Utc::now();
    let team = ActiveModel {
        name: Set(name.to_string()),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };

    Ok(team.insert(conn).await?)
}

pub async fn find_by_id<C: ConnectionTrait>(conn: &C, id: i32) -> Result<Option<Model>> {
    Ok(Teams::find_by_id(id).one(conn).await?)
}

/// The registration flow attaches every user to one shared team, created on
/// first use.
pub async fn get_or_create_default<C: ConnectionTrait>(conn: &C) -> Result<Model> {
    let existing = Teams::find()
        .order_by_asc(entity::teams::Column::Id)
        .one(conn)
        .await?;

    match existing {
        Some(team) => Ok(team),
        None => create_team(conn, "Default Team").await,
    }
}

pub async fn count<C: ConnectionTrait>(conn: &C) -> Result<u64> {
    Ok(Teams::find().count(conn).await?)
}
