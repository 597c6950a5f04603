//! # Database Migrations
//!
//! Schema migrations for the Taskish database, managed with Sea-ORM's
//! migration framework. Migrations are executed in the order they appear
//! in [`Migrator::migrations`].

pub use sea_orm_migration::prelude::*;

mod m20260815_000001_create_teams_table;
mod m20260815_000002_create_users_table;
mod m20260815_000003_create_private_todos_table;
mod m20260815_000004_create_team_tasks_table;
mod m20260815_000005_create_sub_tasks_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260815_000001_create_teams_table::Migration),
            Box::new(m20260815_000002_create_users_table::Migration),
            Box::new(m20260815_000003_create_private_todos_table::Migration),
            Box::new(m20260815_000004_create_team_tasks_table::Migration),
            Box::new(m20260815_000005_create_sub_tasks_table::Migration),
        ]
    }
}

/// Database connection helper for CLI usage
pub async fn connect_to_database(database_url: &str) -> Result<sea_orm::DatabaseConnection, sea_orm::DbErr> {
    sea_orm::Database::connect(database_url).await
}
