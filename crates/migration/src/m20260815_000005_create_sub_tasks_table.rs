use sea_orm_migration::{prelude::*, schema::*};

use crate::{
    m20260815_000002_create_users_table::Users,
    m20260815_000004_create_team_tasks_table::TeamTasks,
};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(SubTasks::Table)
                    .if_not_exists()
                    .col(pk_auto(SubTasks::Id))
                    .col(integer(SubTasks::TeamTaskId).not_null())
                    .col(string_len(SubTasks::Title, 255).not_null())
                    .col(
                        string_len(SubTasks::Status, 20)
                            .not_null()
                            .default("TODO"),
                    )
                    .col(integer_null(SubTasks::ResponsibleUserId))
                    .col(
                        timestamp_with_time_zone(SubTasks::CreatedAt)
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp_with_time_zone(SubTasks::UpdatedAt)
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    // Restrict so task deletion goes through the application-level cascade
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_sub_tasks_team_task_id")
                            .from(SubTasks::Table, SubTasks::TeamTaskId)
                            .to(TeamTasks::Table, TeamTasks::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_sub_tasks_responsible_user_id")
                            .from(SubTasks::Table, SubTasks::ResponsibleUserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_sub_tasks_team_task_id")
                    .table(SubTasks::Table)
                    .col(SubTasks::TeamTaskId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(SubTasks::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum SubTasks {
    Table,
    Id,
    TeamTaskId,
    Title,
    Status,
    ResponsibleUserId,
    CreatedAt,
    UpdatedAt,
}
