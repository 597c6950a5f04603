use sea_orm_migration::{prelude::*, schema::*};

use crate::{
    m20260815_000001_create_teams_table::Teams,
    m20260815_000002_create_users_table::Users,
};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(TeamTasks::Table)
                    .if_not_exists()
                    .col(pk_auto(TeamTasks::Id))
                    .col(integer(TeamTasks::TeamId).not_null())
                    .col(string_len(TeamTasks::Title, 255).not_null())
                    .col(text_null(TeamTasks::Description))
                    .col(
                        string_len(TeamTasks::Status, 20)
                            .not_null()
                            .default("TODO"),
                    )
                    .col(integer_null(TeamTasks::AssignedUserId))
                    .col(
                        timestamp_with_time_zone(TeamTasks::CreatedAt)
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp_with_time_zone(TeamTasks::UpdatedAt)
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_team_tasks_team_id")
                            .from(TeamTasks::Table, TeamTasks::TeamId)
                            .to(Teams::Table, Teams::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_team_tasks_assigned_user_id")
                            .from(TeamTasks::Table, TeamTasks::AssignedUserId)
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
                    .name("idx_team_tasks_team_id")
                    .table(TeamTasks::Table)
                    .col(TeamTasks::TeamId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_team_tasks_assigned_user_id")
                    .table(TeamTasks::Table)
                    .col(TeamTasks::AssignedUserId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(TeamTasks::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum TeamTasks {
    Table,
    Id,
    TeamId,
    Title,
    Description,
    Status,
    AssignedUserId,
    CreatedAt,
    UpdatedAt,
}
