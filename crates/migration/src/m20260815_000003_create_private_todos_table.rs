use sea_orm_migration::{prelude::*, schema::*};

use crate::m20260815_000002_create_users_table::Users;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(PrivateTodos::Table)
                    .if_not_exists()
                    .col(pk_auto(PrivateTodos::Id))
                    .col(integer(PrivateTodos::OwnerUserId).not_null())
                    .col(string_len(PrivateTodos::Title, 255).not_null())
                    .col(text_null(PrivateTodos::Description))
                    .col(
                        string_len(PrivateTodos::Status, 20)
                            .not_null()
                            .default("TODO"),
                    )
                    .col(timestamp_with_time_zone_null(PrivateTodos::DueDate))
                    .col(
                        timestamp_with_time_zone(PrivateTodos::CreatedAt)
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp_with_time_zone(PrivateTodos::UpdatedAt)
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    // Restrict so user deletion goes through the application-level cascade
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_private_todos_owner_user_id")
                            .from(PrivateTodos::Table, PrivateTodos::OwnerUserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_private_todos_owner_user_id")
                    .table(PrivateTodos::Table)
                    .col(PrivateTodos::OwnerUserId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(PrivateTodos::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum PrivateTodos {
    Table,
    Id,
    OwnerUserId,
    Title,
    Description,
    Status,
    DueDate,
    CreatedAt,
    UpdatedAt,
}
