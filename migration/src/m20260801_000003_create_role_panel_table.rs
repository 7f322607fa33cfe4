use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(RolePanel::Table)
                    .if_not_exists()
                    .col(pk_auto(RolePanel::Id))
                    .col(string(RolePanel::GuildId))
                    .col(string(RolePanel::Mode))
                    .col(boolean(RolePanel::AllowNone))
                    .col(string(RolePanel::Title))
                    .col(string(RolePanel::Description))
                    .col(string(RolePanel::CreatedBy))
                    .col(string_null(RolePanel::PublishedChannelId))
                    .col(string_null(RolePanel::PublishedMessageId))
                    .col(timestamp_with_time_zone(RolePanel::CreatedAt))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(RolePanel::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum RolePanel {
    Table,
    Id,
    GuildId,
    Mode,
    AllowNone,
    Title,
    Description,
    CreatedBy,
    PublishedChannelId,
    PublishedMessageId,
    CreatedAt,
}
