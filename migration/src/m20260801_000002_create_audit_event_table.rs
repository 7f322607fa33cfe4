use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(AuditEvent::Table)
                    .if_not_exists()
                    .col(pk_auto(AuditEvent::Id))
                    .col(string(AuditEvent::GuildId))
                    .col(string(AuditEvent::EventType))
                    .col(string(AuditEvent::ActorId))
                    .col(string_null(AuditEvent::ChannelId))
                    .col(string_null(AuditEvent::TargetId))
                    .col(json(AuditEvent::Details))
                    .col(timestamp_with_time_zone(AuditEvent::CreatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_audit_event_guild_created")
                    .table(AuditEvent::Table)
                    .col(AuditEvent::GuildId)
                    .col(AuditEvent::CreatedAt)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(AuditEvent::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum AuditEvent {
    Table,
    Id,
    GuildId,
    EventType,
    ActorId,
    ChannelId,
    TargetId,
    Details,
    CreatedAt,
}
