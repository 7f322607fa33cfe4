use sea_orm_migration::{prelude::*, schema::*};

use crate::m20260801_000003_create_role_panel_table::RolePanel;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(RolePanelItem::Table)
                    .if_not_exists()
                    .col(pk_auto(RolePanelItem::Id))
                    .col(integer(RolePanelItem::PanelId))
                    .col(string(RolePanelItem::EmojiId))
                    .col(string(RolePanelItem::RoleId))
                    .col(string(RolePanelItem::Label))
                    .col(integer(RolePanelItem::SortOrder))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_role_panel_item_panel")
                            .from(RolePanelItem::Table, RolePanelItem::PanelId)
                            .to(RolePanel::Table, RolePanel::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_role_panel_item_panel_emoji")
                    .table(RolePanelItem::Table)
                    .col(RolePanelItem::PanelId)
                    .col(RolePanelItem::EmojiId)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(RolePanelItem::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum RolePanelItem {
    Table,
    Id,
    PanelId,
    EmojiId,
    RoleId,
    Label,
    SortOrder,
}
