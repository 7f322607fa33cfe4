use sea_orm::entity::prelude::*;

/// A role self-assignment panel. `published_channel_id` and
/// `published_message_id` are either both null (unpublished) or both set,
/// referring to the one message mirroring the current item set.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "role_panel")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub guild_id: String,
    pub mode: String,
    pub allow_none: bool,
    pub title: String,
    pub description: String,
    pub created_by: String,
    pub published_channel_id: Option<String>,
    pub published_message_id: Option<String>,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::role_panel_item::Entity")]
    RolePanelItem,
}

impl Related<super::role_panel_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::RolePanelItem.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
