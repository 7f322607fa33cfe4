use sea_orm::entity::prelude::*;

/// One button on a role panel. At most one item per `(panel_id, emoji_id)`;
/// enforced at creation and by a unique index in the migration.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "role_panel_item")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub panel_id: i32,
    pub emoji_id: String,
    pub role_id: String,
    pub label: String,
    pub sort_order: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::role_panel::Entity",
        from = "Column::PanelId",
        to = "super::role_panel::Column::Id"
    )]
    RolePanel,
}

impl Related<super::role_panel::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::RolePanel.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
