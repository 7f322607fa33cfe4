pub use sea_orm_migration::prelude::*;

mod m20260801_000001_create_guild_settings_table;
mod m20260801_000002_create_audit_event_table;
mod m20260801_000003_create_role_panel_table;
mod m20260801_000004_create_role_panel_item_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260801_000001_create_guild_settings_table::Migration),
            Box::new(m20260801_000002_create_audit_event_table::Migration),
            Box::new(m20260801_000003_create_role_panel_table::Migration),
            Box::new(m20260801_000004_create_role_panel_item_table::Migration),
        ]
    }
}
