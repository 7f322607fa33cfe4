//! SeaORM entity definitions for the guildkeeper database schema.

pub mod audit_event;
pub mod guild_settings;
pub mod role_panel;
pub mod role_panel_item;

pub mod prelude {
    pub use super::audit_event::Entity as AuditEvent;
    pub use super::guild_settings::Entity as GuildSettings;
    pub use super::role_panel::Entity as RolePanel;
    pub use super::role_panel_item::Entity as RolePanelItem;
}
