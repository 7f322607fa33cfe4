use chrono::{DateTime, Utc};

/// Per-guild configuration as seen by services and command handlers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GuildSettings {
    pub guild_id: String,
    pub role_panel_channel_id: Option<String>,
    pub admin_channel_id: Option<String>,
    pub log_channel_id: Option<String>,
    pub updated_at: DateTime<Utc>,
}

impl From<entity::guild_settings::Model> for GuildSettings {
    fn from(model: entity::guild_settings::Model) -> Self {
        Self {
            guild_id: model.guild_id,
            role_panel_channel_id: model.role_panel_channel_id,
            admin_channel_id: model.admin_channel_id,
            log_channel_id: model.log_channel_id,
            updated_at: model.updated_at,
        }
    }
}

/// Field-wise update for `/config set`: `Some` overwrites the stored value,
/// `None` keeps it. There is no way to unset a configured channel.
#[derive(Clone, Debug, Default)]
pub struct UpdateGuildSettingsParam {
    pub role_panel_channel_id: Option<String>,
    pub admin_channel_id: Option<String>,
    pub log_channel_id: Option<String>,
}

impl UpdateGuildSettingsParam {
    /// True when the command carried no channel options at all.
    pub fn is_empty(&self) -> bool {
        self.role_panel_channel_id.is_none()
            && self.admin_channel_id.is_none()
            && self.log_channel_id.is_none()
    }
}
