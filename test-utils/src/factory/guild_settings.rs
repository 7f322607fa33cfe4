//! Guild settings factory for creating test settings rows.

use crate::factory::helpers::next_id;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating test guild settings with customizable fields.
///
/// # Example
///
/// ```rust,ignore
/// use test_utils::factory::guild_settings::GuildSettingsFactory;
///
/// let settings = GuildSettingsFactory::new(&db)
///     .guild_id("987654321")
///     .log_channel_id(Some("111".to_string()))
///     .build()
///     .await?;
/// ```
pub struct GuildSettingsFactory<'a> {
    db: &'a DatabaseConnection,
    guild_id: String,
    role_panel_channel_id: Option<String>,
    admin_channel_id: Option<String>,
    log_channel_id: Option<String>,
}

impl<'a> GuildSettingsFactory<'a> {
    /// Creates a new factory with defaults: an auto-generated guild id and
    /// every channel field unset.
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self {
            db,
            guild_id: next_id().to_string(),
            role_panel_channel_id: None,
            admin_channel_id: None,
            log_channel_id: None,
        }
    }

    /// Sets the guild ID.
    pub fn guild_id(mut self, guild_id: impl Into<String>) -> Self {
        self.guild_id = guild_id.into();
        self
    }

    /// Sets the role panel channel ID.
    pub fn role_panel_channel_id(mut self, channel_id: Option<String>) -> Self {
        self.role_panel_channel_id = channel_id;
        self
    }

    /// Sets the admin command channel ID.
    pub fn admin_channel_id(mut self, channel_id: Option<String>) -> Self {
        self.admin_channel_id = channel_id;
        self
    }

    /// Sets the audit log channel ID.
    pub fn log_channel_id(mut self, channel_id: Option<String>) -> Self {
        self.log_channel_id = channel_id;
        self
    }

    /// Builds and inserts the settings row.
    ///
    /// # Returns
    /// - `Ok(entity::guild_settings::Model)` - Created settings row
    /// - `Err(DbErr)` - Database error during insert
    pub async fn build(self) -> Result<entity::guild_settings::Model, DbErr> {
        entity::guild_settings::ActiveModel {
            guild_id: ActiveValue::Set(self.guild_id),
            role_panel_channel_id: ActiveValue::Set(self.role_panel_channel_id),
            admin_channel_id: ActiveValue::Set(self.admin_channel_id),
            log_channel_id: ActiveValue::Set(self.log_channel_id),
            updated_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

/// Creates a guild settings row with default values.
///
/// # Arguments
/// - `db` - Database connection
///
/// # Returns
/// - `Ok(entity::guild_settings::Model)` - Created settings row
/// - `Err(DbErr)` - Database error during insert
pub async fn create_settings(
    db: &DatabaseConnection,
) -> Result<entity::guild_settings::Model, DbErr> {
    GuildSettingsFactory::new(db).build().await
}
