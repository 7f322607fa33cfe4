use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter,
};

use crate::model::guild_settings::{GuildSettings, UpdateGuildSettingsParam};

pub struct GuildSettingsRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> GuildSettingsRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn find_by_guild_id(&self, guild_id: &str) -> Result<Option<GuildSettings>, DbErr> {
        let model = entity::prelude::GuildSettings::find()
            .filter(entity::guild_settings::Column::GuildId.eq(guild_id))
            .one(self.db)
            .await?;
        Ok(model.map(GuildSettings::from))
    }

    /// Creates or updates the settings row for a guild.
    ///
    /// Field-wise merge: a `Some` in `param` overwrites the stored value, a
    /// `None` keeps it. The row is created lazily on the first call for a
    /// guild; `updated_at` is bumped on every write.
    pub async fn upsert(
        &self,
        guild_id: &str,
        param: UpdateGuildSettingsParam,
    ) -> Result<GuildSettings, DbErr> {
        let existing = entity::prelude::GuildSettings::find()
            .filter(entity::guild_settings::Column::GuildId.eq(guild_id))
            .one(self.db)
            .await?;

        let model = match existing {
            Some(model) => {
                let mut active: entity::guild_settings::ActiveModel = model.into();
                if let Some(channel_id) = param.role_panel_channel_id {
                    active.role_panel_channel_id = ActiveValue::Set(Some(channel_id));
                }
                if let Some(channel_id) = param.admin_channel_id {
                    active.admin_channel_id = ActiveValue::Set(Some(channel_id));
                }
                if let Some(channel_id) = param.log_channel_id {
                    active.log_channel_id = ActiveValue::Set(Some(channel_id));
                }
                active.updated_at = ActiveValue::Set(Utc::now());
                active.update(self.db).await?
            }
            None => {
                entity::guild_settings::ActiveModel {
                    guild_id: ActiveValue::Set(guild_id.to_string()),
                    role_panel_channel_id: ActiveValue::Set(param.role_panel_channel_id),
                    admin_channel_id: ActiveValue::Set(param.admin_channel_id),
                    log_channel_id: ActiveValue::Set(param.log_channel_id),
                    updated_at: ActiveValue::Set(Utc::now()),
                    ..Default::default()
                }
                .insert(self.db)
                .await?
            }
        };

        Ok(GuildSettings::from(model))
    }
}
