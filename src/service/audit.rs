//! Audit event recording.
//!
//! Every tracked gateway event flows through `AuditService::record`: the event
//! is appended to the database first, then mirrored to the guild's configured
//! log channel as an embed. The database write is the source of truth; the
//! notification is best-effort and its failure never fails the operation.

use sea_orm::DatabaseConnection;
use serenity::{
    all::{ChannelId, ChannelType, CreateEmbed, CreateMessage, Timestamp},
    http::Http,
    model::channel::Channel,
};

use crate::{
    data::{audit::AuditEventRepository, guild_settings::GuildSettingsRepository},
    error::AppError,
    model::audit::AuditEntry,
    util::{parse_snowflake, truncate},
};

/// Embed field values are capped below Discord's 1024-character limit.
const FIELD_VALUE_MAX: usize = 1000;

/// Service for persisting audit events and mirroring them to a log channel.
pub struct AuditService<'a> {
    db: &'a DatabaseConnection,
    http: &'a Http,
}

impl<'a> AuditService<'a> {
    pub fn new(db: &'a DatabaseConnection, http: &'a Http) -> Self {
        Self { db, http }
    }

    /// Records one audit event.
    ///
    /// The row is inserted before any notification is attempted, so a Discord
    /// outage never loses the event. The embed is skipped silently when the
    /// guild has no log channel configured or the configured channel is not a
    /// text channel; a failed send is logged and swallowed.
    ///
    /// # Arguments
    /// - `entry` - The event to persist
    /// - `description` - Embed description shown in the log channel
    /// - `fields` - Embed fields as name/value pairs; values are truncated
    ///
    /// # Returns
    /// - `Ok(())` - Event persisted (notification may or may not have gone out)
    /// - `Err(AppError::DbErr)` - Database error during insert or settings lookup
    pub async fn record(
        &self,
        entry: &AuditEntry,
        description: &str,
        fields: &[(&str, String)],
    ) -> Result<(), AppError> {
        AuditEventRepository::new(self.db).create(entry).await?;

        let settings = GuildSettingsRepository::new(self.db)
            .find_by_guild_id(&entry.guild_id)
            .await?;

        let Some(log_channel_id) = settings.and_then(|s| s.log_channel_id) else {
            return Ok(());
        };

        let channel_id = ChannelId::new(parse_snowflake(&log_channel_id)?);

        // Only plain text channels receive log embeds.
        match self.http.get_channel(channel_id).await {
            Ok(Channel::Guild(channel)) if channel.kind == ChannelType::Text => {}
            Ok(_) => {
                tracing::warn!(
                    "Log channel {} for guild {} is not a text channel, skipping notification",
                    log_channel_id,
                    entry.guild_id
                );
                return Ok(());
            }
            Err(e) => {
                tracing::warn!(
                    "Failed to resolve log channel {} for guild {}: {}",
                    log_channel_id,
                    entry.guild_id,
                    e
                );
                return Ok(());
            }
        }

        let mut embed = CreateEmbed::new()
            .title(entry.kind.tag())
            .description(description)
            .color(entry.kind.color())
            .timestamp(Timestamp::now());

        for (name, value) in fields {
            embed = embed.field(*name, truncate(value, FIELD_VALUE_MAX), false);
        }

        if let Err(e) = channel_id
            .send_message(self.http, CreateMessage::new().embed(embed))
            .await
        {
            tracing::warn!(
                "Failed to send {} notification to channel {}: {}",
                entry.kind.tag(),
                log_channel_id,
                e
            );
        }

        Ok(())
    }
}
