//! The `/config` command group.

use sea_orm::DatabaseConnection;
use serde_json::json;
use serenity::all::{
    ChannelType, CommandInteraction, CommandOptionType, Context, CreateCommand,
    CreateCommandOption,
};

use crate::{
    bot::commands::{
        channel_option, ensure_admin_channel, ensure_administrator, reply_ephemeral, subcommand,
    },
    data::guild_settings::GuildSettingsRepository,
    error::{command::CommandError, AppError},
    model::{
        audit::{AuditEntry, AuditKind},
        guild_settings::{GuildSettings, UpdateGuildSettingsParam},
    },
    service::audit::AuditService,
};

pub fn register() -> CreateCommand {
    CreateCommand::new("config")
        .description("Manage guild settings")
        .add_option(
            CreateCommandOption::new(
                CommandOptionType::SubCommand,
                "set",
                "Set the panel, admin and log channels",
            )
            .add_sub_option(
                CreateCommandOption::new(
                    CommandOptionType::Channel,
                    "role_channel",
                    "Channel for published role panels",
                )
                .channel_types(vec![ChannelType::Text]),
            )
            .add_sub_option(
                CreateCommandOption::new(
                    CommandOptionType::Channel,
                    "admin_channel",
                    "Channel admin commands are restricted to",
                )
                .channel_types(vec![ChannelType::Text]),
            )
            .add_sub_option(
                CreateCommandOption::new(
                    CommandOptionType::Channel,
                    "log_channel",
                    "Channel for audit log embeds",
                )
                .channel_types(vec![ChannelType::Text]),
            ),
        )
        .add_option(CreateCommandOption::new(
            CommandOptionType::SubCommand,
            "show",
            "Show the current settings",
        ))
}

/// Handles a `/config` invocation.
pub async fn run(
    db: &DatabaseConnection,
    ctx: &Context,
    command: &CommandInteraction,
) -> Result<(), AppError> {
    let guild_id = command
        .guild_id
        .ok_or(CommandError::GuildOnly)?
        .to_string();
    ensure_administrator(command)?;

    let Some((sub, options)) = subcommand(command) else {
        return Err(AppError::BadRequest("Unknown subcommand.".to_string()));
    };

    match sub {
        "show" => {
            let settings = GuildSettingsRepository::new(db)
                .find_by_guild_id(&guild_id)
                .await?;
            reply_ephemeral(ctx, command, &render_settings(settings.as_ref())).await;
            Ok(())
        }
        "set" => {
            ensure_admin_channel(db, command, &guild_id).await?;

            let param = UpdateGuildSettingsParam {
                role_panel_channel_id: channel_option(&options, "role_channel")
                    .map(|channel| channel.id.to_string()),
                admin_channel_id: channel_option(&options, "admin_channel")
                    .map(|channel| channel.id.to_string()),
                log_channel_id: channel_option(&options, "log_channel")
                    .map(|channel| channel.id.to_string()),
            };
            if param.is_empty() {
                return Err(AppError::BadRequest(
                    "Pass at least one channel to update.".to_string(),
                ));
            }

            let updated = GuildSettingsRepository::new(db)
                .upsert(&guild_id, param)
                .await?;

            let details = json!({
                "role_panel_channel_id": updated.role_panel_channel_id,
                "admin_channel_id": updated.admin_channel_id,
                "log_channel_id": updated.log_channel_id,
            });
            let entry = AuditEntry {
                guild_id: guild_id.clone(),
                kind: AuditKind::ConfigUpdated,
                actor_id: command.user.id.to_string(),
                channel_id: None,
                target_id: None,
                details: details.clone(),
            };
            let changes = serde_json::to_string_pretty(&details).unwrap_or_default();
            AuditService::new(db, &ctx.http)
                .record(
                    &entry,
                    "Guild settings were updated.",
                    &[("Changes", changes)],
                )
                .await?;

            let content = format!("Settings updated.\n{}", render_settings(Some(&updated)));
            reply_ephemeral(ctx, command, &content).await;
            Ok(())
        }
        other => Err(AppError::BadRequest(format!(
            "Unknown subcommand '{}'.",
            other
        ))),
    }
}

fn render_settings(settings: Option<&GuildSettings>) -> String {
    let channel = |value: Option<&String>| {
        value
            .map(|id| format!("<#{}>", id))
            .unwrap_or_else(|| "-".to_string())
    };
    format!(
        "role_channel: {}\nadmin_channel: {}\nlog_channel: {}\nupdated_at: {}",
        channel(settings.and_then(|s| s.role_panel_channel_id.as_ref())),
        channel(settings.and_then(|s| s.admin_channel_id.as_ref())),
        channel(settings.and_then(|s| s.log_channel_id.as_ref())),
        settings
            .map(|s| s.updated_at.to_rfc3339())
            .unwrap_or_else(|| "-".to_string()),
    )
}
