//! Slash command declarations and dispatch.
//!
//! Each command module exposes `register()` returning its `CreateCommand`
//! declaration and `run()` handling an invocation. The full set is
//! bulk-replaced at startup for the configured scope; every reply is
//! ephemeral so command traffic never lands in public channels.

pub mod config;
pub mod panel;

use sea_orm::DatabaseConnection;
use serenity::all::{
    CommandInteraction, Context, CreateCommand, CreateInteractionResponse,
    CreateInteractionResponseFollowup, CreateInteractionResponseMessage, PartialChannel,
    ResolvedOption, ResolvedValue, Role,
};

use crate::{
    data::guild_settings::GuildSettingsRepository,
    error::{command::CommandError, AppError},
};

/// The complete command set registered at startup.
pub fn registration() -> Vec<CreateCommand> {
    vec![config::register(), panel::register()]
}

/// Routes a command interaction to its handler and renders failures.
///
/// Guard failures and per-operation errors surface their own message;
/// everything else is logged and collapses to a generic ephemeral reply.
pub async fn dispatch(db: &DatabaseConnection, ctx: &Context, command: &CommandInteraction) {
    let result = match command.data.name.as_str() {
        "config" => config::run(db, ctx, command).await,
        "panel" => panel::run(db, ctx, command).await,
        other => {
            tracing::warn!("Received unknown command /{}", other);
            reply_ephemeral(ctx, command, "Unknown command.").await;
            return;
        }
    };

    if let Err(e) = result {
        if !matches!(
            e,
            AppError::CommandErr(_) | AppError::NotFound(_) | AppError::BadRequest(_)
        ) {
            tracing::error!("Command /{} failed: {}", command.data.name, e);
        }
        reply_ephemeral(ctx, command, &e.user_message()).await;
    }
}

/// Sends an ephemeral reply, falling back to a followup when the interaction
/// was already acknowledged.
pub async fn reply_ephemeral(ctx: &Context, command: &CommandInteraction, content: &str) {
    let message = CreateInteractionResponseMessage::new()
        .content(content)
        .ephemeral(true);
    if let Err(e) = command
        .create_response(&ctx.http, CreateInteractionResponse::Message(message))
        .await
    {
        tracing::debug!("Initial response failed, trying followup: {}", e);
        let followup = CreateInteractionResponseFollowup::new()
            .content(content)
            .ephemeral(true);
        if let Err(e) = command.create_followup(&ctx.http, followup).await {
            tracing::warn!("Failed to reply to /{}: {}", command.data.name, e);
        }
    }
}

/// Requires the invoking member to hold the Administrator permission.
pub fn ensure_administrator(command: &CommandInteraction) -> Result<(), AppError> {
    let is_admin = command
        .member
        .as_ref()
        .and_then(|member| member.permissions)
        .is_some_and(|perms| perms.administrator());
    if is_admin {
        Ok(())
    } else {
        Err(CommandError::AdministratorRequired.into())
    }
}

/// Requires the invocation to come from the configured admin channel.
///
/// A guild with no admin channel configured accepts the command anywhere;
/// the guard only binds once the channel is set.
pub async fn ensure_admin_channel(
    db: &DatabaseConnection,
    command: &CommandInteraction,
    guild_id: &str,
) -> Result<(), AppError> {
    let settings = GuildSettingsRepository::new(db)
        .find_by_guild_id(guild_id)
        .await?;
    if let Some(admin_channel) = settings.and_then(|s| s.admin_channel_id) {
        if command.channel_id.to_string() != admin_channel {
            return Err(CommandError::AdminChannelOnly.into());
        }
    }
    Ok(())
}

/// Returns the invoked subcommand with its nested options.
pub fn subcommand<'a>(command: &'a CommandInteraction) -> Option<(&'a str, Vec<ResolvedOption<'a>>)> {
    for option in command.data.options() {
        if let ResolvedValue::SubCommand(options) = option.value {
            return Some((option.name, options));
        }
    }
    None
}

pub fn str_option<'a>(options: &[ResolvedOption<'a>], name: &str) -> Option<&'a str> {
    options.iter().find_map(|option| match option.value {
        ResolvedValue::String(value) if option.name == name => Some(value),
        _ => None,
    })
}

pub fn int_option(options: &[ResolvedOption<'_>], name: &str) -> Option<i64> {
    options.iter().find_map(|option| match option.value {
        ResolvedValue::Integer(value) if option.name == name => Some(value),
        _ => None,
    })
}

pub fn bool_option(options: &[ResolvedOption<'_>], name: &str) -> Option<bool> {
    options.iter().find_map(|option| match option.value {
        ResolvedValue::Boolean(value) if option.name == name => Some(value),
        _ => None,
    })
}

pub fn channel_option<'a>(
    options: &[ResolvedOption<'a>],
    name: &str,
) -> Option<&'a PartialChannel> {
    options.iter().find_map(|option| match option.value {
        ResolvedValue::Channel(channel) if option.name == name => Some(channel),
        _ => None,
    })
}

pub fn role_option<'a>(options: &[ResolvedOption<'a>], name: &str) -> Option<&'a Role> {
    options.iter().find_map(|option| match option.value {
        ResolvedValue::Role(role) if option.name == name => Some(role),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn registered_command_names_are_unique() {
        let names: Vec<String> = registration()
            .iter()
            .map(|command| {
                serde_json::to_value(command).unwrap()["name"]
                    .as_str()
                    .unwrap()
                    .to_string()
            })
            .collect();

        let unique: HashSet<&String> = names.iter().collect();
        assert_eq!(unique.len(), names.len());
        assert!(names.contains(&"config".to_string()));
        assert!(names.contains(&"panel".to_string()));
    }
}
