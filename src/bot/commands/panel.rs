//! The `/panel` command group.

use sea_orm::DatabaseConnection;
use serenity::all::{
    ChannelType, CommandInteraction, CommandOptionType, Context, CreateCommand,
    CreateCommandOption, ResolvedOption,
};

use crate::{
    bot::commands::{
        bool_option, channel_option, ensure_admin_channel, ensure_administrator, int_option,
        reply_ephemeral, role_option, str_option, subcommand,
    },
    error::{command::CommandError, AppError},
    model::role_panel::{CreateRolePanelParam, PanelMode},
    service::role_panel::RolePanelService,
};

pub fn register() -> CreateCommand {
    CreateCommand::new("panel")
        .description("Manage role panels")
        .add_option(
            CreateCommandOption::new(CommandOptionType::SubCommand, "create", "Create a new panel")
                .add_sub_option(
                    CreateCommandOption::new(CommandOptionType::String, "mode", "Selection mode")
                        .add_string_choice("multi", "MULTI")
                        .add_string_choice("single", "SINGLE")
                        .required(true),
                )
                .add_sub_option(
                    CreateCommandOption::new(CommandOptionType::String, "title", "Panel title")
                        .required(true),
                )
                .add_sub_option(
                    CreateCommandOption::new(
                        CommandOptionType::String,
                        "description",
                        "Panel description",
                    )
                    .required(true),
                )
                .add_sub_option(CreateCommandOption::new(
                    CommandOptionType::Boolean,
                    "allow_none",
                    "Allow deselecting down to zero roles in single mode",
                )),
        )
        .add_option(
            CreateCommandOption::new(
                CommandOptionType::SubCommand,
                "add",
                "Add a role button to a panel",
            )
            .add_sub_option(
                CreateCommandOption::new(CommandOptionType::Integer, "panel_id", "Panel ID")
                    .required(true),
            )
            .add_sub_option(
                CreateCommandOption::new(CommandOptionType::String, "emoji", "Custom emoji")
                    .required(true),
            )
            .add_sub_option(
                CreateCommandOption::new(CommandOptionType::Role, "role", "Role to toggle")
                    .required(true),
            )
            .add_sub_option(
                CreateCommandOption::new(CommandOptionType::String, "label", "Button label")
                    .required(true),
            )
            .add_sub_option(CreateCommandOption::new(
                CommandOptionType::Integer,
                "order",
                "Sort order",
            )),
        )
        .add_option(
            CreateCommandOption::new(
                CommandOptionType::SubCommand,
                "remove",
                "Remove buttons matching an emoji from a panel",
            )
            .add_sub_option(
                CreateCommandOption::new(CommandOptionType::Integer, "panel_id", "Panel ID")
                    .required(true),
            )
            .add_sub_option(
                CreateCommandOption::new(CommandOptionType::String, "emoji", "Custom emoji")
                    .required(true),
            ),
        )
        .add_option(
            CreateCommandOption::new(CommandOptionType::SubCommand, "list", "List a panel's items")
                .add_sub_option(
                    CreateCommandOption::new(CommandOptionType::Integer, "panel_id", "Panel ID")
                        .required(true),
                ),
        )
        .add_option(
            CreateCommandOption::new(
                CommandOptionType::SubCommand,
                "publish",
                "Publish or refresh the panel message",
            )
            .add_sub_option(
                CreateCommandOption::new(CommandOptionType::Integer, "panel_id", "Panel ID")
                    .required(true),
            )
            .add_sub_option(
                CreateCommandOption::new(
                    CommandOptionType::Channel,
                    "channel",
                    "Target channel (defaults to the configured panel channel)",
                )
                .channel_types(vec![ChannelType::Text]),
            ),
        )
        .add_option(
            CreateCommandOption::new(
                CommandOptionType::SubCommand,
                "set_message",
                "Bind an existing message to a panel",
            )
            .add_sub_option(
                CreateCommandOption::new(CommandOptionType::Integer, "panel_id", "Panel ID")
                    .required(true),
            )
            .add_sub_option(
                CreateCommandOption::new(
                    CommandOptionType::Channel,
                    "channel",
                    "Channel holding the message",
                )
                .channel_types(vec![ChannelType::Text])
                .required(true),
            )
            .add_sub_option(
                CreateCommandOption::new(CommandOptionType::String, "message_id", "Message ID")
                    .required(true),
            ),
        )
}

/// Handles a `/panel` invocation.
///
/// The whole group requires Administrator and, once configured, the admin
/// channel.
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
    ensure_admin_channel(db, command, &guild_id).await?;

    let Some((sub, options)) = subcommand(command) else {
        return Err(AppError::BadRequest("Unknown subcommand.".to_string()));
    };

    let service = RolePanelService::new(db, &ctx.http);

    match sub {
        "create" => {
            let mode = PanelMode::parse(required_str(&options, "mode")?)?;
            let title = required_str(&options, "title")?.to_string();
            let description = required_str(&options, "description")?.to_string();
            let allow_none = bool_option(&options, "allow_none").unwrap_or(true);

            let panel = service
                .create_panel(CreateRolePanelParam {
                    guild_id,
                    mode,
                    allow_none,
                    title,
                    description,
                    created_by: command.user.id.to_string(),
                })
                .await?;

            let content = format!("Created panel {} ({}).", panel.id, panel.mode.as_str());
            reply_ephemeral(ctx, command, &content).await;
            Ok(())
        }
        "add" => {
            let panel_id = panel_id_option(&options)?;
            let emoji = required_str(&options, "emoji")?;
            let role = role_option(&options, "role")
                .ok_or_else(|| AppError::BadRequest("Pick a role for the button.".to_string()))?;
            let label = required_str(&options, "label")?.to_string();
            let order = int_option(&options, "order").and_then(|order| i32::try_from(order).ok());

            service
                .add_item(panel_id, &guild_id, emoji, role.id.to_string(), label, order)
                .await?;

            let content = format!("Added a button for <@&{}>.", role.id);
            reply_ephemeral(ctx, command, &content).await;
            Ok(())
        }
        "remove" => {
            let panel_id = panel_id_option(&options)?;
            let emoji = required_str(&options, "emoji")?;

            let removed = service
                .remove_items_by_emoji(panel_id, &guild_id, emoji)
                .await?;

            let content = format!("Removed {} item(s).", removed);
            reply_ephemeral(ctx, command, &content).await;
            Ok(())
        }
        "list" => {
            let panel_id = panel_id_option(&options)?;
            let (panel, items) = service.list_items(panel_id, &guild_id).await?;

            let content = if items.is_empty() {
                "No items on this panel yet.".to_string()
            } else {
                let lines: Vec<String> = items
                    .iter()
                    .map(|item| {
                        format!(
                            "{} | emoji:{} | role:<@&{}> | order:{}",
                            item.label, item.emoji_id, item.role_id, item.sort_order
                        )
                    })
                    .collect();
                format!(
                    "Panel {} ({}):\n{}",
                    panel.id,
                    panel.mode.as_str(),
                    lines.join("\n")
                )
            };
            reply_ephemeral(ctx, command, &content).await;
            Ok(())
        }
        "publish" => {
            let panel_id = panel_id_option(&options)?;
            let channel = channel_option(&options, "channel").map(|c| c.id.to_string());

            service.publish(panel_id, &guild_id, channel).await?;

            reply_ephemeral(ctx, command, "Panel published.").await;
            Ok(())
        }
        "set_message" => {
            let panel_id = panel_id_option(&options)?;
            let channel = channel_option(&options, "channel")
                .ok_or_else(|| AppError::BadRequest("Pick a channel.".to_string()))?;
            if channel.kind != ChannelType::Text {
                return Err(AppError::BadRequest("Pick a text channel.".to_string()));
            }
            let message_id = required_str(&options, "message_id")?;

            service
                .bind_message(panel_id, &guild_id, &channel.id.to_string(), message_id)
                .await?;

            reply_ephemeral(ctx, command, "Panel message bound.").await;
            Ok(())
        }
        other => Err(AppError::BadRequest(format!(
            "Unknown subcommand '{}'.",
            other
        ))),
    }
}

fn required_str<'a>(options: &[ResolvedOption<'a>], name: &str) -> Result<&'a str, AppError> {
    str_option(options, name)
        .ok_or_else(|| AppError::BadRequest(format!("Missing option '{}'.", name)))
}

fn panel_id_option(options: &[ResolvedOption<'_>]) -> Result<i32, AppError> {
    int_option(options, "panel_id")
        .and_then(|id| i32::try_from(id).ok())
        .ok_or_else(|| AppError::BadRequest("Pass a valid panel id.".to_string()))
}
