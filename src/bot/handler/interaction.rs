use sea_orm::DatabaseConnection;
use serenity::all::{
    ComponentInteraction, Context, CreateInteractionResponse, CreateInteractionResponseMessage,
    RoleId,
};

use crate::{
    data::role_panel::{RolePanelItemRepository, RolePanelRepository},
    error::AppError,
    service::role_panel::{parse_custom_id, plan_toggle, ToggleAction, ToggleLocks},
    util::parse_snowflake,
};

/// Handles a press on a role panel button.
///
/// Every reply is ephemeral. Interactions that cannot be attributed to a
/// live panel in the pressing member's guild are dropped without a reply.
pub async fn handle_panel_button(
    db: &DatabaseConnection,
    ctx: Context,
    locks: &ToggleLocks,
    interaction: ComponentInteraction,
) {
    let reply = match toggle(db, &ctx, locks, &interaction).await {
        Ok(Some(reply)) => reply,
        Ok(None) => return,
        Err(e) => {
            tracing::error!("Failed to toggle panel role: {}", e);
            "Could not update your roles.".to_string()
        }
    };

    let message = CreateInteractionResponseMessage::new()
        .content(reply)
        .ephemeral(true);
    if let Err(e) = interaction
        .create_response(&ctx.http, CreateInteractionResponse::Message(message))
        .await
    {
        tracing::warn!("Failed to reply to panel button press: {}", e);
    }
}

/// Resolves and applies one button press.
///
/// Returns the ephemeral reply text, or `None` when the press should be
/// ignored: unparseable custom ID, unknown panel, or a panel from another
/// guild.
async fn toggle(
    db: &DatabaseConnection,
    ctx: &Context,
    locks: &ToggleLocks,
    interaction: &ComponentInteraction,
) -> Result<Option<String>, AppError> {
    let Some((panel_id, item_id)) = parse_custom_id(&interaction.data.custom_id) else {
        return Ok(None);
    };
    let Some(guild_id) = interaction.guild_id else {
        return Ok(None);
    };
    let Some(member) = interaction.member.as_ref() else {
        return Ok(None);
    };

    let Some(panel) = RolePanelRepository::new(db).find_by_id(panel_id).await? else {
        return Ok(None);
    };
    if panel.guild_id != guild_id.to_string() {
        return Ok(None);
    }

    let items = RolePanelItemRepository::new(db).get_by_panel_id(panel_id).await?;
    let Some(target) = items.iter().find(|item| item.id == item_id) else {
        return Ok(Some("That panel button no longer exists.".to_string()));
    };

    let target_role = parse_snowflake(&target.role_id)?;
    let role_exists = {
        ctx.cache
            .guild(guild_id)
            .map(|guild| guild.roles.contains_key(&RoleId::new(target_role)))
            .unwrap_or(false)
    };
    if !role_exists {
        return Ok(Some("That role no longer exists on this server.".to_string()));
    }

    let mut panel_roles = Vec::with_capacity(items.len());
    for item in &items {
        panel_roles.push(parse_snowflake(&item.role_id)?);
    }

    // Serialize presses per (panel, member); the member's roles are re-read
    // under the lock so rapid double presses see each other's writes.
    let member_id = member.user.id;
    let lock = locks.acquire(panel_id, member_id.get());
    let outcome: Result<ToggleAction, AppError> = async {
        let _guard = lock.lock().await;

        let fresh = ctx.http.get_member(guild_id, member_id).await?;
        let held: Vec<u64> = fresh.roles.iter().map(|role| role.get()).collect();

        let action = plan_toggle(panel.mode, panel.allow_none, target_role, &panel_roles, &held);
        let reason = Some("Role panel");
        match &action {
            ToggleAction::Grant(role) => {
                ctx.http
                    .add_member_role(guild_id, member_id, RoleId::new(*role), reason)
                    .await?;
            }
            ToggleAction::Remove(role) => {
                ctx.http
                    .remove_member_role(guild_id, member_id, RoleId::new(*role), reason)
                    .await?;
            }
            ToggleAction::Switch { revoke, grant } => {
                for role in revoke {
                    ctx.http
                        .remove_member_role(guild_id, member_id, RoleId::new(*role), reason)
                        .await?;
                }
                ctx.http
                    .add_member_role(guild_id, member_id, RoleId::new(*grant), reason)
                    .await?;
            }
        }
        Ok(action)
    }
    .await;
    drop(lock);
    locks.release(panel_id, member_id.get());

    let reply = match outcome? {
        ToggleAction::Grant(role) | ToggleAction::Switch { grant: role, .. } => {
            format!("You now have <@&{}>.", role)
        }
        ToggleAction::Remove(role) => format!("Removed <@&{}>.", role),
    };
    Ok(Some(reply))
}
