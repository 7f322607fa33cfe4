use std::collections::HashSet;

use sea_orm::DatabaseConnection;
use serde_json::json;
use serenity::all::{
    Context, GuildId, GuildMemberUpdateEvent, Member, RoleId, User,
};

use crate::{
    model::audit::{AuditEntry, AuditKind},
    service::audit::AuditService,
};

/// Handles the guild_member_addition event when a member joins a guild.
pub async fn handle_guild_member_addition(db: &DatabaseConnection, ctx: Context, member: Member) {
    let entry = AuditEntry {
        guild_id: member.guild_id.to_string(),
        kind: AuditKind::MemberJoin,
        actor_id: member.user.id.to_string(),
        channel_id: None,
        target_id: Some(member.user.id.to_string()),
        details: json!({}),
    };

    let description = format!("{} joined the server.", member.display_name());
    let audit = AuditService::new(db, &ctx.http);
    if let Err(e) = audit.record(&entry, &description, &[]).await {
        tracing::warn!("Member join audit failed: {}", e);
    }
}

/// Handles the guild_member_removal event when a member leaves a guild.
pub async fn handle_guild_member_removal(
    db: &DatabaseConnection,
    ctx: Context,
    guild_id: GuildId,
    user: User,
) {
    let entry = AuditEntry {
        guild_id: guild_id.to_string(),
        kind: AuditKind::MemberLeave,
        actor_id: user.id.to_string(),
        channel_id: None,
        target_id: Some(user.id.to_string()),
        details: json!({}),
    };

    let description = format!("{} left the server.", user.name);
    let audit = AuditService::new(db, &ctx.http);
    if let Err(e) = audit.record(&entry, &description, &[]).await {
        tracing::warn!("Member leave audit failed: {}", e);
    }
}

/// Handles the guild_member_update event, recording one event per role delta.
///
/// Without the previous member state in cache there is no baseline to diff
/// against, so the update is skipped rather than guessed at.
pub async fn handle_guild_member_update(
    db: &DatabaseConnection,
    ctx: Context,
    old: Option<Member>,
    new: Option<Member>,
    event: GuildMemberUpdateEvent,
) {
    let Some(old) = old else {
        return;
    };

    let new_roles: HashSet<RoleId> = match &new {
        Some(member) => member.roles.iter().copied().collect(),
        None => event.roles.iter().copied().collect(),
    };
    let old_roles: HashSet<RoleId> = old.roles.iter().copied().collect();

    let display_name = new
        .as_ref()
        .map(|member| member.display_name().to_string())
        .unwrap_or_else(|| event.user.name.clone());

    let audit = AuditService::new(db, &ctx.http);

    for role_id in new_roles.difference(&old_roles) {
        let entry = AuditEntry {
            guild_id: event.guild_id.to_string(),
            kind: AuditKind::RoleGranted,
            actor_id: event.user.id.to_string(),
            channel_id: None,
            target_id: Some(role_id.to_string()),
            details: json!({ "role_id": role_id.to_string() }),
        };
        let description = format!("{} was granted a role.", display_name);
        if let Err(e) = audit
            .record(&entry, &description, &[("Role", format!("<@&{}>", role_id))])
            .await
        {
            tracing::warn!("Role grant audit failed: {}", e);
        }
    }

    for role_id in old_roles.difference(&new_roles) {
        let entry = AuditEntry {
            guild_id: event.guild_id.to_string(),
            kind: AuditKind::RoleRevoked,
            actor_id: event.user.id.to_string(),
            channel_id: None,
            target_id: Some(role_id.to_string()),
            details: json!({ "role_id": role_id.to_string() }),
        };
        let description = format!("{} had a role removed.", display_name);
        if let Err(e) = audit
            .record(&entry, &description, &[("Role", format!("<@&{}>", role_id))])
            .await
        {
            tracing::warn!("Role revoke audit failed: {}", e);
        }
    }
}
