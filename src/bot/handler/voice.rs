use sea_orm::DatabaseConnection;
use serde_json::json;
use serenity::all::{Context, VoiceState};

use crate::{
    model::audit::{AuditEntry, AuditKind},
    service::audit::AuditService,
};

/// Handles the voice_state_update event.
///
/// Only none-to-some and some-to-none channel transitions are recorded;
/// mutes, deafens and channel-to-channel moves produce no audit event.
pub async fn handle_voice_state_update(
    db: &DatabaseConnection,
    ctx: Context,
    old: Option<VoiceState>,
    new: VoiceState,
) {
    let Some(guild_id) = new.guild_id else {
        return;
    };

    let old_channel = old.as_ref().and_then(|state| state.channel_id);
    let new_channel = new.channel_id;
    if old_channel == new_channel {
        return;
    }

    let display_name = new
        .member
        .as_ref()
        .map(|member| member.display_name().to_string())
        .unwrap_or_else(|| "A member".to_string());

    let (kind, channel_id, description) = match (old_channel, new_channel) {
        (None, Some(channel)) => (
            AuditKind::VoiceJoin,
            channel,
            format!("{} joined a voice channel.", display_name),
        ),
        (Some(channel), None) => (
            AuditKind::VoiceLeave,
            channel,
            format!("{} left a voice channel.", display_name),
        ),
        _ => return,
    };

    let channel = channel_id.to_string();
    let entry = AuditEntry {
        guild_id: guild_id.to_string(),
        kind,
        actor_id: new.user_id.to_string(),
        channel_id: Some(channel.clone()),
        target_id: Some(channel.clone()),
        details: json!({ "channel_id": channel }),
    };

    let audit = AuditService::new(db, &ctx.http);
    if let Err(e) = audit
        .record(
            &entry,
            &description,
            &[("Channel", format!("<#{}>", channel))],
        )
        .await
    {
        tracing::warn!("Voice audit failed: {}", e);
    }
}
