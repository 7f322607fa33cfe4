use std::sync::LazyLock;

use regex::Regex;
use sea_orm::DatabaseConnection;
use serde_json::json;
use serenity::all::{
    ChannelId, Context, CreateEmbed, CreateMessage, GuildId, Message, MessageId,
    MessageUpdateEvent,
};

use crate::{
    cache::PreviewCache,
    model::audit::{AuditEntry, AuditKind},
    service::{
        audit::AuditService,
        preview::{board_link, normalize_url, LinkPreviewService},
    },
    util::truncate,
};

static EMOJI_MESSAGE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^<(a?):\w+:(\d+)>$").unwrap());

/// Extracts the emoji from a message consisting of exactly one custom emoji.
fn extract_custom_emoji(content: &str) -> Option<(u64, bool)> {
    let caps = EMOJI_MESSAGE_RE.captures(content.trim())?;
    let animated = &caps[1] == "a";
    let id = caps[2].parse().ok()?;
    Some((id, animated))
}

/// Handles the message event: emoji expansion first, then link previews.
///
/// Bot-authored and DM messages are ignored. A message that is exactly one
/// custom emoji is replaced with a large image embed; a message that is
/// exactly one board link is replaced with a preview embed, falling back to
/// a degraded embed (original kept) when the fetch fails.
pub async fn handle_message(
    ctx: Context,
    http_client: &reqwest::Client,
    preview_cache: &PreviewCache,
    message: Message,
) {
    if message.guild_id.is_none() || message.author.bot {
        return;
    }

    if let Some((emoji_id, animated)) = extract_custom_emoji(&message.content) {
        expand_emoji(&ctx, &message, emoji_id, animated).await;
        return;
    }

    let Some(link) = board_link(&message.content) else {
        return;
    };
    let url = normalize_url(link);

    let service = LinkPreviewService::new(http_client, preview_cache);
    match service.fetch_preview(&url).await {
        Ok(preview) => {
            let mut embed = CreateEmbed::new()
                .title(&preview.title)
                .url(&url)
                .description(
                    preview
                        .summary
                        .as_deref()
                        .map(|summary| truncate(summary, 200))
                        .unwrap_or_else(|| "Post preview".to_string()),
                )
                .field("Gallery", &preview.gallery, false)
                .color(0x0096FF);
            if let Some(image) = &preview.image {
                embed = embed.image(image);
            }

            if let Err(e) = message.delete(&ctx.http).await {
                tracing::warn!("Failed to delete previewed message: {}", e);
            }
            if let Err(e) = message
                .channel_id
                .send_message(&ctx.http, CreateMessage::new().embed(embed))
                .await
            {
                tracing::warn!("Failed to send preview embed: {}", e);
            }
        }
        Err(e) => {
            tracing::warn!("Failed to fetch preview for {}: {}", url, e);
            // Degraded preview: the original message stays so nothing is lost.
            let embed = CreateEmbed::new()
                .title("dcinside link")
                .url(&url)
                .description("Preview could not be fetched.")
                .color(0xFFA500);
            if let Err(e) = message
                .channel_id
                .send_message(&ctx.http, CreateMessage::new().embed(embed))
                .await
            {
                tracing::warn!("Failed to send degraded preview embed: {}", e);
            }
        }
    }
}

/// Replaces a single-emoji message with a large image embed from the CDN.
async fn expand_emoji(ctx: &Context, message: &Message, emoji_id: u64, animated: bool) {
    let extension = if animated { "gif" } else { "png" };
    let embed = CreateEmbed::new()
        .title("Custom emoji")
        .image(format!(
            "https://cdn.discordapp.com/emojis/{}.{}?size=1024",
            emoji_id, extension
        ))
        .color(0x5865F2);

    if let Err(e) = message.delete(&ctx.http).await {
        tracing::warn!("Failed to delete emoji message: {}", e);
        return;
    }
    if let Err(e) = message
        .channel_id
        .send_message(&ctx.http, CreateMessage::new().embed(embed))
        .await
    {
        tracing::warn!("Failed to expand emoji: {}", e);
    }
}

/// Handles the message_delete event.
///
/// Author and content come from the message cache when the message is still
/// there; an uncached delete is recorded with unknown author and no content
/// rather than dropped.
pub async fn handle_message_delete(
    db: &DatabaseConnection,
    ctx: Context,
    channel_id: ChannelId,
    deleted_message_id: MessageId,
    guild_id: Option<GuildId>,
) {
    let Some(guild_id) = guild_id else {
        return;
    };

    let cached = ctx
        .cache
        .message(channel_id, deleted_message_id)
        .map(|message| {
            (
                message.author.bot,
                message.author.id.to_string(),
                message.author.tag(),
                message.content.clone(),
            )
        });

    if let Some((true, ..)) = cached {
        return;
    }

    let (actor_id, user_display, content) = match cached {
        Some((_, id, tag, content)) => {
            let display = format!("{} ({})", tag, id);
            (id, display, content)
        }
        None => (
            "unknown".to_string(),
            "Unknown".to_string(),
            "N/A".to_string(),
        ),
    };

    let entry = AuditEntry {
        guild_id: guild_id.to_string(),
        kind: AuditKind::MessageDelete,
        actor_id,
        channel_id: Some(channel_id.to_string()),
        target_id: Some(deleted_message_id.to_string()),
        details: json!({ "content": content }),
    };

    let audit = AuditService::new(db, &ctx.http);
    if let Err(e) = audit
        .record(
            &entry,
            "A message was deleted.",
            &[
                ("User", user_display),
                ("Channel", format!("<#{}>", channel_id)),
                ("Message ID", deleted_message_id.to_string()),
            ],
        )
        .await
    {
        tracing::warn!("Message delete audit failed: {}", e);
    }
}

/// Handles the message_update event.
///
/// Recorded only when the new content is known; when the old content is also
/// known and identical (embed unfurls, pin flags) the edit is skipped. An
/// unknown old content is recorded as `N/A`.
pub async fn handle_message_update(
    db: &DatabaseConnection,
    ctx: Context,
    old: Option<Message>,
    new: Option<Message>,
    event: MessageUpdateEvent,
) {
    let Some(guild_id) = event.guild_id else {
        return;
    };

    let author = new
        .as_ref()
        .map(|message| &message.author)
        .or(event.author.as_ref());
    if author.map(|a| a.bot).unwrap_or(false) {
        return;
    }

    let Some(after) = new
        .as_ref()
        .map(|message| message.content.clone())
        .or_else(|| event.content.clone())
    else {
        return;
    };
    let before = old.map(|message| message.content);
    if before.as_deref() == Some(after.as_str()) {
        return;
    }
    let before = before.unwrap_or_else(|| "N/A".to_string());

    let (actor_id, user_display) = match author {
        Some(user) => (user.id.to_string(), format!("{} ({})", user.tag(), user.id)),
        None => ("unknown".to_string(), "Unknown".to_string()),
    };

    let entry = AuditEntry {
        guild_id: guild_id.to_string(),
        kind: AuditKind::MessageEdit,
        actor_id,
        channel_id: Some(event.channel_id.to_string()),
        target_id: Some(event.id.to_string()),
        details: json!({ "before": before, "after": after }),
    };

    let audit = AuditService::new(db, &ctx.http);
    if let Err(e) = audit
        .record(
            &entry,
            "A message was edited.",
            &[
                ("User", user_display),
                ("Channel", format!("<#{}>", event.channel_id)),
                ("Before", before),
                ("After", after),
            ],
        )
        .await
    {
        tracing::warn!("Message edit audit failed: {}", e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_static_emoji() {
        assert_eq!(extract_custom_emoji("<:duck:123456>"), Some((123456, false)));
    }

    #[test]
    fn extracts_animated_emoji() {
        assert_eq!(extract_custom_emoji("<a:party:789>"), Some((789, true)));
    }

    #[test]
    fn ignores_emoji_inside_longer_messages() {
        assert_eq!(extract_custom_emoji("nice <:duck:123456>"), None);
        assert_eq!(extract_custom_emoji("<:duck:123456> <:duck:789>"), None);
    }

    #[test]
    fn ignores_plain_text_and_unicode_emoji() {
        assert_eq!(extract_custom_emoji("hello"), None);
        assert_eq!(extract_custom_emoji("🦆"), None);
    }
}
