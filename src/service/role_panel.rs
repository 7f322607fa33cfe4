//! Role panel engine.
//!
//! Panels are persisted rows rendered as one Discord message with button
//! components. Button presses are resolved through the pure [`plan_toggle`]
//! planner so the SINGLE/MULTI selection semantics stay testable without a
//! gateway connection; the service applies the resulting plan through the
//! Discord HTTP API.

use std::collections::HashMap;
use std::sync::{Arc, LazyLock, Mutex};

use regex::Regex;
use sea_orm::DatabaseConnection;
use serenity::{
    all::{
        ButtonStyle, ChannelId, CreateActionRow, CreateButton, CreateEmbed, CreateMessage,
        EditMessage, EmojiId, MessageId, ReactionType,
    },
    http::Http,
};

use crate::{
    data::{
        guild_settings::GuildSettingsRepository,
        role_panel::{RolePanelItemRepository, RolePanelRepository},
    },
    error::AppError,
    model::role_panel::{
        CreateRolePanelItemParam, CreateRolePanelParam, PanelMode, RolePanel, RolePanelItem,
    },
    util::parse_snowflake,
};

/// Prefix of every panel button's component custom ID.
pub const PANEL_CUSTOM_ID_PREFIX: &str = "rp:";

/// Discord renders at most five action rows of four buttons per panel message.
const BUTTONS_PER_ROW: usize = 4;
const MAX_ROWS: usize = 5;

static CUSTOM_EMOJI_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^<a?:\w+:(\d+)>$").unwrap());

/// Extracts the emoji ID from a custom emoji reference such as
/// `<:duck:1234>` or `<a:party:5678>`. Unicode emoji are rejected: buttons
/// are keyed by custom emoji ID.
pub fn parse_custom_emoji(text: &str) -> Option<u64> {
    CUSTOM_EMOJI_RE
        .captures(text.trim())
        .and_then(|caps| caps.get(1))
        .and_then(|id| id.as_str().parse().ok())
}

/// Splits a component custom ID of the form `rp:<panel_id>:<item_id>` into
/// its parts. Anything else returns `None` and the interaction is ignored.
pub fn parse_custom_id(custom_id: &str) -> Option<(i32, i32)> {
    let rest = custom_id.strip_prefix(PANEL_CUSTOM_ID_PREFIX)?;
    let (panel, item) = rest.split_once(':')?;
    Some((panel.parse().ok()?, item.parse().ok()?))
}

/// The role mutations a button press resolves to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ToggleAction {
    /// Grant the pressed item's role.
    Grant(u64),
    /// Remove the pressed item's role.
    Remove(u64),
    /// SINGLE-mode switch: revoke the other panel roles the member holds,
    /// then grant the pressed one.
    Switch { revoke: Vec<u64>, grant: u64 },
}

/// Resolves a button press into role mutations.
///
/// MULTI panels toggle each role independently. SINGLE panels keep at most
/// one of the panel's roles on a member: pressing a different button switches
/// to it, pressing the held button removes it when `allow_none` is set and
/// reapplies it otherwise (a no-op grant rather than an error).
///
/// # Arguments
/// - `mode` - Panel selection mode
/// - `allow_none` - Whether SINGLE mode may deselect down to zero roles
/// - `target` - Role of the pressed button
/// - `panel_roles` - Every role offered by the panel
/// - `held` - Roles the member currently holds
pub fn plan_toggle(
    mode: PanelMode,
    allow_none: bool,
    target: u64,
    panel_roles: &[u64],
    held: &[u64],
) -> ToggleAction {
    let holds_target = held.contains(&target);

    match mode {
        PanelMode::Multi => {
            if holds_target {
                ToggleAction::Remove(target)
            } else {
                ToggleAction::Grant(target)
            }
        }
        PanelMode::Single => {
            if holds_target {
                if allow_none {
                    ToggleAction::Remove(target)
                } else {
                    ToggleAction::Grant(target)
                }
            } else {
                let revoke: Vec<u64> = panel_roles
                    .iter()
                    .copied()
                    .filter(|role| *role != target && held.contains(role))
                    .collect();
                if revoke.is_empty() {
                    ToggleAction::Grant(target)
                } else {
                    ToggleAction::Switch {
                        revoke,
                        grant: target,
                    }
                }
            }
        }
    }
}

/// Per-(panel, member) toggle serialization.
///
/// Two rapid presses from the same member on the same panel must not
/// interleave their role reads and writes; presses from different members or
/// on different panels stay concurrent.
#[derive(Clone, Default)]
pub struct ToggleLocks {
    locks: Arc<Mutex<HashMap<(i32, u64), Arc<tokio::sync::Mutex<()>>>>>,
}

impl ToggleLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the lock for this (panel, member) pair, creating it on first
    /// use. The caller awaits the returned mutex outside the registry lock.
    pub fn acquire(&self, panel_id: i32, member_id: u64) -> Arc<tokio::sync::Mutex<()>> {
        let mut locks = self.locks.lock().unwrap();
        locks.entry((panel_id, member_id)).or_default().clone()
    }

    /// Drops the registry entry once no press holds it, so the map does not
    /// grow with every member who ever pressed a button. Callers drop their
    /// clone from [`acquire`](Self::acquire) before releasing.
    pub fn release(&self, panel_id: i32, member_id: u64) {
        let mut locks = self.locks.lock().unwrap();
        if let Some(lock) = locks.get(&(panel_id, member_id)) {
            if Arc::strong_count(lock) == 1 {
                locks.remove(&(panel_id, member_id));
            }
        }
    }
}

/// Service for managing role panels and their published messages.
pub struct RolePanelService<'a> {
    db: &'a DatabaseConnection,
    http: &'a Http,
}

impl<'a> RolePanelService<'a> {
    pub fn new(db: &'a DatabaseConnection, http: &'a Http) -> Self {
        Self { db, http }
    }

    /// Creates an unpublished panel.
    pub async fn create_panel(&self, param: CreateRolePanelParam) -> Result<RolePanel, AppError> {
        RolePanelRepository::new(self.db).create(param).await
    }

    /// Loads a panel and verifies it belongs to `guild_id`.
    ///
    /// Panels from other guilds are reported as not found so panel IDs never
    /// leak across guilds.
    pub async fn get_guild_panel(
        &self,
        panel_id: i32,
        guild_id: &str,
    ) -> Result<RolePanel, AppError> {
        let panel = RolePanelRepository::new(self.db)
            .find_by_id(panel_id)
            .await?
            .filter(|panel| panel.guild_id == guild_id)
            .ok_or_else(|| AppError::NotFound(format!("Panel {} not found.", panel_id)))?;
        Ok(panel)
    }

    /// Adds a button to a panel.
    ///
    /// Without an explicit `sort_order` the item is appended after the
    /// existing ones. There is no item ceiling here: items beyond what fits
    /// in the button rows still render as embed fields on publish, they just
    /// get no button.
    ///
    /// # Returns
    /// - `Ok(RolePanelItem)` - The created item
    /// - `Err(AppError::NotFound)` - Panel missing or owned by another guild
    /// - `Err(AppError::BadRequest)` - Bad emoji reference or duplicate emoji
    pub async fn add_item(
        &self,
        panel_id: i32,
        guild_id: &str,
        emoji: &str,
        role_id: String,
        label: String,
        sort_order: Option<i32>,
    ) -> Result<RolePanelItem, AppError> {
        self.get_guild_panel(panel_id, guild_id).await?;

        let emoji_id = parse_custom_emoji(emoji).ok_or_else(|| {
            AppError::BadRequest(
                "Use a custom emoji reference like <:name:id> to identify the button.".to_string(),
            )
        })?;

        let item_repo = RolePanelItemRepository::new(self.db);
        let items = item_repo.get_by_panel_id(panel_id).await?;
        if item_repo
            .exists_with_emoji(panel_id, &emoji_id.to_string())
            .await?
        {
            return Err(AppError::BadRequest(
                "That emoji is already used on this panel.".to_string(),
            ));
        }

        let sort_order = sort_order
            .unwrap_or_else(|| items.last().map(|item| item.sort_order + 1).unwrap_or(0));
        item_repo
            .create(CreateRolePanelItemParam {
                panel_id,
                emoji_id: emoji_id.to_string(),
                role_id,
                label,
                sort_order,
            })
            .await
    }

    /// Removes every button matching the given emoji from a panel.
    ///
    /// Removal is set-based: asking to remove an emoji the panel does not
    /// carry succeeds with zero removals.
    pub async fn remove_items_by_emoji(
        &self,
        panel_id: i32,
        guild_id: &str,
        emoji: &str,
    ) -> Result<u64, AppError> {
        self.get_guild_panel(panel_id, guild_id).await?;

        let emoji_id = parse_custom_emoji(emoji).ok_or_else(|| {
            AppError::BadRequest(
                "Use a custom emoji reference like <:name:id> to identify the button.".to_string(),
            )
        })?;

        RolePanelItemRepository::new(self.db)
            .delete_by_emoji(panel_id, &emoji_id.to_string())
            .await
    }

    /// Returns a panel with its items in render order.
    pub async fn list_items(
        &self,
        panel_id: i32,
        guild_id: &str,
    ) -> Result<(RolePanel, Vec<RolePanelItem>), AppError> {
        let panel = self.get_guild_panel(panel_id, guild_id).await?;
        let items = RolePanelItemRepository::new(self.db)
            .get_by_panel_id(panel_id)
            .await?;
        Ok((panel, items))
    }

    /// Publishes a panel as a message with button components.
    ///
    /// An unpublished panel is sent as a new message to `channel_override` or
    /// the guild's configured panel channel and bound to it. An already
    /// published panel is re-rendered in place by editing its bound message.
    ///
    /// # Returns
    /// - `Ok(RolePanel)` - The panel with its publish identifiers set
    /// - `Err(AppError::NotFound)` - Panel missing, or its bound message no
    ///   longer exists (rebind with set_message)
    /// - `Err(AppError::BadRequest)` - No items yet, or no target channel
    pub async fn publish(
        &self,
        panel_id: i32,
        guild_id: &str,
        channel_override: Option<String>,
    ) -> Result<RolePanel, AppError> {
        let (panel, items) = self.list_items(panel_id, guild_id).await?;
        if items.is_empty() {
            return Err(AppError::BadRequest(
                "Add at least one button before publishing.".to_string(),
            ));
        }

        let embed = panel_embed(&panel, &items);
        let rows = panel_rows(panel.id, &items)?;

        if let (Some(channel_id), Some(message_id)) = (
            panel.published_channel_id.as_deref(),
            panel.published_message_id.as_deref(),
        ) {
            let channel = ChannelId::new(parse_snowflake(channel_id)?);
            let message = MessageId::new(parse_snowflake(message_id)?);
            channel
                .edit_message(
                    self.http,
                    message,
                    EditMessage::new().embed(embed).components(rows),
                )
                .await
                .map_err(|e| {
                    tracing::warn!("Failed to edit published panel {}: {}", panel.id, e);
                    AppError::NotFound(
                        "The published panel message could not be updated. \
                         Rebind it with set_message or check the channel."
                            .to_string(),
                    )
                })?;
            return Ok(panel);
        }

        let target = match channel_override {
            Some(channel_id) => channel_id,
            None => GuildSettingsRepository::new(self.db)
                .find_by_guild_id(guild_id)
                .await?
                .and_then(|s| s.role_panel_channel_id)
                .ok_or_else(|| {
                    AppError::BadRequest(
                        "No panel channel configured. Pass a channel or set one with /config set."
                            .to_string(),
                    )
                })?,
        };

        let channel = ChannelId::new(parse_snowflake(&target)?);
        let message = channel
            .send_message(
                self.http,
                CreateMessage::new().embed(embed).components(rows),
            )
            .await?;

        RolePanelRepository::new(self.db)
            .set_published_message(panel.id, &target, &message.id.to_string())
            .await
    }

    /// Rebinds a panel to an existing message and re-renders it.
    ///
    /// Recovery path for a deleted or hand-moved panel message: the target
    /// message must exist and be editable by the bot.
    pub async fn bind_message(
        &self,
        panel_id: i32,
        guild_id: &str,
        channel_id: &str,
        message_id: &str,
    ) -> Result<RolePanel, AppError> {
        let (panel, items) = self.list_items(panel_id, guild_id).await?;

        let channel = ChannelId::new(parse_snowflake(channel_id)?);
        let message = MessageId::new(parse_snowflake(message_id)?);
        self.http
            .get_message(channel, message)
            .await
            .map_err(|_| {
                AppError::NotFound("No such message in that channel.".to_string())
            })?;

        channel
            .edit_message(
                self.http,
                message,
                EditMessage::new()
                    .embed(panel_embed(&panel, &items))
                    .components(panel_rows(panel.id, &items)?),
            )
            .await
            .map_err(|_| {
                AppError::BadRequest(
                    "That message cannot be edited by the bot; bind a message the bot sent."
                        .to_string(),
                )
            })?;

        RolePanelRepository::new(self.db)
            .set_published_message(panel.id, channel_id, message_id)
            .await
    }
}

/// Builds the embed shown above a panel's buttons, one inline field per item.
fn panel_embed(panel: &RolePanel, items: &[RolePanelItem]) -> CreateEmbed {
    let mut embed = CreateEmbed::new()
        .title(&panel.title)
        .description(&panel.description)
        .color(0x5865F2)
        .footer(serenity::all::CreateEmbedFooter::new(format!(
            "Panel {} | {}",
            panel.id,
            panel.mode.as_str()
        )));
    for item in items {
        embed = embed.field(&item.label, format!("<@&{}>", item.role_id), true);
    }
    embed
}

/// Builds the button rows for a panel, four buttons per row and at most five
/// rows. Items beyond the ceiling are not rendered.
fn panel_rows(panel_id: i32, items: &[RolePanelItem]) -> Result<Vec<CreateActionRow>, AppError> {
    let mut rows = Vec::new();
    for chunk in items.chunks(BUTTONS_PER_ROW).take(MAX_ROWS) {
        let mut buttons = Vec::new();
        for item in chunk {
            buttons.push(
                CreateButton::new(format!("{}{}:{}", PANEL_CUSTOM_ID_PREFIX, panel_id, item.id))
                    .label(&item.label)
                    .style(ButtonStyle::Secondary)
                    .emoji(ReactionType::Custom {
                        animated: false,
                        id: EmojiId::new(parse_snowflake(&item.emoji_id)?),
                        name: None,
                    }),
            );
        }
        rows.push(CreateActionRow::Buttons(buttons));
    }
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn multi_grants_when_not_held() {
        let action = plan_toggle(PanelMode::Multi, true, 10, &[10, 20], &[20]);
        assert_eq!(action, ToggleAction::Grant(10));
    }

    #[test]
    fn multi_removes_when_held() {
        let action = plan_toggle(PanelMode::Multi, true, 10, &[10, 20], &[10, 20]);
        assert_eq!(action, ToggleAction::Remove(10));
    }

    #[test]
    fn multi_items_toggle_independently_of_other_panel_roles() {
        // Holding another panel role never turns a MULTI press into a switch.
        let action = plan_toggle(PanelMode::Multi, true, 10, &[10, 20, 30], &[20, 30]);
        assert_eq!(action, ToggleAction::Grant(10));
    }

    #[test]
    fn single_switches_from_held_role_to_pressed_one() {
        let action = plan_toggle(PanelMode::Single, false, 10, &[10, 20, 30], &[20]);
        assert_eq!(
            action,
            ToggleAction::Switch {
                revoke: vec![20],
                grant: 10
            }
        );
    }

    #[test]
    fn single_switch_revokes_every_held_panel_role() {
        // Drift (member somehow holds two panel roles) is repaired by the
        // switch rather than preserved.
        let action = plan_toggle(PanelMode::Single, false, 10, &[10, 20, 30], &[20, 30]);
        assert_eq!(
            action,
            ToggleAction::Switch {
                revoke: vec![20, 30],
                grant: 10
            }
        );
    }

    #[test]
    fn single_grants_when_no_panel_role_is_held() {
        let action = plan_toggle(PanelMode::Single, false, 10, &[10, 20], &[99]);
        assert_eq!(action, ToggleAction::Grant(10));
    }

    #[test]
    fn single_with_allow_none_deselects_held_role() {
        let action = plan_toggle(PanelMode::Single, true, 10, &[10, 20], &[10]);
        assert_eq!(action, ToggleAction::Remove(10));
    }

    #[test]
    fn single_without_allow_none_reapplies_held_role() {
        // Pressing the held button is a harmless reapply, never an error.
        let action = plan_toggle(PanelMode::Single, false, 10, &[10, 20], &[10]);
        assert_eq!(action, ToggleAction::Grant(10));
    }

    #[test]
    fn toggle_locks_evict_released_entries() {
        let locks = ToggleLocks::new();
        let lock = locks.acquire(1, 7);
        drop(lock);
        locks.release(1, 7);
        assert!(locks.locks.lock().unwrap().is_empty());
    }

    #[test]
    fn toggle_locks_keep_entries_another_press_still_holds() {
        let locks = ToggleLocks::new();
        let first = locks.acquire(1, 7);
        let second = locks.acquire(1, 7);

        drop(first);
        locks.release(1, 7);
        assert_eq!(locks.locks.lock().unwrap().len(), 1);

        drop(second);
        locks.release(1, 7);
        assert!(locks.locks.lock().unwrap().is_empty());
    }

    #[test]
    fn parses_panel_custom_id() {
        assert_eq!(parse_custom_id("rp:3:17"), Some((3, 17)));
    }

    #[test]
    fn rejects_foreign_custom_ids() {
        assert_eq!(parse_custom_id("poll:3:17"), None);
        assert_eq!(parse_custom_id("rp:3"), None);
        assert_eq!(parse_custom_id("rp:x:y"), None);
    }

    #[test]
    fn parses_static_and_animated_emoji_references() {
        assert_eq!(parse_custom_emoji("<:duck:123456>"), Some(123456));
        assert_eq!(parse_custom_emoji("<a:party:789>"), Some(789));
    }

    #[test]
    fn rejects_unicode_and_malformed_emoji() {
        assert_eq!(parse_custom_emoji("🦆"), None);
        assert_eq!(parse_custom_emoji("<:duck:>"), None);
        assert_eq!(parse_custom_emoji("duck"), None);
    }

    fn item(id: i32, sort_order: i32) -> RolePanelItem {
        RolePanelItem {
            id,
            panel_id: 1,
            emoji_id: "1000".to_string(),
            role_id: "2000".to_string(),
            label: format!("Item {}", id),
            sort_order,
        }
    }

    #[test]
    fn rows_hold_four_buttons_and_cap_at_five_rows() {
        let items: Vec<RolePanelItem> = (0..25).map(|i| item(i, i)).collect();
        let rows = panel_rows(1, &items).unwrap();
        assert_eq!(rows.len(), 5);
    }

    #[test]
    fn seven_items_fill_two_rows() {
        let items: Vec<RolePanelItem> = (0..7).map(|i| item(i, i)).collect();
        let rows = panel_rows(1, &items).unwrap();
        assert_eq!(rows.len(), 2);
    }

    /// Items past the button ceiling are accepted; rendering caps the rows
    /// while keeping every item as an embed field.
    #[tokio::test]
    async fn add_item_accepts_more_items_than_the_rows_hold() {
        let test = test_utils::builder::TestBuilder::new()
            .with_panel_tables()
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();
        let panel = test_utils::factory::role_panel::create_panel(db, "42")
            .await
            .unwrap();

        let http = Http::new("");
        let service = RolePanelService::new(db, &http);
        for i in 0..21 {
            service
                .add_item(
                    panel.id,
                    "42",
                    &format!("<:e{}:{}>", i, 1000 + i),
                    format!("{}", 2000 + i),
                    format!("Item {}", i),
                    None,
                )
                .await
                .unwrap();
        }

        let (_, items) = service.list_items(panel.id, "42").await.unwrap();
        assert_eq!(items.len(), 21);
        assert_eq!(panel_rows(panel.id, &items).unwrap().len(), 5);
    }
}
