use sea_orm::DatabaseConnection;
use serenity::all::{
    ChannelId, Client, Command, Context, EventHandler, GatewayIntents, GuildId,
    GuildMemberUpdateEvent, Interaction, Member, Message, MessageId, MessageUpdateEvent, Ready,
    User, VoiceState,
};
use serenity::async_trait;

use crate::{
    bot::{commands, handler},
    cache::PreviewCache,
    config::{CommandScope, Config},
    error::AppError,
    service::{
        preview::{PREVIEW_CACHE_CAPACITY, PREVIEW_TTL},
        role_panel::{ToggleLocks, PANEL_CUSTOM_ID_PREFIX},
    },
};

/// Discord bot event handler.
///
/// All shared state is injected at construction: the database connection,
/// the reqwest client and preview cache for link previews, and the toggle
/// lock registry for panel button presses.
pub struct Handler {
    db: DatabaseConnection,
    command_scope: CommandScope,
    http_client: reqwest::Client,
    preview_cache: PreviewCache,
    toggle_locks: ToggleLocks,
}

#[async_trait]
impl EventHandler for Handler {
    /// Called when the bot is ready and connected to Discord.
    ///
    /// Bulk-replaces the slash command set for the configured scope.
    async fn ready(&self, ctx: Context, ready: Ready) {
        tracing::info!("{} is connected to Discord!", ready.user.name);

        let commands = commands::registration();
        let result = match self.command_scope {
            CommandScope::Guild(guild_id) => {
                GuildId::new(guild_id).set_commands(&ctx.http, commands).await
            }
            CommandScope::Global => Command::set_global_commands(&ctx.http, commands).await,
        };
        match result {
            Ok(registered) => tracing::info!("Registered {} slash commands", registered.len()),
            Err(e) => tracing::error!("Failed to register slash commands: {}", e),
        }
    }

    /// Called when a member's voice state changes
    async fn voice_state_update(&self, ctx: Context, old: Option<VoiceState>, new: VoiceState) {
        handler::voice::handle_voice_state_update(&self.db, ctx, old, new).await;
    }

    /// Called for every new message the bot can see
    async fn message(&self, ctx: Context, new_message: Message) {
        handler::message::handle_message(ctx, &self.http_client, &self.preview_cache, new_message)
            .await;
    }

    /// Called when a message is deleted
    async fn message_delete(
        &self,
        ctx: Context,
        channel_id: ChannelId,
        deleted_message_id: MessageId,
        guild_id: Option<GuildId>,
    ) {
        handler::message::handle_message_delete(
            &self.db,
            ctx,
            channel_id,
            deleted_message_id,
            guild_id,
        )
        .await;
    }

    /// Called when a message is edited
    async fn message_update(
        &self,
        ctx: Context,
        old_if_available: Option<Message>,
        new: Option<Message>,
        event: MessageUpdateEvent,
    ) {
        handler::message::handle_message_update(&self.db, ctx, old_if_available, new, event).await;
    }

    /// Called when a member joins a guild
    async fn guild_member_addition(&self, ctx: Context, new_member: Member) {
        handler::member::handle_guild_member_addition(&self.db, ctx, new_member).await;
    }

    /// Called when a member leaves a guild
    async fn guild_member_removal(
        &self,
        ctx: Context,
        guild_id: GuildId,
        user: User,
        _member_data_if_available: Option<Member>,
    ) {
        handler::member::handle_guild_member_removal(&self.db, ctx, guild_id, user).await;
    }

    /// Called when a member is updated (role changes among other things)
    async fn guild_member_update(
        &self,
        ctx: Context,
        old_if_available: Option<Member>,
        new: Option<Member>,
        event: GuildMemberUpdateEvent,
    ) {
        handler::member::handle_guild_member_update(&self.db, ctx, old_if_available, new, event)
            .await;
    }

    /// Called for slash commands and component interactions
    async fn interaction_create(&self, ctx: Context, interaction: Interaction) {
        match interaction {
            Interaction::Command(command) => {
                commands::dispatch(&self.db, &ctx, &command).await;
            }
            Interaction::Component(component)
                if component.data.custom_id.starts_with(PANEL_CUSTOM_ID_PREFIX) =>
            {
                handler::interaction::handle_panel_button(
                    &self.db,
                    ctx,
                    &self.toggle_locks,
                    component,
                )
                .await;
            }
            _ => {}
        }
    }
}

/// Builds the gateway client with its intents, message cache and handler.
pub async fn init_bot(
    config: &Config,
    db: DatabaseConnection,
    http_client: reqwest::Client,
) -> Result<Client, AppError> {
    let intents = GatewayIntents::GUILDS
        | GatewayIntents::GUILD_MEMBERS
        | GatewayIntents::GUILD_MESSAGES
        | GatewayIntents::MESSAGE_CONTENT
        | GatewayIntents::GUILD_VOICE_STATES;

    let mut cache_settings = serenity::cache::Settings::default();
    // Deleted and edited messages are attributed from this cache.
    cache_settings.max_messages = 500;

    let handler = Handler {
        db,
        command_scope: config.command_scope.clone(),
        http_client,
        preview_cache: PreviewCache::new(PREVIEW_CACHE_CAPACITY, PREVIEW_TTL),
        toggle_locks: ToggleLocks::new(),
    };

    let client = Client::builder(&config.discord_token, intents)
        .event_handler(handler)
        .cache_settings(cache_settings)
        .await?;

    Ok(client)
}

/// Runs the gateway connection until it terminates.
pub async fn start_bot(mut client: Client) -> Result<(), AppError> {
    client.start().await.map_err(Into::into)
}
