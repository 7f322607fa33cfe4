//! Discord bot integration.
//!
//! This module wires the serenity gateway client to the rest of the
//! application: per-event handlers feed the audit pipeline, button presses
//! drive the role panel engine, plain messages go through the emoji expander
//! and the link-preview fetcher, and slash commands are dispatched to the
//! command modules.
//!
//! # Gateway Intents
//!
//! The bot requires the following gateway intents:
//! - `GUILDS` - Guild lifecycle events
//! - `GUILD_MEMBERS` - Member join/leave/update events (privileged intent)
//! - `GUILD_MESSAGES` + `MESSAGE_CONTENT` - Message events with content
//!   (privileged intent, needed for previews and delete/edit audit detail)
//! - `GUILD_VOICE_STATES` - Voice channel join/leave events
//!
//! Privileged intents must be enabled in the Discord Developer Portal for
//! the bot application.

pub mod commands;
pub mod handler;
pub mod start;
