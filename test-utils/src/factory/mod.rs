//! Factory methods for creating test entities with sensible defaults.

pub mod guild_settings;
pub mod helpers;
pub mod role_panel;
