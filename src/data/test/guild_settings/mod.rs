use crate::{
    data::guild_settings::GuildSettingsRepository,
    model::guild_settings::UpdateGuildSettingsParam,
};
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};

mod find_by_guild_id;
mod upsert;
