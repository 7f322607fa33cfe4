use crate::{
    data::role_panel::RolePanelItemRepository,
    model::role_panel::CreateRolePanelItemParam,
};
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};

mod create;
mod delete_by_emoji;
mod get_by_panel_id;
