use crate::{
    data::role_panel::RolePanelRepository,
    error::AppError,
    model::role_panel::{CreateRolePanelParam, PanelMode},
};
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};

mod create;
mod set_published_message;
