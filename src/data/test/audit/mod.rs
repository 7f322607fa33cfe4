use crate::{
    data::audit::AuditEventRepository,
    model::audit::{AuditEntry, AuditKind},
};
use sea_orm::{ColumnTrait, DbErr, EntityTrait, QueryFilter};
use test_utils::builder::TestBuilder;

mod create;
