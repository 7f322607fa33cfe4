use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

use crate::model::audit::AuditEntry;

pub struct AuditEventRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> AuditEventRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Appends one audit event row. Rows are never updated or deleted.
    pub async fn create(&self, entry: &AuditEntry) -> Result<entity::audit_event::Model, DbErr> {
        entity::audit_event::ActiveModel {
            guild_id: ActiveValue::Set(entry.guild_id.clone()),
            event_type: ActiveValue::Set(entry.kind.tag().to_string()),
            actor_id: ActiveValue::Set(entry.actor_id.clone()),
            channel_id: ActiveValue::Set(entry.channel_id.clone()),
            target_id: ActiveValue::Set(entry.target_id.clone()),
            details: ActiveValue::Set(entry.details.clone()),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}
