use super::*;

fn voice_join_entry(guild_id: &str) -> AuditEntry {
    AuditEntry {
        guild_id: guild_id.to_string(),
        kind: AuditKind::VoiceJoin,
        actor_id: "7".to_string(),
        channel_id: Some("8".to_string()),
        target_id: Some("8".to_string()),
        details: serde_json::json!({ "actor_id": "7", "channel_id": "8" }),
    }
}

/// Tests persisting one audit event.
///
/// Expected: Ok with the row carrying the event tag and JSON details
#[tokio::test]
async fn persists_event_row() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_audit_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = AuditEventRepository::new(db);
    let model = repo.create(&voice_join_entry("100")).await?;

    assert_eq!(model.guild_id, "100");
    assert_eq!(model.event_type, "VOICE_JOIN");
    assert_eq!(model.actor_id, "7");
    assert_eq!(model.channel_id, Some("8".to_string()));
    assert_eq!(model.details["channel_id"], "8");

    Ok(())
}

/// Tests that the log is append-only from the repository's perspective:
/// repeated identical events produce distinct rows.
///
/// Expected: Ok with two rows for the guild
#[tokio::test]
async fn repeated_events_append() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_audit_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = AuditEventRepository::new(db);
    repo.create(&voice_join_entry("100")).await?;
    repo.create(&voice_join_entry("100")).await?;

    let rows = entity::prelude::AuditEvent::find()
        .filter(entity::audit_event::Column::GuildId.eq("100"))
        .all(db)
        .await?;
    assert_eq!(rows.len(), 2);
    assert_ne!(rows[0].id, rows[1].id);

    Ok(())
}
