use super::*;

/// Tests lazy creation of the settings row on first write.
///
/// No row exists for the guild until the first `upsert`; afterwards exactly
/// the provided fields are set and the rest stay unset.
///
/// Expected: Ok with a new row carrying only the provided channel
#[tokio::test]
async fn creates_row_on_first_write() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_audit_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = GuildSettingsRepository::new(db);
    let settings = repo
        .upsert(
            "100",
            UpdateGuildSettingsParam {
                role_panel_channel_id: Some("200".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(settings.guild_id, "100");
    assert_eq!(settings.role_panel_channel_id, Some("200".to_string()));
    assert!(settings.admin_channel_id.is_none());
    assert!(settings.log_channel_id.is_none());

    Ok(())
}

/// Tests the field-wise merge on update.
///
/// A later `upsert` providing only one field must keep the other stored
/// fields intact instead of clearing them.
///
/// Expected: Ok with the new field set and older fields untouched
#[tokio::test]
async fn merge_keeps_unspecified_fields() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_audit_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = GuildSettingsRepository::new(db);
    repo.upsert(
        "100",
        UpdateGuildSettingsParam {
            role_panel_channel_id: Some("200".to_string()),
            admin_channel_id: Some("300".to_string()),
            ..Default::default()
        },
    )
    .await
    .unwrap();

    let settings = repo
        .upsert(
            "100",
            UpdateGuildSettingsParam {
                log_channel_id: Some("400".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(settings.role_panel_channel_id, Some("200".to_string()));
    assert_eq!(settings.admin_channel_id, Some("300".to_string()));
    assert_eq!(settings.log_channel_id, Some("400".to_string()));

    Ok(())
}

/// Tests that a provided field overwrites the stored value.
///
/// Expected: Ok with the stored channel replaced
#[tokio::test]
async fn provided_field_overwrites_stored_value() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_audit_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = GuildSettingsRepository::new(db);
    repo.upsert(
        "100",
        UpdateGuildSettingsParam {
            log_channel_id: Some("400".to_string()),
            ..Default::default()
        },
    )
    .await
    .unwrap();

    let settings = repo
        .upsert(
            "100",
            UpdateGuildSettingsParam {
                log_channel_id: Some("500".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(settings.log_channel_id, Some("500".to_string()));

    Ok(())
}

/// Tests guild isolation: writes for one guild never touch another.
///
/// Expected: Ok with two independent rows
#[tokio::test]
async fn guilds_are_isolated() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_audit_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = GuildSettingsRepository::new(db);
    repo.upsert(
        "100",
        UpdateGuildSettingsParam {
            log_channel_id: Some("400".to_string()),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    repo.upsert(
        "101",
        UpdateGuildSettingsParam {
            log_channel_id: Some("900".to_string()),
            ..Default::default()
        },
    )
    .await
    .unwrap();

    let first = repo.find_by_guild_id("100").await?.unwrap();
    let second = repo.find_by_guild_id("101").await?.unwrap();

    assert_eq!(first.log_channel_id, Some("400".to_string()));
    assert_eq!(second.log_channel_id, Some("900".to_string()));

    Ok(())
}
