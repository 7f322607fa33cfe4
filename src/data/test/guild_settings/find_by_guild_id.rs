use super::*;

/// Tests lookup before any `config set` has run.
///
/// Expected: Ok(None)
#[tokio::test]
async fn returns_none_for_unconfigured_guild() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_audit_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = GuildSettingsRepository::new(db);
    assert!(repo.find_by_guild_id("100").await?.is_none());

    Ok(())
}

/// Tests lookup of an existing row via the factory.
///
/// Expected: Ok(Some) with the factory values
#[tokio::test]
async fn returns_existing_row() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_audit_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    factory::guild_settings::GuildSettingsFactory::new(db)
        .guild_id("100")
        .log_channel_id(Some("400".to_string()))
        .build()
        .await?;

    let repo = GuildSettingsRepository::new(db);
    let settings = repo.find_by_guild_id("100").await?.unwrap();

    assert_eq!(settings.guild_id, "100");
    assert_eq!(settings.log_channel_id, Some("400".to_string()));

    Ok(())
}
