use super::*;

/// Tests binding a panel to its published message.
///
/// Both identifiers must be stored together: the panel is never left
/// half-published.
///
/// Expected: Ok with channel and message ids both set
#[tokio::test]
async fn stores_both_publish_identifiers() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_panel_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let panel = factory::role_panel::create_panel(db, "100").await?;

    let repo = RolePanelRepository::new(db);
    let updated = repo
        .set_published_message(panel.id, "555", "666")
        .await
        .unwrap();

    assert_eq!(updated.published_channel_id, Some("555".to_string()));
    assert_eq!(updated.published_message_id, Some("666".to_string()));

    Ok(())
}

/// Tests rebinding an already-published panel (the set_message recovery
/// path): the stored identifiers are replaced.
///
/// Expected: Ok with the new identifiers
#[tokio::test]
async fn rebinding_replaces_identifiers() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_panel_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let panel = factory::role_panel::create_panel(db, "100").await?;

    let repo = RolePanelRepository::new(db);
    repo.set_published_message(panel.id, "555", "666").await.unwrap();
    let updated = repo
        .set_published_message(panel.id, "557", "777")
        .await
        .unwrap();

    assert_eq!(updated.published_channel_id, Some("557".to_string()));
    assert_eq!(updated.published_message_id, Some("777".to_string()));

    Ok(())
}

/// Tests binding a nonexistent panel.
///
/// Expected: Err(AppError::NotFound)
#[tokio::test]
async fn missing_panel_is_not_found() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_panel_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = RolePanelRepository::new(db);
    let result = repo.set_published_message(9999, "555", "666").await;

    assert!(matches!(result, Err(AppError::NotFound(_))));

    Ok(())
}
