use super::*;

/// Tests creating a panel with explicit parameters.
///
/// A fresh panel has no items and no published message: both publish
/// identifiers are null.
///
/// Expected: Ok with an unpublished SINGLE panel
#[tokio::test]
async fn creates_unpublished_panel() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_panel_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = RolePanelRepository::new(db);
    let panel = repo
        .create(CreateRolePanelParam {
            guild_id: "100".to_string(),
            mode: PanelMode::Single,
            allow_none: false,
            title: "Region".to_string(),
            description: "Pick one region".to_string(),
            created_by: "7".to_string(),
        })
        .await
        .unwrap();

    assert_eq!(panel.guild_id, "100");
    assert_eq!(panel.mode, PanelMode::Single);
    assert!(!panel.allow_none);
    assert!(panel.published_channel_id.is_none());
    assert!(panel.published_message_id.is_none());

    Ok(())
}

/// Tests that find_by_id round-trips the created panel.
///
/// Expected: Ok(Some) equal to the created panel
#[tokio::test]
async fn find_by_id_returns_created_panel() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_panel_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let created = factory::role_panel::create_panel(db, "100").await?;

    let repo = RolePanelRepository::new(db);
    let found = repo.find_by_id(created.id).await.unwrap().unwrap();

    assert_eq!(found.id, created.id);
    assert_eq!(found.guild_id, "100");
    assert_eq!(found.mode, PanelMode::Multi);

    Ok(())
}

/// Tests lookup of a nonexistent panel.
///
/// Expected: Ok(None), not an error
#[tokio::test]
async fn find_by_id_returns_none_for_missing_panel() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_panel_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = RolePanelRepository::new(db);
    assert!(repo.find_by_id(9999).await.unwrap().is_none());

    Ok(())
}
