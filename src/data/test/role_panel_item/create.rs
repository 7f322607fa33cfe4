use super::*;

/// Tests creating an item on a panel.
///
/// Expected: Ok with the stored emoji, role and label
#[tokio::test]
async fn creates_item() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_panel_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let panel = factory::role_panel::create_panel(db, "100").await?;

    let repo = RolePanelItemRepository::new(db);
    let item = repo
        .create(CreateRolePanelItemParam {
            panel_id: panel.id,
            emoji_id: "1111".to_string(),
            role_id: "2222".to_string(),
            label: "Blue team".to_string(),
            sort_order: 3,
        })
        .await
        .unwrap();

    assert_eq!(item.panel_id, panel.id);
    assert_eq!(item.emoji_id, "1111");
    assert_eq!(item.role_id, "2222");
    assert_eq!(item.label, "Blue team");
    assert_eq!(item.sort_order, 3);

    Ok(())
}

/// Tests the duplicate-emoji lookup used by the add-item guard.
///
/// Expected: false before the insert, true afterwards, false for another panel
#[tokio::test]
async fn exists_with_emoji_is_scoped_to_panel() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_panel_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let panel = factory::role_panel::create_panel(db, "100").await?;
    let other = factory::role_panel::create_panel(db, "100").await?;

    let repo = RolePanelItemRepository::new(db);
    assert!(!repo.exists_with_emoji(panel.id, "1111").await.unwrap());

    factory::role_panel::RolePanelItemFactory::new(db, panel.id)
        .emoji_id("1111")
        .build()
        .await?;

    assert!(repo.exists_with_emoji(panel.id, "1111").await.unwrap());
    assert!(!repo.exists_with_emoji(other.id, "1111").await.unwrap());

    Ok(())
}
