use super::*;

/// Tests deleting the single item carrying an emoji.
///
/// Expected: Ok(1) and the panel no longer lists the item
#[tokio::test]
async fn deletes_matching_item() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_panel_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let panel = factory::role_panel::create_panel(db, "100").await?;
    factory::role_panel::RolePanelItemFactory::new(db, panel.id)
        .emoji_id("1111")
        .build()
        .await?;
    factory::role_panel::RolePanelItemFactory::new(db, panel.id)
        .emoji_id("2222")
        .build()
        .await?;

    let repo = RolePanelItemRepository::new(db);
    let removed = repo.delete_by_emoji(panel.id, "1111").await.unwrap();
    assert_eq!(removed, 1);

    let remaining = repo.get_by_panel_id(panel.id).await.unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].emoji_id, "2222");

    Ok(())
}

/// Tests that removal is idempotent: deleting again matches nothing and
/// succeeds with zero rows.
///
/// Expected: Ok(1) then Ok(0), no error either time
#[tokio::test]
async fn removing_twice_is_idempotent() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_panel_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let panel = factory::role_panel::create_panel(db, "100").await?;
    factory::role_panel::RolePanelItemFactory::new(db, panel.id)
        .emoji_id("1111")
        .build()
        .await?;

    let repo = RolePanelItemRepository::new(db);
    assert_eq!(repo.delete_by_emoji(panel.id, "1111").await.unwrap(), 1);
    assert_eq!(repo.delete_by_emoji(panel.id, "1111").await.unwrap(), 0);
    assert!(repo.get_by_panel_id(panel.id).await.unwrap().is_empty());

    Ok(())
}

/// Tests that the delete is scoped to one panel.
///
/// Expected: the other panel's item with the same emoji survives
#[tokio::test]
async fn does_not_touch_other_panels() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_panel_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let panel = factory::role_panel::create_panel(db, "100").await?;
    let other = factory::role_panel::create_panel(db, "100").await?;
    factory::role_panel::RolePanelItemFactory::new(db, panel.id)
        .emoji_id("1111")
        .build()
        .await?;
    factory::role_panel::RolePanelItemFactory::new(db, other.id)
        .emoji_id("1111")
        .build()
        .await?;

    let repo = RolePanelItemRepository::new(db);
    repo.delete_by_emoji(panel.id, "1111").await.unwrap();

    assert_eq!(repo.get_by_panel_id(other.id).await.unwrap().len(), 1);

    Ok(())
}
