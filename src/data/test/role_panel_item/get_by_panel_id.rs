use super::*;

/// Tests that items come back ordered by sort order ascending, with ties
/// broken by insertion order.
///
/// Expected: Ok with items in render order
#[tokio::test]
async fn orders_by_sort_order_then_insertion() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_panel_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let panel = factory::role_panel::create_panel(db, "100").await?;
    let third = factory::role_panel::RolePanelItemFactory::new(db, panel.id)
        .sort_order(5)
        .build()
        .await?;
    let first = factory::role_panel::RolePanelItemFactory::new(db, panel.id)
        .sort_order(1)
        .build()
        .await?;
    // Same sort order as `first`, inserted later: keeps insertion order.
    let second = factory::role_panel::RolePanelItemFactory::new(db, panel.id)
        .sort_order(1)
        .build()
        .await?;

    let repo = RolePanelItemRepository::new(db);
    let items = repo.get_by_panel_id(panel.id).await.unwrap();

    let ids: Vec<i32> = items.iter().map(|item| item.id).collect();
    assert_eq!(ids, vec![first.id, second.id, third.id]);

    Ok(())
}

/// Tests listing a panel with no items.
///
/// Expected: Ok with an empty vec
#[tokio::test]
async fn empty_panel_returns_empty_vec() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_panel_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let panel = factory::role_panel::create_panel(db, "100").await?;

    let repo = RolePanelItemRepository::new(db);
    assert!(repo.get_by_panel_id(panel.id).await.unwrap().is_empty());

    Ok(())
}
