//! Role panel and panel item factories for tests.

use crate::factory::helpers::next_id;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating test role panels with customizable fields.
pub struct RolePanelFactory<'a> {
    db: &'a DatabaseConnection,
    guild_id: String,
    mode: String,
    allow_none: bool,
    title: String,
    description: String,
    created_by: String,
}

impl<'a> RolePanelFactory<'a> {
    /// Creates a new factory with defaults: MULTI mode, `allow_none` true,
    /// auto-generated guild id and title.
    pub fn new(db: &'a DatabaseConnection) -> Self {
        let id = next_id();
        Self {
            db,
            guild_id: id.to_string(),
            mode: "MULTI".to_string(),
            allow_none: true,
            title: format!("Panel {}", id),
            description: "Pick your roles".to_string(),
            created_by: "1".to_string(),
        }
    }

    /// Sets the guild ID.
    pub fn guild_id(mut self, guild_id: impl Into<String>) -> Self {
        self.guild_id = guild_id.into();
        self
    }

    /// Sets the selection mode (`"SINGLE"` or `"MULTI"`).
    pub fn mode(mut self, mode: impl Into<String>) -> Self {
        self.mode = mode.into();
        self
    }

    /// Sets whether SINGLE mode allows deselecting down to zero roles.
    pub fn allow_none(mut self, allow_none: bool) -> Self {
        self.allow_none = allow_none;
        self
    }

    /// Sets the panel title.
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Builds and inserts the panel row.
    pub async fn build(self) -> Result<entity::role_panel::Model, DbErr> {
        entity::role_panel::ActiveModel {
            guild_id: ActiveValue::Set(self.guild_id),
            mode: ActiveValue::Set(self.mode),
            allow_none: ActiveValue::Set(self.allow_none),
            title: ActiveValue::Set(self.title),
            description: ActiveValue::Set(self.description),
            created_by: ActiveValue::Set(self.created_by),
            published_channel_id: ActiveValue::Set(None),
            published_message_id: ActiveValue::Set(None),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

/// Creates a panel with default values for the given guild.
pub async fn create_panel(
    db: &DatabaseConnection,
    guild_id: &str,
) -> Result<entity::role_panel::Model, DbErr> {
    RolePanelFactory::new(db).guild_id(guild_id).build().await
}

/// Factory for creating test role panel items.
pub struct RolePanelItemFactory<'a> {
    db: &'a DatabaseConnection,
    panel_id: i32,
    emoji_id: String,
    role_id: String,
    label: String,
    sort_order: i32,
}

impl<'a> RolePanelItemFactory<'a> {
    /// Creates a new factory with defaults: auto-generated emoji and role ids,
    /// sort order 0.
    pub fn new(db: &'a DatabaseConnection, panel_id: i32) -> Self {
        let id = next_id();
        Self {
            db,
            panel_id,
            emoji_id: format!("10{}", id),
            role_id: format!("20{}", id),
            label: format!("Item {}", id),
            sort_order: 0,
        }
    }

    /// Sets the custom emoji ID.
    pub fn emoji_id(mut self, emoji_id: impl Into<String>) -> Self {
        self.emoji_id = emoji_id.into();
        self
    }

    /// Sets the role ID granted by this item.
    pub fn role_id(mut self, role_id: impl Into<String>) -> Self {
        self.role_id = role_id.into();
        self
    }

    /// Sets the button label.
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Sets the sort order.
    pub fn sort_order(mut self, sort_order: i32) -> Self {
        self.sort_order = sort_order;
        self
    }

    /// Builds and inserts the item row.
    pub async fn build(self) -> Result<entity::role_panel_item::Model, DbErr> {
        entity::role_panel_item::ActiveModel {
            panel_id: ActiveValue::Set(self.panel_id),
            emoji_id: ActiveValue::Set(self.emoji_id),
            role_id: ActiveValue::Set(self.role_id),
            label: ActiveValue::Set(self.label),
            sort_order: ActiveValue::Set(self.sort_order),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

/// Creates a panel item with default values.
pub async fn create_item(
    db: &DatabaseConnection,
    panel_id: i32,
) -> Result<entity::role_panel_item::Model, DbErr> {
    RolePanelItemFactory::new(db, panel_id).build().await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::TestBuilder;

    #[tokio::test]
    async fn creates_panel_and_item() -> Result<(), DbErr> {
        let test = TestBuilder::new().with_panel_tables().build().await.unwrap();
        let db = test.db.as_ref().unwrap();

        let panel = create_panel(db, "42").await?;
        assert_eq!(panel.guild_id, "42");
        assert_eq!(panel.mode, "MULTI");
        assert!(panel.allow_none);
        assert!(panel.published_message_id.is_none());

        let item = create_item(db, panel.id).await?;
        assert_eq!(item.panel_id, panel.id);
        assert_eq!(item.sort_order, 0);

        Ok(())
    }
}
