//! Role panel data repositories.
//!
//! Provides `RolePanelRepository` for panel rows and `RolePanelItemRepository`
//! for the buttons attached to a panel, converting entity models into domain
//! models for use within services & command handlers.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder,
};

use crate::{
    error::AppError,
    model::role_panel::{CreateRolePanelItemParam, CreateRolePanelParam, RolePanel, RolePanelItem},
};

pub struct RolePanelRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> RolePanelRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a new panel with no items and no published message.
    ///
    /// # Arguments
    /// - `param` - Creation parameters from `/panel create`
    ///
    /// # Returns
    /// - `Ok(RolePanel)` - The created panel as a domain model
    /// - `Err(AppError::DbErr)` - Database error during insert
    pub async fn create(&self, param: CreateRolePanelParam) -> Result<RolePanel, AppError> {
        let model = entity::role_panel::ActiveModel {
            guild_id: ActiveValue::Set(param.guild_id),
            mode: ActiveValue::Set(param.mode.as_str().to_string()),
            allow_none: ActiveValue::Set(param.allow_none),
            title: ActiveValue::Set(param.title),
            description: ActiveValue::Set(param.description),
            created_by: ActiveValue::Set(param.created_by),
            published_channel_id: ActiveValue::Set(None),
            published_message_id: ActiveValue::Set(None),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(RolePanel::try_from(model)?)
    }

    /// Finds a panel by ID.
    ///
    /// # Returns
    /// - `Ok(Some(RolePanel))` - The panel if found
    /// - `Ok(None)` - No panel with that ID
    /// - `Err(AppError)` - Database error or corrupted mode column
    pub async fn find_by_id(&self, id: i32) -> Result<Option<RolePanel>, AppError> {
        let model = entity::prelude::RolePanel::find_by_id(id).one(self.db).await?;
        model.map(RolePanel::try_from).transpose().map_err(Into::into)
    }

    /// Binds a panel to its published message.
    ///
    /// Both identifiers are set together so the panel is never half-published.
    ///
    /// # Returns
    /// - `Ok(RolePanel)` - The updated panel
    /// - `Err(AppError::NotFound)` - No panel with that ID
    pub async fn set_published_message(
        &self,
        id: i32,
        channel_id: &str,
        message_id: &str,
    ) -> Result<RolePanel, AppError> {
        let model = entity::prelude::RolePanel::find_by_id(id)
            .one(self.db)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Panel {} not found.", id)))?;

        let mut active: entity::role_panel::ActiveModel = model.into();
        active.published_channel_id = ActiveValue::Set(Some(channel_id.to_string()));
        active.published_message_id = ActiveValue::Set(Some(message_id.to_string()));
        let updated = active.update(self.db).await?;

        Ok(RolePanel::try_from(updated)?)
    }
}

pub struct RolePanelItemRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> RolePanelItemRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a new item on a panel.
    pub async fn create(
        &self,
        param: CreateRolePanelItemParam,
    ) -> Result<RolePanelItem, AppError> {
        let model = entity::role_panel_item::ActiveModel {
            panel_id: ActiveValue::Set(param.panel_id),
            emoji_id: ActiveValue::Set(param.emoji_id),
            role_id: ActiveValue::Set(param.role_id),
            label: ActiveValue::Set(param.label),
            sort_order: ActiveValue::Set(param.sort_order),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(RolePanelItem::from(model))
    }

    /// Returns the items of a panel ordered by `sort_order` ascending, ties
    /// broken by ID ascending (insertion order).
    pub async fn get_by_panel_id(&self, panel_id: i32) -> Result<Vec<RolePanelItem>, AppError> {
        let models = entity::prelude::RolePanelItem::find()
            .filter(entity::role_panel_item::Column::PanelId.eq(panel_id))
            .order_by_asc(entity::role_panel_item::Column::SortOrder)
            .order_by_asc(entity::role_panel_item::Column::Id)
            .all(self.db)
            .await?;

        Ok(models.into_iter().map(RolePanelItem::from).collect())
    }

    /// True when the panel already carries an item with this emoji.
    pub async fn exists_with_emoji(&self, panel_id: i32, emoji_id: &str) -> Result<bool, AppError> {
        let count = entity::prelude::RolePanelItem::find()
            .filter(entity::role_panel_item::Column::PanelId.eq(panel_id))
            .filter(entity::role_panel_item::Column::EmojiId.eq(emoji_id))
            .count(self.db)
            .await?;
        Ok(count > 0)
    }

    /// Deletes every item matching `(panel_id, emoji_id)`.
    ///
    /// Set-based delete: zero matches is not an error, making removal
    /// idempotent.
    ///
    /// # Returns
    /// - `Ok(u64)` - Number of rows removed
    pub async fn delete_by_emoji(&self, panel_id: i32, emoji_id: &str) -> Result<u64, AppError> {
        let result = entity::prelude::RolePanelItem::delete_many()
            .filter(entity::role_panel_item::Column::PanelId.eq(panel_id))
            .filter(entity::role_panel_item::Column::EmojiId.eq(emoji_id))
            .exec(self.db)
            .await?;
        Ok(result.rows_affected)
    }
}
