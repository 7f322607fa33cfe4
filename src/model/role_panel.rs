use chrono::{DateTime, Utc};

use crate::error::internal::InternalError;

/// Selection semantics of a panel.
///
/// SINGLE enforces at most one of the panel's roles per member; MULTI lets
/// every item toggle independently.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PanelMode {
    Single,
    Multi,
}

impl PanelMode {
    /// Stable string stored in the `mode` column and shown in the panel footer.
    pub fn as_str(&self) -> &'static str {
        match self {
            PanelMode::Single => "SINGLE",
            PanelMode::Multi => "MULTI",
        }
    }

    pub fn parse(value: &str) -> Result<Self, InternalError> {
        match value {
            "SINGLE" => Ok(PanelMode::Single),
            "MULTI" => Ok(PanelMode::Multi),
            other => Err(InternalError::UnknownPanelMode {
                value: other.to_string(),
            }),
        }
    }
}

/// A role self-assignment panel.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RolePanel {
    pub id: i32,
    pub guild_id: String,
    pub mode: PanelMode,
    pub allow_none: bool,
    pub title: String,
    pub description: String,
    pub created_by: String,
    pub published_channel_id: Option<String>,
    pub published_message_id: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<entity::role_panel::Model> for RolePanel {
    type Error = InternalError;

    fn try_from(model: entity::role_panel::Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: model.id,
            guild_id: model.guild_id,
            mode: PanelMode::parse(&model.mode)?,
            allow_none: model.allow_none,
            title: model.title,
            description: model.description,
            created_by: model.created_by,
            published_channel_id: model.published_channel_id,
            published_message_id: model.published_message_id,
            created_at: model.created_at,
        })
    }
}

/// One button on a panel.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RolePanelItem {
    pub id: i32,
    pub panel_id: i32,
    pub emoji_id: String,
    pub role_id: String,
    pub label: String,
    pub sort_order: i32,
}

impl From<entity::role_panel_item::Model> for RolePanelItem {
    fn from(model: entity::role_panel_item::Model) -> Self {
        Self {
            id: model.id,
            panel_id: model.panel_id,
            emoji_id: model.emoji_id,
            role_id: model.role_id,
            label: model.label,
            sort_order: model.sort_order,
        }
    }
}

/// Parameters for `/panel create`.
#[derive(Clone, Debug)]
pub struct CreateRolePanelParam {
    pub guild_id: String,
    pub mode: PanelMode,
    pub allow_none: bool,
    pub title: String,
    pub description: String,
    pub created_by: String,
}

/// Parameters for `/panel add`.
#[derive(Clone, Debug)]
pub struct CreateRolePanelItemParam {
    pub panel_id: i32,
    pub emoji_id: String,
    pub role_id: String,
    pub label: String,
    pub sort_order: i32,
}
