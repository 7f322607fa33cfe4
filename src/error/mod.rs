//! Application error types.
//!
//! This module provides the error hierarchy for the bot. The `AppError` enum
//! is the top-level error type; domain-specific enums (`CommandError`,
//! `ConfigError`, `InternalError`) wrap into it via `#[from]`. The command
//! dispatcher decides per-variant what the invoking user sees, so internal
//! error text never leaks into Discord replies.

pub mod command;
pub mod config;
pub mod internal;

use thiserror::Error;

use crate::error::{command::CommandError, config::ConfigError, internal::InternalError};

/// Top-level application error type.
///
/// Aggregates all error types that can occur in the bot. Most variants use
/// `#[from]` for automatic conversion; `NotFound` and `BadRequest` carry a
/// user-facing message for single-operation failures.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration error during startup or environment variable loading.
    #[error(transparent)]
    ConfigErr(#[from] ConfigError),

    /// Guard failure on a slash command (permissions, channel scope).
    ///
    /// Carries a user-facing message; rendered verbatim as an ephemeral
    /// reply with no state change.
    #[error(transparent)]
    CommandErr(#[from] CommandError),

    /// Database operation error from SeaORM.
    ///
    /// Fatal for the in-flight operation; never retried.
    #[error(transparent)]
    DbErr(#[from] sea_orm::DbErr),

    /// HTTP client request error from reqwest.
    #[error(transparent)]
    ReqwestErr(#[from] reqwest::Error),

    /// Discord API error from Serenity.
    ///
    /// Boxed due to large size.
    #[error(transparent)]
    DiscordErr(#[from] Box<serenity::Error>),

    /// Unexpected internal state indicating a possible bug.
    #[error(transparent)]
    InternalErr(#[from] InternalError),

    /// Resource not found (panel, item, role, message).
    ///
    /// Reported per-operation; no rollback is needed since operations are
    /// single-row by nature.
    ///
    /// # Fields
    /// - Message describing what resource was not found
    #[error("{0}")]
    NotFound(String),

    /// Invalid request (bad emoji reference, duplicate item, missing target).
    ///
    /// # Fields
    /// - Message describing what was invalid about the request
    #[error("{0}")]
    BadRequest(String),
}

/// Manual conversion from serenity::Error to AppError.
///
/// Boxes the error to reduce the size of the AppError enum, as
/// serenity::Error is very large and would make all AppError variants larger
/// if not boxed.
impl From<serenity::Error> for AppError {
    fn from(err: serenity::Error) -> Self {
        AppError::DiscordErr(Box::new(err))
    }
}

impl AppError {
    /// The message shown to the invoking user for this error.
    ///
    /// Guard failures and single-operation errors carry their own text;
    /// everything else (database, Discord API, fetch failures) collapses to
    /// a generic message so internal details stay in the logs.
    pub fn user_message(&self) -> String {
        match self {
            AppError::CommandErr(err) => err.to_string(),
            AppError::NotFound(msg) | AppError::BadRequest(msg) => msg.clone(),
            _ => "Something went wrong while running that command.".to_string(),
        }
    }
}
