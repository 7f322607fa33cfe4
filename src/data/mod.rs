//! Data repositories providing database operations.
//!
//! Each repository holds a reference to the database connection and converts
//! entity models into domain models for use by services and command handlers.

pub mod audit;
pub mod guild_settings;
pub mod role_panel;

#[cfg(test)]
mod test;
