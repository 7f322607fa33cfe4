//! Domain models and operation-specific parameter types.
//!
//! Repositories convert database entities into these models before handing
//! them to services, keeping SeaORM types out of the business logic.

pub mod audit;
pub mod guild_settings;
pub mod preview;
pub mod role_panel;
