use entity::prelude::*;
use sea_orm::{sea_query::TableCreateStatement, EntityTrait, Schema};

use crate::{context::TestContext, error::TestError};

/// Builder for creating test contexts with customizable database schemas.
///
/// Provides a fluent interface for configuring test environments with in-memory
/// SQLite databases. Use the builder pattern to add entity tables, then call
/// `build()` to create the configured test context.
///
/// # Example
///
/// ```rust,ignore
/// use test_utils::builder::TestBuilder;
/// use entity::prelude::{GuildSettings, RolePanel};
///
/// let test = TestBuilder::new()
///     .with_table(GuildSettings)
///     .with_table(RolePanel)
///     .build()
///     .await?;
/// ```
pub struct TestBuilder {
    /// CREATE TABLE statements to execute during database setup, generated
    /// from entity models and executed in insertion order.
    tables: Vec<TableCreateStatement>,
}

impl TestBuilder {
    /// Creates a new test builder with no tables configured.
    pub fn new() -> Self {
        Self { tables: Vec::new() }
    }

    /// Adds an entity table to the test database schema.
    ///
    /// Generates a CREATE TABLE statement from the provided SeaORM entity using
    /// SQLite backend syntax. Tables should be added in dependency order (tables
    /// with foreign keys after their referenced tables).
    ///
    /// # Arguments
    /// - `entity` - SeaORM entity implementing `EntityTrait` to create a table for
    ///
    /// # Returns
    /// - `Self` - Builder instance for method chaining
    pub fn with_table<E: EntityTrait>(mut self, entity: E) -> Self {
        let schema = Schema::new(sea_orm::DbBackend::Sqlite);
        self.tables.push(schema.create_table_from_entity(entity));
        self
    }

    /// Adds all tables required for role-panel operations.
    ///
    /// This convenience method adds the following tables in dependency order:
    /// - GuildSettings
    /// - RolePanel
    /// - RolePanelItem
    ///
    /// # Returns
    /// - `Self` - Builder instance for method chaining
    pub fn with_panel_tables(self) -> Self {
        self.with_table(GuildSettings)
            .with_table(RolePanel)
            .with_table(RolePanelItem)
    }

    /// Adds all tables touched by the audit pipeline.
    ///
    /// Adds GuildSettings (log-channel lookup) and AuditEvent (persistence).
    ///
    /// # Returns
    /// - `Self` - Builder instance for method chaining
    pub fn with_audit_tables(self) -> Self {
        self.with_table(GuildSettings).with_table(AuditEvent)
    }

    /// Builds and initializes the test context with the configured tables.
    ///
    /// # Returns
    /// - `Ok(TestContext)` - Connected context with all tables created
    /// - `Err(TestError::Database)` - Connection or schema setup failure
    pub async fn build(self) -> Result<TestContext, TestError> {
        let mut context = TestContext::new();
        context.with_tables(self.tables).await?;
        Ok(context)
    }
}

impl Default for TestBuilder {
    fn default() -> Self {
        Self::new()
    }
}
