//! Declarative test builder.
//!
//! This module provides the `TestBuilder` API for configuring test environments before execution.
//! Table creation is queued and executed during the final `build()` call.

use sea_orm::{sea_query::TableCreateStatement, EntityTrait, Schema};

use crate::{error::TestError, TestContext};

/// Builder for declarative test initialization.
///
/// Methods can be chained together and finalized with `build()` to create a
/// [`TestContext`] with the requested tables.
#[derive(Default)]
pub struct TestBuilder {
    tables: Vec<TableCreateStatement>,
    include_hr_tables: bool,
}

impl TestBuilder {
    /// Create a new TestBuilder with no tables configured.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add every application table to the test database.
    ///
    /// Tables are created parent-first so foreign keys resolve: Department, Role,
    /// RolePermission, Employee, LeaveType, LeaveBalance, LeaveApplication, Project,
    /// WorkLog, PerformanceReview, PerformanceMetric, Notification, and AuditLog.
    ///
    /// # Returns
    /// - `Self` - The builder instance for method chaining
    pub fn with_hr_tables(mut self) -> Self {
        self.include_hr_tables = true;
        self
    }

    /// Add a custom entity table to the test database.
    ///
    /// Generates a CREATE TABLE statement for the entity, which will be executed during `build()`.
    /// Chain multiple calls to add multiple tables.
    ///
    /// # Arguments
    /// - `entity` - Entity type implementing `EntityTrait`
    ///
    /// # Example
    ///
    /// ```no_run
    /// use hrdesk_test_utils::TestBuilder;
    /// use entity::prelude::*;
    ///
    /// # async fn example() -> Result<(), hrdesk_test_utils::TestError> {
    /// let test = TestBuilder::new()
    ///     .with_table(Department)
    ///     .with_table(Role)
    ///     .build()
    ///     .await?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn with_table<E: EntityTrait>(mut self, entity: E) -> Self {
        let schema = Schema::new(sea_orm::DbBackend::Sqlite);
        self.tables.push(schema.create_table_from_entity(entity));
        self
    }

    /// Build the test context by creating all configured tables.
    ///
    /// # Returns
    /// - `Ok(TestContext)` - Test environment ready for use
    /// - `Err(TestError::DbErr)` - Connection or table creation failed
    pub async fn build(self) -> Result<TestContext, TestError> {
        let context = TestContext::new().await?;

        let mut all_tables = Vec::new();

        if self.include_hr_tables {
            use entity::prelude::*;

            let schema = Schema::new(sea_orm::DbBackend::Sqlite);
            all_tables.extend(vec![
                schema.create_table_from_entity(Department),
                schema.create_table_from_entity(Role),
                schema.create_table_from_entity(RolePermission),
                schema.create_table_from_entity(Employee),
                schema.create_table_from_entity(LeaveType),
                schema.create_table_from_entity(LeaveBalance),
                schema.create_table_from_entity(LeaveApplication),
                schema.create_table_from_entity(Project),
                schema.create_table_from_entity(WorkLog),
                schema.create_table_from_entity(PerformanceReview),
                schema.create_table_from_entity(PerformanceMetric),
                schema.create_table_from_entity(Notification),
                schema.create_table_from_entity(AuditLog),
            ]);
        }

        all_tables.extend(self.tables);
        context.with_tables(all_tables).await?;

        Ok(context)
    }
}
