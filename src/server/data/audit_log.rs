use chrono::Utc;
use entity::sea_orm_active_enums::AuditAction;
use sea_orm::{ActiveValue, ConnectionTrait, DbErr, EntityTrait};

/// Append-only access to the audit trail.
pub struct AuditLogRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> AuditLogRepository<'a, C> {
    /// Creates a new instance of [`AuditLogRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Records a change to a table row
    ///
    /// # Arguments
    /// - `user_id` - Employee who made the change, if known
    /// - `action` - Kind of change
    /// - `table_name` - Table the changed row belongs to
    /// - `record_id` - Primary key of the changed row
    /// - `old_values` - Snapshot before the change
    /// - `new_values` - Snapshot after the change
    pub async fn create(
        &self,
        user_id: Option<i32>,
        action: AuditAction,
        table_name: &str,
        record_id: i32,
        old_values: Option<serde_json::Value>,
        new_values: Option<serde_json::Value>,
    ) -> Result<entity::audit_log::Model, DbErr> {
        entity::prelude::AuditLog::insert(entity::audit_log::ActiveModel {
            user_id: ActiveValue::Set(user_id),
            action: ActiveValue::Set(action),
            table_name: ActiveValue::Set(table_name.to_string()),
            record_id: ActiveValue::Set(record_id),
            old_values: ActiveValue::Set(old_values),
            new_values: ActiveValue::Set(new_values),
            created_at: ActiveValue::Set(Utc::now().naive_utc()),
            ..Default::default()
        })
        .exec_with_returning(self.db)
        .await
    }
}
