use chrono::{NaiveDateTime, Utc};
use entity::sea_orm_active_enums::NotificationPriority;
use sea_orm::{ActiveValue, EntityTrait};

use crate::{error::TestError, TestContext};

impl TestContext {
    pub fn notification(&self) -> NotificationFixtures<'_> {
        NotificationFixtures { setup: self }
    }
}

pub struct NotificationFixtures<'a> {
    setup: &'a TestContext,
}

impl<'a> NotificationFixtures<'a> {
    pub async fn insert_notification(
        &self,
        recipient_id: i32,
        priority: NotificationPriority,
        is_read: bool,
    ) -> Result<entity::notification::Model, TestError> {
        self.insert_notification_at(recipient_id, priority, is_read, Utc::now().naive_utc())
            .await
    }

    /// Insert a notification with an explicit creation time, for age-based cleanup tests.
    pub async fn insert_notification_at(
        &self,
        recipient_id: i32,
        priority: NotificationPriority,
        is_read: bool,
        created_at: NaiveDateTime,
    ) -> Result<entity::notification::Model, TestError> {
        Ok(
            entity::prelude::Notification::insert(entity::notification::ActiveModel {
                recipient_id: ActiveValue::Set(recipient_id),
                sender_id: ActiveValue::Set(None),
                kind: ActiveValue::Set("system_maintenance".to_string()),
                title: ActiveValue::Set("Scheduled maintenance".to_string()),
                message: ActiveValue::Set("The system will be unavailable tonight".to_string()),
                data: ActiveValue::Set(None),
                priority: ActiveValue::Set(priority),
                is_read: ActiveValue::Set(is_read),
                read_at: ActiveValue::Set(is_read.then_some(created_at)),
                created_at: ActiveValue::Set(created_at),
                ..Default::default()
            })
            .exec_with_returning(&self.setup.db)
            .await?,
        )
    }
}
