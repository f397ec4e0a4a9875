use chrono::{NaiveDateTime, Utc};
use entity::sea_orm_active_enums::NotificationPriority;
use sea_orm::{
    ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder,
};

/// A notification to insert
#[derive(Clone, Debug)]
pub struct NewNotification {
    pub recipient_id: i32,
    pub sender_id: Option<i32>,
    pub kind: String,
    pub title: String,
    pub message: String,
    pub data: Option<serde_json::Value>,
    pub priority: NotificationPriority,
}

/// Counters summarizing an employee's notifications
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NotificationCounts {
    pub total: u64,
    pub unread: u64,
    /// Unread notifications with high or urgent priority
    pub high_priority_unread: u64,
    /// Notifications created since the provided instant
    pub recent: u64,
}

pub struct NotificationRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> NotificationRepository<'a, C> {
    /// Creates a new instance of [`NotificationRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        notification: NewNotification,
    ) -> Result<entity::notification::Model, DbErr> {
        entity::prelude::Notification::insert(entity::notification::ActiveModel {
            recipient_id: ActiveValue::Set(notification.recipient_id),
            sender_id: ActiveValue::Set(notification.sender_id),
            kind: ActiveValue::Set(notification.kind),
            title: ActiveValue::Set(notification.title),
            message: ActiveValue::Set(notification.message),
            data: ActiveValue::Set(notification.data),
            priority: ActiveValue::Set(notification.priority),
            is_read: ActiveValue::Set(false),
            read_at: ActiveValue::Set(None),
            created_at: ActiveValue::Set(Utc::now().naive_utc()),
            ..Default::default()
        })
        .exec_with_returning(self.db)
        .await
    }

    /// Lists a recipient's notifications newest first
    ///
    /// # Returns
    /// - `Ok((notifications, total))` - The requested page and the total matching row count
    pub async fn list(
        &self,
        recipient_id: i32,
        unread_only: bool,
        page_index: u64,
        limit: u64,
    ) -> Result<(Vec<entity::notification::Model>, u64), DbErr> {
        let mut query = entity::prelude::Notification::find()
            .filter(entity::notification::Column::RecipientId.eq(recipient_id));

        if unread_only {
            query = query.filter(entity::notification::Column::IsRead.eq(false));
        }

        let paginator = query
            .order_by_desc(entity::notification::Column::CreatedAt)
            .order_by_desc(entity::notification::Column::Id)
            .paginate(self.db, limit);

        let total = paginator.num_items().await?;
        let notifications = paginator.fetch_page(page_index).await?;

        Ok((notifications, total))
    }

    pub async fn count_unread(&self, recipient_id: i32) -> Result<u64, DbErr> {
        entity::prelude::Notification::find()
            .filter(entity::notification::Column::RecipientId.eq(recipient_id))
            .filter(entity::notification::Column::IsRead.eq(false))
            .count(self.db)
            .await
    }

    /// Counts a recipient's notifications, treating those created at or after `since` as recent
    pub async fn counts(
        &self,
        recipient_id: i32,
        since: NaiveDateTime,
    ) -> Result<NotificationCounts, DbErr> {
        let owned = || {
            entity::prelude::Notification::find()
                .filter(entity::notification::Column::RecipientId.eq(recipient_id))
        };

        let total = owned().count(self.db).await?;
        let unread = self.count_unread(recipient_id).await?;
        let high_priority_unread = owned()
            .filter(entity::notification::Column::IsRead.eq(false))
            .filter(entity::notification::Column::Priority.is_in([
                NotificationPriority::High,
                NotificationPriority::Urgent,
            ]))
            .count(self.db)
            .await?;
        let recent = owned()
            .filter(entity::notification::Column::CreatedAt.gte(since))
            .count(self.db)
            .await?;

        Ok(NotificationCounts {
            total,
            unread,
            high_priority_unread,
            recent,
        })
    }

    /// Marks one of a recipient's notifications as read
    ///
    /// # Returns
    /// - `Ok(1)` - The notification was found and updated
    /// - `Ok(0)` - No such notification belongs to the recipient
    pub async fn mark_read(&self, id: i32, recipient_id: i32) -> Result<u64, DbErr> {
        let result = entity::prelude::Notification::update_many()
            .set(read_state(true))
            .filter(entity::notification::Column::Id.eq(id))
            .filter(entity::notification::Column::RecipientId.eq(recipient_id))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }

    /// Marks every unread notification of a recipient as read, returning how many changed
    pub async fn mark_all_read(&self, recipient_id: i32) -> Result<u64, DbErr> {
        let result = entity::prelude::Notification::update_many()
            .set(read_state(true))
            .filter(entity::notification::Column::RecipientId.eq(recipient_id))
            .filter(entity::notification::Column::IsRead.eq(false))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }

    /// Deletes one of a recipient's notifications, returning the number of rows removed
    pub async fn delete(&self, id: i32, recipient_id: i32) -> Result<u64, DbErr> {
        let result = entity::prelude::Notification::delete_many()
            .filter(entity::notification::Column::Id.eq(id))
            .filter(entity::notification::Column::RecipientId.eq(recipient_id))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }

    /// Number of the provided notification IDs owned by `recipient_id`
    pub async fn count_owned(&self, ids: &[i32], recipient_id: i32) -> Result<u64, DbErr> {
        entity::prelude::Notification::find()
            .filter(entity::notification::Column::Id.is_in(ids.to_vec()))
            .filter(entity::notification::Column::RecipientId.eq(recipient_id))
            .count(self.db)
            .await
    }

    /// Sets the read flag on several notifications at once
    pub async fn set_read_many(&self, ids: &[i32], is_read: bool) -> Result<u64, DbErr> {
        let result = entity::prelude::Notification::update_many()
            .set(read_state(is_read))
            .filter(entity::notification::Column::Id.is_in(ids.to_vec()))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }

    pub async fn delete_many(&self, ids: &[i32]) -> Result<u64, DbErr> {
        let result = entity::prelude::Notification::delete_many()
            .filter(entity::notification::Column::Id.is_in(ids.to_vec()))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }

    /// Deletes read notifications created before `cutoff`, returning how many were removed
    pub async fn delete_read_older_than(&self, cutoff: NaiveDateTime) -> Result<u64, DbErr> {
        let result = entity::prelude::Notification::delete_many()
            .filter(entity::notification::Column::IsRead.eq(true))
            .filter(entity::notification::Column::CreatedAt.lt(cutoff))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }
}

fn read_state(is_read: bool) -> entity::notification::ActiveModel {
    entity::notification::ActiveModel {
        is_read: ActiveValue::Set(is_read),
        read_at: ActiveValue::Set(is_read.then(|| Utc::now().naive_utc())),
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    mod counts {
        use chrono::{Duration, Utc};
        use entity::sea_orm_active_enums::NotificationPriority;
        use hrdesk_test_utils::prelude::*;

        use crate::server::data::notification::{NotificationCounts, NotificationRepository};

        /// Expect totals, unread, high priority unread and recent counts to be computed per recipient
        #[tokio::test]
        async fn counts_per_recipient() -> Result<(), TestError> {
            let test = TestBuilder::new().with_hr_tables().build().await?;
            let (employee, _) = test.employee().insert_with_role("EMP001", "Employee", &[]).await?;
            let (other, _) = test.employee().insert_with_role("EMP002", "Employee", &[]).await?;
            let old = Utc::now().naive_utc() - Duration::days(3);
            test.notification()
                .insert_notification(employee.id, NotificationPriority::Urgent, false)
                .await?;
            test.notification()
                .insert_notification(employee.id, NotificationPriority::Low, false)
                .await?;
            test.notification()
                .insert_notification_at(employee.id, NotificationPriority::High, true, old)
                .await?;
            test.notification()
                .insert_notification(other.id, NotificationPriority::High, false)
                .await?;

            let repo = NotificationRepository::new(&test.db);
            let counts = repo
                .counts(employee.id, Utc::now().naive_utc() - Duration::days(1))
                .await?;

            assert_eq!(
                counts,
                NotificationCounts {
                    total: 3,
                    unread: 2,
                    high_priority_unread: 1,
                    recent: 2,
                }
            );

            Ok(())
        }
    }

    mod delete_read_older_than {
        use chrono::{Duration, Utc};
        use entity::sea_orm_active_enums::NotificationPriority;
        use hrdesk_test_utils::prelude::*;

        use crate::server::data::notification::NotificationRepository;

        /// Expect only old read notifications to be removed
        #[tokio::test]
        async fn removes_only_old_read_notifications() -> Result<(), TestError> {
            let test = TestBuilder::new().with_hr_tables().build().await?;
            let (employee, _) = test.employee().insert_with_role("EMP001", "Employee", &[]).await?;
            let now = Utc::now().naive_utc();
            let old = now - Duration::days(45);
            test.notification()
                .insert_notification_at(employee.id, NotificationPriority::Low, true, old)
                .await?;
            test.notification()
                .insert_notification_at(employee.id, NotificationPriority::Low, false, old)
                .await?;
            test.notification()
                .insert_notification(employee.id, NotificationPriority::Low, true)
                .await?;

            let repo = NotificationRepository::new(&test.db);
            let removed = repo.delete_read_older_than(now - Duration::days(30)).await?;
            let counts = repo.counts(employee.id, now).await?;

            assert_eq!(removed, 1);
            assert_eq!(counts.total, 2);

            Ok(())
        }
    }

    mod mark_read {
        use entity::sea_orm_active_enums::NotificationPriority;
        use hrdesk_test_utils::prelude::*;

        use crate::server::data::notification::NotificationRepository;

        /// Expect another employee's notification to be left untouched
        #[tokio::test]
        async fn ignores_other_recipients() -> Result<(), TestError> {
            let test = TestBuilder::new().with_hr_tables().build().await?;
            let (employee, _) = test.employee().insert_with_role("EMP001", "Employee", &[]).await?;
            let (other, _) = test.employee().insert_with_role("EMP002", "Employee", &[]).await?;
            let notification = test
                .notification()
                .insert_notification(other.id, NotificationPriority::Low, false)
                .await?;

            let repo = NotificationRepository::new(&test.db);
            let updated = repo.mark_read(notification.id, employee.id).await?;

            assert_eq!(updated, 0);
            assert_eq!(repo.count_unread(other.id).await?, 1);

            Ok(())
        }
    }
}
