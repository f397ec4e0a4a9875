//! In-app notifications, the dispatcher other services notify through, and the daily
//! reminder jobs.

use chrono::{Duration, NaiveDate};
use entity::sea_orm_active_enums::NotificationPriority;
use sea_orm::DatabaseConnection;
use serde_json::json;

use crate::{
    model::{
        api::MessageDto,
        notification::{
            BulkAction, BulkActionDto, BulkActionResultDto, CreateNotificationDto, MarkAllReadDto,
            NotificationDto, NotificationListDto, NotificationQuery, NotificationStatsDto,
        },
    },
    server::{
        data::{
            employee::EmployeeRepository,
            leave::{application::LeaveApplicationRepository, leave_type::LeaveTypeRepository},
            notification::{NewNotification, NotificationRepository},
        },
        error::Error,
        mail::{
            template::{self, LeaveSummary},
            Email, Mailer,
        },
        model::{auth::AuthUser, permission},
        util::{
            pagination::Page,
            time::{is_same_day_of_year, now, start_of_day, years_of_service},
        },
    },
};

/// Notification `type` values.
pub mod kind {
    pub const LEAVE_REQUEST: &str = "leave_request";
    pub const LEAVE_APPROVED: &str = "leave_approved";
    pub const LEAVE_REJECTED: &str = "leave_rejected";
    pub const LEAVE_REMINDER: &str = "leave_reminder";
    pub const PERFORMANCE_REVIEW: &str = "performance_review";
    pub const WORK_LOG_REMINDER: &str = "work_log_reminder";
    pub const SYSTEM_MAINTENANCE: &str = "system_maintenance";
    pub const BIRTHDAY_REMINDER: &str = "birthday_reminder";
    pub const ANNIVERSARY_REMINDER: &str = "anniversary_reminder";
}

const DEFAULT_PAGE_SIZE: u64 = 20;
/// Read notifications older than this are removed by the cleanup job.
const RETENTION_DAYS: i64 = 30;

fn not_found() -> Error {
    Error::NotFound("Notification not found".to_string())
}

impl From<entity::notification::Model> for NotificationDto {
    fn from(n: entity::notification::Model) -> Self {
        Self {
            id: n.id,
            recipient_id: n.recipient_id,
            sender_id: n.sender_id,
            kind: n.kind,
            title: n.title,
            message: n.message,
            data: n.data,
            priority: n.priority,
            is_read: n.is_read,
            read_at: n.read_at,
            created_at: n.created_at,
        }
    }
}

pub struct NotificationService<'a> {
    db: &'a DatabaseConnection,
    mailer: &'a Mailer,
}

impl<'a> NotificationService<'a> {
    /// Creates a new instance of [`NotificationService`]
    pub fn new(db: &'a DatabaseConnection, mailer: &'a Mailer) -> Self {
        Self { db, mailer }
    }

    /// Stores a notification and, when requested, emails it.
    ///
    /// Email delivery failures are logged and do not fail the dispatch. Only the insert can
    /// return an error.
    pub async fn dispatch(
        &self,
        notification: NewNotification,
        email: Option<Email>,
    ) -> Result<entity::notification::Model, Error> {
        let stored = NotificationRepository::new(self.db)
            .create(notification)
            .await?;

        if let Some(email) = email {
            if let Err(err) = self.mailer.send(&email).await {
                tracing::warn!(
                    notification_id = stored.id,
                    to = %email.to,
                    error = %err,
                    "failed to send notification email"
                );
            }
        }

        Ok(stored)
    }

    /// Like [`Self::dispatch`], but a failed insert is only logged.
    ///
    /// Used after the primary action of a request has already been committed.
    pub async fn dispatch_best_effort(&self, notification: NewNotification, email: Option<Email>) {
        let recipient_id = notification.recipient_id;
        let kind = notification.kind.clone();

        if let Err(err) = self.dispatch(notification, email).await {
            tracing::warn!(recipient_id, kind = %kind, error = %err, "failed to dispatch notification");
        }
    }

    pub async fn list(
        &self,
        user: &AuthUser,
        query: &NotificationQuery,
    ) -> Result<NotificationListDto, Error> {
        let page = Page::new(query.page, query.limit, DEFAULT_PAGE_SIZE);
        let repo = NotificationRepository::new(self.db);

        let (notifications, total) = repo
            .list(user.id, query.unread_only, page.index(), page.limit)
            .await?;
        let unread_count = repo.count_unread(user.id).await?;

        Ok(NotificationListDto {
            notifications: notifications.into_iter().map(NotificationDto::from).collect(),
            pagination: page.to_dto(total),
            unread_count,
        })
    }

    pub async fn unread_count(&self, user: &AuthUser) -> Result<u64, Error> {
        Ok(NotificationRepository::new(self.db)
            .count_unread(user.id)
            .await?)
    }

    pub async fn mark_read(&self, user: &AuthUser, id: i32) -> Result<MessageDto, Error> {
        let updated = NotificationRepository::new(self.db)
            .mark_read(id, user.id)
            .await?;

        if updated == 0 {
            return Err(not_found());
        }

        Ok(MessageDto::new("Notification marked as read"))
    }

    pub async fn mark_all_read(&self, user: &AuthUser) -> Result<MarkAllReadDto, Error> {
        let updated_count = NotificationRepository::new(self.db)
            .mark_all_read(user.id)
            .await?;

        Ok(MarkAllReadDto {
            message: "All notifications marked as read".to_string(),
            updated_count,
        })
    }

    pub async fn delete(&self, user: &AuthUser, id: i32) -> Result<MessageDto, Error> {
        let deleted = NotificationRepository::new(self.db)
            .delete(id, user.id)
            .await?;

        if deleted == 0 {
            return Err(not_found());
        }

        Ok(MessageDto::new("Notification deleted successfully"))
    }

    /// Sends a notification to any employee. Requires `manage_notifications`.
    pub async fn create(
        &self,
        user: &AuthUser,
        request: CreateNotificationDto,
    ) -> Result<NotificationDto, Error> {
        user.require_any(&[permission::MANAGE_NOTIFICATIONS])?;

        if EmployeeRepository::new(self.db)
            .get(request.recipient_id)
            .await?
            .is_none()
        {
            return Err(Error::NotFound("Recipient not found".to_string()));
        }

        let stored = self
            .dispatch(
                NewNotification {
                    recipient_id: request.recipient_id,
                    sender_id: Some(user.id),
                    kind: request.kind,
                    title: request.title,
                    message: request.message,
                    data: request.data,
                    priority: request.priority,
                },
                None,
            )
            .await?;

        Ok(stored.into())
    }

    /// Counters for the caller. `today` covers the last 24 hours.
    pub async fn stats(&self, user: &AuthUser) -> Result<NotificationStatsDto, Error> {
        let counts = NotificationRepository::new(self.db)
            .counts(user.id, now() - Duration::days(1))
            .await?;

        Ok(NotificationStatsDto {
            total: counts.total,
            unread: counts.unread,
            high_priority_unread: counts.high_priority_unread,
            today: counts.recent,
        })
    }

    /// Applies one action to several of the caller's notifications.
    ///
    /// # Returns
    /// - `Ok(BulkActionResultDto)` - Action applied to every listed notification
    /// - `Err(Error::Forbidden)` - At least one ID is unknown or belongs to someone else
    pub async fn bulk_action(
        &self,
        user: &AuthUser,
        request: &BulkActionDto,
    ) -> Result<BulkActionResultDto, Error> {
        let mut ids = request.notification_ids.clone();
        ids.sort_unstable();
        ids.dedup();

        let repo = NotificationRepository::new(self.db);

        let owned = repo.count_owned(&ids, user.id).await?;
        if owned != ids.len() as u64 {
            return Err(Error::Forbidden(
                "Some notifications do not belong to you".to_string(),
            ));
        }

        let (affected_count, message) = match request.action {
            BulkAction::MarkRead => (
                repo.set_read_many(&ids, true).await?,
                "Notifications marked as read",
            ),
            BulkAction::MarkUnread => (
                repo.set_read_many(&ids, false).await?,
                "Notifications marked as unread",
            ),
            BulkAction::Delete => (repo.delete_many(&ids).await?, "Notifications deleted"),
        };

        Ok(BulkActionResultDto {
            message: message.to_string(),
            affected_count,
        })
    }

    /// Notifies Active employees with a birthday on `today`, and their managers.
    ///
    /// # Returns
    /// - `Ok(count)` - Number of employees celebrated
    pub async fn send_birthday_reminders(&self, today: NaiveDate) -> Result<usize, Error> {
        let employees = EmployeeRepository::new(self.db).list_active().await?;
        let celebrating: Vec<_> = employees
            .into_iter()
            .filter(|e| e.date_of_birth.is_some_and(|dob| is_same_day_of_year(dob, today)))
            .collect();

        for employee in &celebrating {
            let name = format!("{} {}", employee.first_name, employee.last_name);

            if let Some(manager_id) = employee.manager_id {
                self.dispatch_best_effort(
                    NewNotification {
                        recipient_id: manager_id,
                        sender_id: None,
                        kind: kind::BIRTHDAY_REMINDER.to_string(),
                        title: "Team Member Birthday".to_string(),
                        message: format!("Today is {}'s birthday!", name),
                        data: Some(json!({ "employeeId": employee.id })),
                        priority: NotificationPriority::Low,
                    },
                    None,
                )
                .await;
            }

            self.dispatch_best_effort(
                NewNotification {
                    recipient_id: employee.id,
                    sender_id: None,
                    kind: kind::BIRTHDAY_REMINDER.to_string(),
                    title: "Happy Birthday!".to_string(),
                    message: format!("Happy birthday, {}! Have a wonderful day.", employee.first_name),
                    data: None,
                    priority: NotificationPriority::Low,
                },
                None,
            )
            .await;
        }

        Ok(celebrating.len())
    }

    /// Notifies Active employees hired on this month and day in an earlier year, and their managers.
    pub async fn send_anniversary_reminders(&self, today: NaiveDate) -> Result<usize, Error> {
        let employees = EmployeeRepository::new(self.db).list_active().await?;
        let mut celebrated = 0;

        for employee in employees {
            if !is_same_day_of_year(employee.hire_date, today) {
                continue;
            }
            let years = years_of_service(employee.hire_date, today);
            if years <= 0 {
                continue;
            }

            let name = format!("{} {}", employee.first_name, employee.last_name);
            let unit = if years == 1 { "year" } else { "years" };
            let data = json!({ "employeeId": employee.id, "yearsOfService": years });

            if let Some(manager_id) = employee.manager_id {
                self.dispatch_best_effort(
                    NewNotification {
                        recipient_id: manager_id,
                        sender_id: None,
                        kind: kind::ANNIVERSARY_REMINDER.to_string(),
                        title: "Work Anniversary".to_string(),
                        message: format!("{} celebrates {} {} with the company today.", name, years, unit),
                        data: Some(data.clone()),
                        priority: NotificationPriority::Low,
                    },
                    None,
                )
                .await;
            }

            self.dispatch_best_effort(
                NewNotification {
                    recipient_id: employee.id,
                    sender_id: None,
                    kind: kind::ANNIVERSARY_REMINDER.to_string(),
                    title: "Happy Work Anniversary!".to_string(),
                    message: format!("Congratulations on {} {} with the company!", years, unit),
                    data: Some(data),
                    priority: NotificationPriority::Low,
                },
                None,
            )
            .await;

            celebrated += 1;
        }

        Ok(celebrated)
    }

    /// Reminds employees whose approved leave begins the day after `today`.
    pub async fn send_upcoming_leave_reminders(&self, today: NaiveDate) -> Result<usize, Error> {
        let tomorrow = today + Duration::days(1);

        let applications = LeaveApplicationRepository::new(self.db)
            .list_approved_starting_on(tomorrow)
            .await?;
        if applications.is_empty() {
            return Ok(0);
        }

        let employee_ids: Vec<i32> = applications.iter().map(|a| a.employee_id).collect();
        let employees = EmployeeRepository::new(self.db).get_many(&employee_ids).await?;
        let leave_types = LeaveTypeRepository::new(self.db).list().await?;

        let mut reminded = 0;
        for application in &applications {
            let Some(employee) = employees.iter().find(|e| e.id == application.employee_id) else {
                continue;
            };
            let leave_type = leave_types
                .iter()
                .find(|t| t.id == application.leave_type_id)
                .map(|t| t.name.as_str())
                .unwrap_or("Leave");

            let summary = LeaveSummary {
                leave_type,
                start_date: application.start_date,
                end_date: application.end_date,
                total_days: application.total_days,
            };

            self.dispatch_best_effort(
                NewNotification {
                    recipient_id: employee.id,
                    sender_id: None,
                    kind: kind::LEAVE_REMINDER.to_string(),
                    title: "Upcoming Leave Reminder".to_string(),
                    message: format!(
                        "Your {} starts tomorrow ({} to {}).",
                        leave_type, application.start_date, application.end_date
                    ),
                    data: Some(json!({ "leaveApplicationId": application.id })),
                    priority: NotificationPriority::Medium,
                },
                Some(template::leave_reminder(&employee.email, &summary)),
            )
            .await;

            reminded += 1;
        }

        Ok(reminded)
    }

    /// Deletes read notifications created more than 30 days before `today`.
    pub async fn cleanup_read(&self, today: NaiveDate) -> Result<u64, Error> {
        let cutoff = start_of_day(today - Duration::days(RETENTION_DAYS));

        Ok(NotificationRepository::new(self.db)
            .delete_read_older_than(cutoff)
            .await?)
    }
}

#[cfg(test)]
mod tests {
    use crate::server::model::auth::AuthUser;

    pub(super) fn caller(id: i32, permissions: &[&str]) -> AuthUser {
        AuthUser {
            id,
            employee_code: format!("EMP{:03}", id),
            first_name: "Test".to_string(),
            last_name: "User".to_string(),
            email: format!("emp{:03}@example.com", id),
            department_id: 1,
            department_name: None,
            manager_id: None,
            role_name: "Employee".to_string(),
            permissions: permissions.iter().map(|p| p.to_string()).collect(),
        }
    }

    mod bulk_action {
        use entity::sea_orm_active_enums::NotificationPriority;
        use hrdesk_test_utils::prelude::*;

        use crate::{
            model::notification::{BulkAction, BulkActionDto},
            server::{
                error::Error, mail::Mailer, service::notification::NotificationService,
            },
        };

        use super::caller;

        /// Expect the whole request to be refused when one ID belongs to another employee
        #[tokio::test]
        async fn rejects_foreign_ids() -> Result<(), TestError> {
            let test = TestBuilder::new().with_hr_tables().build().await?;
            let (alice, _) = test.employee().insert_with_role("EMP001", "Employee", &[]).await?;
            let (bob, _) = test.employee().insert_with_role("EMP002", "Employee", &[]).await?;
            let own = test
                .notification()
                .insert_notification(alice.id, NotificationPriority::Medium, false)
                .await?;
            let foreign = test
                .notification()
                .insert_notification(bob.id, NotificationPriority::Medium, false)
                .await?;
            let mailer = Mailer::disabled();
            let service = NotificationService::new(&test.db, &mailer);

            let result = service
                .bulk_action(
                    &caller(alice.id, &[]),
                    &BulkActionDto {
                        notification_ids: vec![own.id, foreign.id],
                        action: BulkAction::Delete,
                    },
                )
                .await;

            assert!(matches!(result, Err(Error::Forbidden(_))));
            let bob_unread = service.unread_count(&caller(bob.id, &[])).await.unwrap();
            assert_eq!(bob_unread, 1);

            Ok(())
        }

        /// Expect duplicate IDs to be counted once
        #[tokio::test]
        async fn marks_own_notifications_read() -> Result<(), TestError> {
            let test = TestBuilder::new().with_hr_tables().build().await?;
            let (alice, _) = test.employee().insert_with_role("EMP001", "Employee", &[]).await?;
            let first = test
                .notification()
                .insert_notification(alice.id, NotificationPriority::High, false)
                .await?;
            let second = test
                .notification()
                .insert_notification(alice.id, NotificationPriority::Low, false)
                .await?;
            let mailer = Mailer::disabled();
            let service = NotificationService::new(&test.db, &mailer);
            let user = caller(alice.id, &[]);

            let result = service
                .bulk_action(
                    &user,
                    &BulkActionDto {
                        notification_ids: vec![first.id, second.id, first.id],
                        action: BulkAction::MarkRead,
                    },
                )
                .await
                .unwrap();

            assert_eq!(result.affected_count, 2);
            assert_eq!(service.unread_count(&user).await.unwrap(), 0);

            Ok(())
        }
    }

    mod mark_read {
        use entity::sea_orm_active_enums::NotificationPriority;
        use hrdesk_test_utils::prelude::*;

        use crate::server::{
            error::Error, mail::Mailer, service::notification::NotificationService,
        };

        use super::caller;

        /// Expect another employee's notification to be reported as missing
        #[tokio::test]
        async fn foreign_notification_is_not_found() -> Result<(), TestError> {
            let test = TestBuilder::new().with_hr_tables().build().await?;
            let (alice, _) = test.employee().insert_with_role("EMP001", "Employee", &[]).await?;
            let (bob, _) = test.employee().insert_with_role("EMP002", "Employee", &[]).await?;
            let foreign = test
                .notification()
                .insert_notification(bob.id, NotificationPriority::Medium, false)
                .await?;
            let mailer = Mailer::disabled();

            let result = NotificationService::new(&test.db, &mailer)
                .mark_read(&caller(alice.id, &[]), foreign.id)
                .await;

            assert!(matches!(result, Err(Error::NotFound(_))));

            Ok(())
        }
    }

    mod create {
        use entity::sea_orm_active_enums::NotificationPriority;
        use hrdesk_test_utils::prelude::*;

        use crate::{
            model::notification::CreateNotificationDto,
            server::{
                error::{auth::AuthError, Error},
                mail::Mailer,
                service::notification::NotificationService,
            },
        };

        use super::caller;

        fn request(recipient_id: i32) -> CreateNotificationDto {
            CreateNotificationDto {
                recipient_id,
                kind: "system_maintenance".to_string(),
                title: "Maintenance".to_string(),
                message: "Downtime tonight".to_string(),
                data: None,
                priority: NotificationPriority::Medium,
            }
        }

        /// Expect callers without manage_notifications to be refused
        #[tokio::test]
        async fn requires_permission() -> Result<(), TestError> {
            let test = TestBuilder::new().with_hr_tables().build().await?;
            let (alice, _) = test.employee().insert_with_role("EMP001", "Employee", &[]).await?;
            let mailer = Mailer::disabled();

            let result = NotificationService::new(&test.db, &mailer)
                .create(&caller(alice.id, &[]), request(alice.id))
                .await;

            assert!(matches!(result, Err(Error::AuthError(AuthError::Forbidden))));

            Ok(())
        }

        /// Expect an unknown recipient to be reported as missing
        #[tokio::test]
        async fn unknown_recipient_is_not_found() -> Result<(), TestError> {
            let test = TestBuilder::new().with_hr_tables().build().await?;
            let (admin, _) = test.employee().insert_with_role("ADM001", "Admin", &["all"]).await?;
            let mailer = Mailer::disabled();

            let result = NotificationService::new(&test.db, &mailer)
                .create(&caller(admin.id, &["all"]), request(999))
                .await;

            assert!(matches!(result, Err(Error::NotFound(_))));

            Ok(())
        }
    }

    mod send_anniversary_reminders {
        use chrono::NaiveDate;
        use hrdesk_test_utils::prelude::*;
        use sea_orm::EntityTrait;

        use crate::server::{mail::Mailer, service::notification::NotificationService};

        /// Expect employees hired on this day in an earlier year to be notified with their tenure
        #[tokio::test]
        async fn notifies_employee_and_manager() -> Result<(), TestError> {
            let test = TestBuilder::new().with_hr_tables().build().await?;
            let (manager, _) = test.employee().insert_with_role("MGR001", "Manager", &[]).await?;
            test.employee()
                .insert_with_role_and_manager("EMP001", "Employee", &[], Some(manager.id))
                .await?;
            let mailer = Mailer::disabled();

            // Fixture employees are hired on 2022-01-15
            let today = NaiveDate::from_ymd_opt(2025, 1, 15).unwrap();
            let celebrated = NotificationService::new(&test.db, &mailer)
                .send_anniversary_reminders(today)
                .await
                .unwrap();

            // The manager shares the hire date, so both are celebrated
            assert_eq!(celebrated, 2);
            let notifications = entity::prelude::Notification::find().all(&test.db).await?;
            assert_eq!(notifications.len(), 3);
            assert!(notifications
                .iter()
                .all(|n| n.data.as_ref().is_some_and(|d| d["yearsOfService"] == 3)));

            Ok(())
        }

        /// Expect nobody to be celebrated on the hire date itself
        #[tokio::test]
        async fn skips_first_day() -> Result<(), TestError> {
            let test = TestBuilder::new().with_hr_tables().build().await?;
            test.employee().insert_with_role("EMP001", "Employee", &[]).await?;
            let mailer = Mailer::disabled();

            let today = NaiveDate::from_ymd_opt(2022, 1, 15).unwrap();
            let celebrated = NotificationService::new(&test.db, &mailer)
                .send_anniversary_reminders(today)
                .await
                .unwrap();

            assert_eq!(celebrated, 0);

            Ok(())
        }
    }

    mod send_upcoming_leave_reminders {
        use chrono::NaiveDate;
        use entity::sea_orm_active_enums::LeaveStatus;
        use hrdesk_test_utils::prelude::*;
        use sea_orm::EntityTrait;

        use crate::server::{
            mail::Mailer,
            service::notification::{kind, NotificationService},
        };

        /// Expect only approved leave starting tomorrow to trigger a reminder
        #[tokio::test]
        async fn reminds_approved_leave_starting_tomorrow() -> Result<(), TestError> {
            let test = TestBuilder::new().with_hr_tables().build().await?;
            let (employee, _) = test.employee().insert_with_role("EMP001", "Employee", &[]).await?;
            let leave_type = test.leave().insert_leave_type("Annual Leave", 25).await?;
            let tomorrow = NaiveDate::from_ymd_opt(2025, 6, 10).unwrap();
            let later = NaiveDate::from_ymd_opt(2025, 6, 20).unwrap();
            test.leave()
                .insert_application(employee.id, leave_type.id, tomorrow, tomorrow, LeaveStatus::Approved)
                .await?;
            test.leave()
                .insert_application(employee.id, leave_type.id, tomorrow, tomorrow, LeaveStatus::Pending)
                .await?;
            test.leave()
                .insert_application(employee.id, leave_type.id, later, later, LeaveStatus::Approved)
                .await?;
            let mailer = Mailer::disabled();

            let today = NaiveDate::from_ymd_opt(2025, 6, 9).unwrap();
            let reminded = NotificationService::new(&test.db, &mailer)
                .send_upcoming_leave_reminders(today)
                .await
                .unwrap();

            assert_eq!(reminded, 1);
            let notifications = entity::prelude::Notification::find().all(&test.db).await?;
            assert_eq!(notifications.len(), 1);
            assert_eq!(notifications[0].kind, kind::LEAVE_REMINDER);

            Ok(())
        }
    }

    mod cleanup_read {
        use chrono::NaiveDate;
        use entity::sea_orm_active_enums::NotificationPriority;
        use hrdesk_test_utils::prelude::*;

        use crate::server::{mail::Mailer, service::notification::NotificationService};

        /// Expect only read notifications older than 30 days to be removed
        #[tokio::test]
        async fn removes_old_read_notifications() -> Result<(), TestError> {
            let test = TestBuilder::new().with_hr_tables().build().await?;
            let (employee, _) = test.employee().insert_with_role("EMP001", "Employee", &[]).await?;
            let old = NaiveDate::from_ymd_opt(2025, 1, 1)
                .unwrap()
                .and_hms_opt(12, 0, 0)
                .unwrap();
            let recent = NaiveDate::from_ymd_opt(2025, 3, 1)
                .unwrap()
                .and_hms_opt(12, 0, 0)
                .unwrap();
            let fixtures = test.notification();
            fixtures
                .insert_notification_at(employee.id, NotificationPriority::Low, true, old)
                .await?;
            fixtures
                .insert_notification_at(employee.id, NotificationPriority::Low, false, old)
                .await?;
            fixtures
                .insert_notification_at(employee.id, NotificationPriority::Low, true, recent)
                .await?;
            let mailer = Mailer::disabled();

            let today = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();
            let removed = NotificationService::new(&test.db, &mailer)
                .cleanup_read(today)
                .await
                .unwrap();

            assert_eq!(removed, 1);

            Ok(())
        }
    }
}
