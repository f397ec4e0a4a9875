//! Job bodies run by the [`Scheduler`](super::Scheduler).
//!
//! Each job evaluates "today" when it fires and returns how many rows it touched.

use sea_orm::DatabaseConnection;

use crate::server::{
    error::Error, mail::Mailer, service::notification::NotificationService, util::time::today,
};

pub async fn birthday_reminders(db: DatabaseConnection, mailer: Mailer) -> Result<u64, Error> {
    let sent = NotificationService::new(&db, &mailer)
        .send_birthday_reminders(today())
        .await?;

    Ok(sent as u64)
}

pub async fn anniversary_reminders(db: DatabaseConnection, mailer: Mailer) -> Result<u64, Error> {
    let sent = NotificationService::new(&db, &mailer)
        .send_anniversary_reminders(today())
        .await?;

    Ok(sent as u64)
}

pub async fn upcoming_leave_reminders(
    db: DatabaseConnection,
    mailer: Mailer,
) -> Result<u64, Error> {
    let sent = NotificationService::new(&db, &mailer)
        .send_upcoming_leave_reminders(today())
        .await?;

    Ok(sent as u64)
}

pub async fn notification_cleanup(db: DatabaseConnection, mailer: Mailer) -> Result<u64, Error> {
    NotificationService::new(&db, &mailer)
        .cleanup_read(today())
        .await
}
