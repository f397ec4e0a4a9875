//! Scheduler for the daily reminder and cleanup jobs.
//!
//! A cron-based job scheduler sends birthday, work anniversary and upcoming leave reminders
//! every morning and prunes old read notifications at night. A failing run is logged and the
//! job fires again on its next tick.

use std::sync::Arc;

use sea_orm::DatabaseConnection;
use tokio_cron_scheduler::{Job, JobScheduler};

use crate::server::{error::Error, mail::Mailer};

pub mod config;
pub mod jobs;

use self::config::{cleanup, reminder};

/// Job scheduler for HRDesk's periodic background tasks.
pub struct Scheduler {
    db: DatabaseConnection,
    mailer: Mailer,
    sched: JobScheduler,
}

impl Scheduler {
    /// Creates a new instance of [`Scheduler`].
    ///
    /// # Arguments
    /// - `db` - Database connection handed to every job
    /// - `mailer` - Mailer for the reminder emails
    ///
    /// # Returns
    /// - `Ok(Scheduler)` - Successfully created scheduler instance
    /// - `Err(Error)` - Failed to initialize the underlying job scheduler
    pub async fn new(db: DatabaseConnection, mailer: Mailer) -> Result<Self, Error> {
        let sched = JobScheduler::new().await?;
        Ok(Self { db, mailer, sched })
    }

    /// Registers all scheduled jobs and starts the scheduler.
    ///
    /// The following jobs are registered:
    /// - Birthday reminders
    /// - Work anniversary reminders
    /// - Upcoming leave reminders
    /// - Read notification cleanup
    ///
    /// # Returns
    /// - `Ok(())` - All jobs successfully registered and scheduler started
    /// - `Err(Error)` - Failed to register a job or start the scheduler
    pub async fn start(mut self) -> Result<(), Error> {
        self.schedule_job(reminder::BIRTHDAY_CRON, "birthday reminder", jobs::birthday_reminders)
            .await?;

        self.schedule_job(
            reminder::ANNIVERSARY_CRON,
            "work anniversary",
            jobs::anniversary_reminders,
        )
        .await?;

        self.schedule_job(
            reminder::UPCOMING_LEAVE_CRON,
            "upcoming leave reminder",
            jobs::upcoming_leave_reminders,
        )
        .await?;

        self.schedule_job(
            cleanup::NOTIFICATION_CLEANUP_CRON,
            "notification cleanup",
            jobs::notification_cleanup,
        )
        .await?;

        self.sched.start().await?;

        Ok(())
    }

    /// Schedules a recurring job with the specified cron expression.
    ///
    /// On execution, the job logs how many rows it handled (on success) or the error.
    ///
    /// # Arguments
    /// - `cron` - Cron expression defining when the job should run (e.g., "0 0 8 * * *" for 08:00 daily)
    /// - `name` - Human-readable name for the job (used in log messages)
    /// - `function` - Async job body returning the number of rows it handled
    ///
    /// # Returns
    /// - `Ok(())` - Job successfully registered with the scheduler
    /// - `Err(Error)` - Failed to create or add the job (invalid cron expression or scheduler error)
    pub async fn schedule_job<F, Fut>(
        &mut self,
        cron: &str,
        name: &str,
        function: F,
    ) -> Result<(), Error>
    where
        F: Fn(DatabaseConnection, Mailer) -> Fut + Send + Sync + 'static,
        Fut: std::future::Future<Output = Result<u64, Error>> + Send + 'static,
    {
        let db = self.db.clone();
        let mailer = self.mailer.clone();
        let name = name.to_string();
        let function = Arc::new(function);

        self.sched
            .add(Job::new_async(cron, move |_, _| {
                let db = db.clone();
                let mailer = mailer.clone();
                let name = name.clone();
                let function = Arc::clone(&function);

                Box::pin(async move {
                    match function(db, mailer).await {
                        Ok(count) => tracing::info!("Completed {} job, {} row(s) handled", name, count),
                        Err(e) => tracing::error!("Error running {} job: {:?}", name, e),
                    }
                })
            })?)
            .await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use tokio_cron_scheduler::Job;

    use super::config::{cleanup, reminder};

    /// Expect every job expression to be accepted as a six-field cron schedule
    #[tokio::test]
    async fn cron_expressions_parse() {
        for expression in [
            reminder::BIRTHDAY_CRON,
            reminder::ANNIVERSARY_CRON,
            reminder::UPCOMING_LEAVE_CRON,
            cleanup::NOTIFICATION_CLEANUP_CRON,
        ] {
            let job = Job::new_async(expression, |_, _| Box::pin(async {}));

            assert!(job.is_ok(), "{} failed to parse", expression);
        }
    }
}
