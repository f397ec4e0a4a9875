//! Daily work logs and the project catalog they reference.

use rust_decimal::Decimal;
use sea_orm::DatabaseConnection;

use crate::{
    model::work_log::{
        CreateWorkLogDto, ProjectDto, UpdateWorkLogDto, WorkLogDto, WorkLogListDto, WorkLogQuery,
    },
    server::{
        data::{
            project::ProjectRepository,
            work_log::{WorkLogFilter, WorkLogRepository},
        },
        error::{work_log::WorkLogError, Error},
        model::auth::AuthUser,
        util::{decimal::to_decimal, pagination::Page},
    },
};

/// Most hours an employee may log on a single day.
pub const MAX_DAILY_HOURS: u32 = 24;
const DEFAULT_PAGE_SIZE: u64 = 10;

/// Accepts `requested` more hours on a day that already has `logged` hours.
///
/// Exactly [`MAX_DAILY_HOURS`] is allowed.
pub fn check_daily_hours(logged: Decimal, requested: Decimal) -> Result<(), WorkLogError> {
    if logged + requested > Decimal::from(MAX_DAILY_HOURS) {
        return Err(WorkLogError::DailyHoursExceeded {
            logged: logged.normalize(),
            requested: requested.normalize(),
        });
    }

    Ok(())
}

fn not_found() -> Error {
    Error::NotFound("Work log not found".to_string())
}

fn work_log_dto(log: entity::work_log::Model, project: Option<entity::project::Model>) -> WorkLogDto {
    WorkLogDto {
        id: log.id,
        employee_id: log.employee_id,
        project_id: log.project_id,
        project_name: project.map(|p| p.name),
        log_date: log.log_date,
        hours_worked: log.hours_worked,
        task_description: log.task_description,
        status: log.status,
        created_at: log.created_at,
        updated_at: log.updated_at,
    }
}

impl From<entity::project::Model> for ProjectDto {
    fn from(p: entity::project::Model) -> Self {
        Self {
            id: p.id,
            name: p.name,
            description: p.description,
            start_date: p.start_date,
            end_date: p.end_date,
            status: p.status,
            manager_id: p.manager_id,
            department_id: p.department_id,
        }
    }
}

pub struct WorkLogService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> WorkLogService<'a> {
    /// Creates a new instance of [`WorkLogService`]
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn list(&self, user: &AuthUser, query: &WorkLogQuery) -> Result<WorkLogListDto, Error> {
        let page = Page::new(query.page, query.limit, DEFAULT_PAGE_SIZE);
        let filter = WorkLogFilter {
            employee_id: user.scope_employee(query.employee_id),
            start_date: query.start_date,
            end_date: query.end_date,
            project_id: query.project_id,
            ..Default::default()
        };

        let (logs, total) = WorkLogRepository::new(self.db)
            .list(&filter, page.index(), page.limit)
            .await?;

        Ok(WorkLogListDto {
            work_logs: logs
                .into_iter()
                .map(|(log, project)| work_log_dto(log, project))
                .collect(),
            pagination: page.to_dto(total),
        })
    }

    /// Logs hours for the caller.
    ///
    /// # Returns
    /// - `Ok(WorkLogDto)` - The stored entry
    /// - `Err(WorkLogError::DailyHoursExceeded)` - The day would exceed 24 hours
    pub async fn create(&self, user: &AuthUser, entry: &CreateWorkLogDto) -> Result<WorkLogDto, Error> {
        let repo = WorkLogRepository::new(self.db);

        let logged = repo.hours_on(user.id, entry.log_date, None).await?;
        check_daily_hours(logged, to_decimal(entry.hours_worked))?;

        let created = repo.create(user.id, entry).await?;

        self.load(created.id).await
    }

    /// Partially updates an entry owned by the caller, or any entry for managers and HR.
    ///
    /// The day total is re-checked without the entry being replaced.
    pub async fn update(
        &self,
        user: &AuthUser,
        id: i32,
        changes: &UpdateWorkLogDto,
    ) -> Result<WorkLogDto, Error> {
        let repo = WorkLogRepository::new(self.db);
        let log = repo.get(id).await?.ok_or_else(not_found)?;
        Self::check_access(user, &log)?;

        if changes.hours_worked.is_some() || changes.log_date.is_some() {
            let log_date = changes.log_date.unwrap_or(log.log_date);
            let hours = changes.hours_worked.unwrap_or(log.hours_worked);

            let logged = repo.hours_on(log.employee_id, log_date, Some(log.id)).await?;
            check_daily_hours(logged, to_decimal(hours))?;
        }

        let updated = repo.update(log, changes).await?;

        self.load(updated.id).await
    }

    pub async fn delete(&self, user: &AuthUser, id: i32) -> Result<(), Error> {
        let repo = WorkLogRepository::new(self.db);
        let log = repo.get(id).await?.ok_or_else(not_found)?;
        Self::check_access(user, &log)?;

        repo.delete(id).await?;

        Ok(())
    }

    pub async fn projects(&self) -> Result<Vec<ProjectDto>, Error> {
        let projects = ProjectRepository::new(self.db).list_active().await?;

        Ok(projects.into_iter().map(ProjectDto::from).collect())
    }

    fn check_access(user: &AuthUser, log: &entity::work_log::Model) -> Result<(), Error> {
        if log.employee_id != user.id && !user.is_manager_or_hr() {
            return Err(Error::Forbidden("Access denied".to_string()));
        }

        Ok(())
    }

    async fn load(&self, id: i32) -> Result<WorkLogDto, Error> {
        let (log, project) = WorkLogRepository::new(self.db)
            .get_with_project(id)
            .await?
            .ok_or_else(not_found)?;

        Ok(work_log_dto(log, project))
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use crate::server::{model::auth::AuthUser, util::decimal::to_decimal};

    use super::check_daily_hours;

    pub(super) fn caller(employee: &entity::employee::Model, role_name: &str) -> AuthUser {
        AuthUser {
            id: employee.id,
            employee_code: employee.employee_code.clone(),
            first_name: employee.first_name.clone(),
            last_name: employee.last_name.clone(),
            email: employee.email.clone(),
            department_id: employee.department_id,
            department_name: None,
            manager_id: employee.manager_id,
            role_name: role_name.to_string(),
            permissions: Vec::new(),
        }
    }

    /// Expect exactly 24 hours to be allowed and anything above to be refused
    #[test]
    fn daily_hours_limit() {
        assert!(check_daily_hours(Decimal::from(16), Decimal::from(8)).is_ok());
        assert!(check_daily_hours(Decimal::from(20), Decimal::from(5)).is_err());
    }

    /// Expect a day of tenths totalling exactly 24 hours to be accepted
    #[test]
    fn accepts_exact_day_of_tenths() {
        let logged = to_decimal(0.1) + to_decimal(16.1);

        assert!(check_daily_hours(logged, to_decimal(7.8)).is_ok());
        assert!(check_daily_hours(logged, to_decimal(7.81)).is_err());
    }

    /// Expect the refusal message to show the amounts without float noise
    #[test]
    fn message_shows_exact_amounts() {
        let logged = to_decimal(0.1) + to_decimal(16.1);
        let err = check_daily_hours(logged, to_decimal(8.0)).unwrap_err();

        assert_eq!(
            err.to_string(),
            "Total hours for the day cannot exceed 24. Current: 16.2, Adding: 8"
        );
    }

    mod create {
        use chrono::NaiveDate;
        use entity::sea_orm_active_enums::WorkLogStatus;
        use hrdesk_test_utils::prelude::*;

        use crate::{
            model::work_log::CreateWorkLogDto,
            server::{
                error::{work_log::WorkLogError, Error},
                service::work_log::WorkLogService,
            },
        };

        use super::caller;

        /// Expect a fifth hour on a day with 20 logged hours to be refused
        #[tokio::test]
        async fn rejects_day_over_24_hours() -> Result<(), TestError> {
            let test = TestBuilder::new().with_hr_tables().build().await?;
            let (employee, _) = test.employee().insert_with_role("EMP001", "Employee", &[]).await?;
            let day = NaiveDate::from_ymd_opt(2025, 3, 3).unwrap();
            test.work().insert_work_log(employee.id, day, 20.0).await?;

            let result = WorkLogService::new(&test.db)
                .create(
                    &caller(&employee, "Employee"),
                    &CreateWorkLogDto {
                        project_id: None,
                        log_date: day,
                        hours_worked: 5.0,
                        task_description: None,
                        status: WorkLogStatus::Completed,
                    },
                )
                .await;

            assert!(matches!(
                result,
                Err(Error::WorkLogError(WorkLogError::DailyHoursExceeded { .. }))
            ));

            Ok(())
        }

        /// Expect 7.8 hours on a day with 0.1 and 16.1 logged to fill the day exactly
        #[tokio::test]
        async fn accepts_day_totalling_exactly_24_hours() -> Result<(), TestError> {
            let test = TestBuilder::new().with_hr_tables().build().await?;
            let (employee, _) = test.employee().insert_with_role("EMP001", "Employee", &[]).await?;
            let day = NaiveDate::from_ymd_opt(2025, 3, 3).unwrap();
            test.work().insert_work_log(employee.id, day, 0.1).await?;
            test.work().insert_work_log(employee.id, day, 16.1).await?;

            let created = WorkLogService::new(&test.db)
                .create(
                    &caller(&employee, "Employee"),
                    &CreateWorkLogDto {
                        project_id: None,
                        log_date: day,
                        hours_worked: 7.8,
                        task_description: None,
                        status: WorkLogStatus::Completed,
                    },
                )
                .await
                .unwrap();

            assert_eq!(created.hours_worked, 7.8);

            Ok(())
        }
    }

    mod update {
        use chrono::NaiveDate;
        use hrdesk_test_utils::prelude::*;

        use crate::{
            model::work_log::UpdateWorkLogDto,
            server::{error::Error, service::work_log::WorkLogService},
        };

        use super::caller;

        /// Expect the entry being edited to be excluded from the day total
        #[tokio::test]
        async fn revalidates_without_own_hours() -> Result<(), TestError> {
            let test = TestBuilder::new().with_hr_tables().build().await?;
            let (employee, _) = test.employee().insert_with_role("EMP001", "Employee", &[]).await?;
            let day = NaiveDate::from_ymd_opt(2025, 3, 3).unwrap();
            let entry = test.work().insert_work_log(employee.id, day, 8.0).await?;
            test.work().insert_work_log(employee.id, day, 10.0).await?;
            let service = WorkLogService::new(&test.db);
            let user = caller(&employee, "Employee");

            let updated = service
                .update(
                    &user,
                    entry.id,
                    &UpdateWorkLogDto {
                        hours_worked: Some(14.0),
                        ..Default::default()
                    },
                )
                .await
                .unwrap();
            let refused = service
                .update(
                    &user,
                    entry.id,
                    &UpdateWorkLogDto {
                        hours_worked: Some(14.5),
                        ..Default::default()
                    },
                )
                .await;

            assert_eq!(updated.hours_worked, 14.0);
            assert!(matches!(refused, Err(Error::WorkLogError(_))));

            Ok(())
        }

        /// Expect another employee's entry to be refused
        #[tokio::test]
        async fn refuses_other_employees_entry() -> Result<(), TestError> {
            let test = TestBuilder::new().with_hr_tables().build().await?;
            let (alice, _) = test.employee().insert_with_role("EMP001", "Employee", &[]).await?;
            let (bob, _) = test.employee().insert_with_role("EMP002", "Employee", &[]).await?;
            let day = NaiveDate::from_ymd_opt(2025, 3, 3).unwrap();
            let entry = test.work().insert_work_log(alice.id, day, 8.0).await?;

            let result = WorkLogService::new(&test.db)
                .delete(&caller(&bob, "Employee"), entry.id)
                .await;

            assert!(matches!(result, Err(Error::Forbidden(_))));

            Ok(())
        }
    }
}
