use chrono::{NaiveDate, Utc};
use entity::sea_orm_active_enums::{ProjectStatus, WorkLogStatus};
use sea_orm::{ActiveValue, EntityTrait};

use crate::{error::TestError, TestContext};

impl TestContext {
    pub fn work(&self) -> WorkFixtures<'_> {
        WorkFixtures { setup: self }
    }
}

pub struct WorkFixtures<'a> {
    setup: &'a TestContext,
}

impl<'a> WorkFixtures<'a> {
    pub async fn insert_project(
        &self,
        name: &str,
        status: ProjectStatus,
    ) -> Result<entity::project::Model, TestError> {
        Ok(
            entity::prelude::Project::insert(entity::project::ActiveModel {
                name: ActiveValue::Set(name.to_string()),
                description: ActiveValue::Set(None),
                start_date: ActiveValue::Set(
                    NaiveDate::from_ymd_opt(2024, 1, 1).unwrap_or_default(),
                ),
                end_date: ActiveValue::Set(None),
                status: ActiveValue::Set(status),
                manager_id: ActiveValue::Set(None),
                department_id: ActiveValue::Set(None),
                ..Default::default()
            })
            .exec_with_returning(&self.setup.db)
            .await?,
        )
    }

    pub async fn insert_work_log(
        &self,
        employee_id: i32,
        log_date: NaiveDate,
        hours_worked: f64,
    ) -> Result<entity::work_log::Model, TestError> {
        let now = Utc::now().naive_utc();

        Ok(
            entity::prelude::WorkLog::insert(entity::work_log::ActiveModel {
                employee_id: ActiveValue::Set(employee_id),
                project_id: ActiveValue::Set(None),
                log_date: ActiveValue::Set(log_date),
                hours_worked: ActiveValue::Set(hours_worked),
                task_description: ActiveValue::Set(Some("Fixture task".to_string())),
                status: ActiveValue::Set(WorkLogStatus::Completed),
                created_at: ActiveValue::Set(now),
                updated_at: ActiveValue::Set(now),
                ..Default::default()
            })
            .exec_with_returning(&self.setup.db)
            .await?,
        )
    }
}
