use chrono::{NaiveDate, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, DeleteResult, EntityTrait,
    IntoActiveModel, PaginatorTrait, QueryFilter, QueryOrder,
};
use rust_decimal::Decimal;

use crate::{
    model::work_log::{CreateWorkLogDto, UpdateWorkLogDto},
    server::util::decimal::{self, round_amount},
};

/// Filters applied when listing work logs
#[derive(Clone, Debug, Default)]
pub struct WorkLogFilter {
    pub employee_id: Option<i32>,
    /// Restricts results to these employees, e.g. the members of a department
    pub employee_ids: Option<Vec<i32>>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub project_id: Option<i32>,
}

type WorkLogWithProject = (entity::work_log::Model, Option<entity::project::Model>);

pub struct WorkLogRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> WorkLogRepository<'a, C> {
    /// Creates a new instance of [`WorkLogRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        employee_id: i32,
        entry: &CreateWorkLogDto,
    ) -> Result<entity::work_log::Model, DbErr> {
        let now = Utc::now().naive_utc();

        entity::prelude::WorkLog::insert(entity::work_log::ActiveModel {
            employee_id: ActiveValue::Set(employee_id),
            project_id: ActiveValue::Set(entry.project_id),
            log_date: ActiveValue::Set(entry.log_date),
            hours_worked: ActiveValue::Set(round_amount(entry.hours_worked)),
            task_description: ActiveValue::Set(entry.task_description.clone()),
            status: ActiveValue::Set(entry.status),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        })
        .exec_with_returning(self.db)
        .await
    }

    pub async fn get(&self, id: i32) -> Result<Option<entity::work_log::Model>, DbErr> {
        entity::prelude::WorkLog::find_by_id(id).one(self.db).await
    }

    pub async fn get_with_project(&self, id: i32) -> Result<Option<WorkLogWithProject>, DbErr> {
        entity::prelude::WorkLog::find_by_id(id)
            .find_also_related(entity::project::Entity)
            .one(self.db)
            .await
    }

    fn filtered(filter: &WorkLogFilter) -> sea_orm::Select<entity::work_log::Entity> {
        let mut query = entity::prelude::WorkLog::find();

        if let Some(employee_id) = filter.employee_id {
            query = query.filter(entity::work_log::Column::EmployeeId.eq(employee_id));
        }
        if let Some(ids) = &filter.employee_ids {
            query = query.filter(entity::work_log::Column::EmployeeId.is_in(ids.clone()));
        }
        if let Some(start_date) = filter.start_date {
            query = query.filter(entity::work_log::Column::LogDate.gte(start_date));
        }
        if let Some(end_date) = filter.end_date {
            query = query.filter(entity::work_log::Column::LogDate.lte(end_date));
        }
        if let Some(project_id) = filter.project_id {
            query = query.filter(entity::work_log::Column::ProjectId.eq(project_id));
        }

        query
            .order_by_desc(entity::work_log::Column::LogDate)
            .order_by_desc(entity::work_log::Column::CreatedAt)
            .order_by_desc(entity::work_log::Column::Id)
    }

    /// Lists work logs with their project, newest first
    ///
    /// # Returns
    /// - `Ok((work_logs, total))` - The requested page and the total matching row count
    pub async fn list(
        &self,
        filter: &WorkLogFilter,
        page_index: u64,
        limit: u64,
    ) -> Result<(Vec<WorkLogWithProject>, u64), DbErr> {
        let paginator = Self::filtered(filter)
            .find_also_related(entity::project::Entity)
            .paginate(self.db, limit);

        let total = paginator.num_items().await?;
        let work_logs = paginator.fetch_page(page_index).await?;

        Ok((work_logs, total))
    }

    /// All work logs matching `filter`, newest first
    pub async fn list_all(&self, filter: &WorkLogFilter) -> Result<Vec<WorkLogWithProject>, DbErr> {
        Self::filtered(filter)
            .find_also_related(entity::project::Entity)
            .all(self.db)
            .await
    }

    /// Total hours an employee has logged on `log_date`
    ///
    /// # Arguments
    /// - `employee_id` - Employee whose hours are summed
    /// - `log_date` - Day to sum
    /// - `exclude_id` - Work log left out of the sum, used when that entry is being replaced
    pub async fn hours_on(
        &self,
        employee_id: i32,
        log_date: NaiveDate,
        exclude_id: Option<i32>,
    ) -> Result<Decimal, DbErr> {
        let mut query = entity::prelude::WorkLog::find()
            .filter(entity::work_log::Column::EmployeeId.eq(employee_id))
            .filter(entity::work_log::Column::LogDate.eq(log_date));

        if let Some(id) = exclude_id {
            query = query.filter(entity::work_log::Column::Id.ne(id));
        }

        let entries = query.all(self.db).await?;

        Ok(decimal::sum(entries.iter().map(|e| e.hours_worked)))
    }

    /// Applies a partial update. Absent fields are left unchanged.
    pub async fn update(
        &self,
        work_log: entity::work_log::Model,
        changes: &UpdateWorkLogDto,
    ) -> Result<entity::work_log::Model, DbErr> {
        let mut work_log_am = work_log.into_active_model();

        if let Some(project_id) = changes.project_id {
            work_log_am.project_id = ActiveValue::Set(Some(project_id));
        }
        if let Some(log_date) = changes.log_date {
            work_log_am.log_date = ActiveValue::Set(log_date);
        }
        if let Some(hours_worked) = changes.hours_worked {
            work_log_am.hours_worked = ActiveValue::Set(round_amount(hours_worked));
        }
        if let Some(task_description) = &changes.task_description {
            work_log_am.task_description = ActiveValue::Set(Some(task_description.clone()));
        }
        if let Some(status) = changes.status {
            work_log_am.status = ActiveValue::Set(status);
        }
        work_log_am.updated_at = ActiveValue::Set(Utc::now().naive_utc());

        work_log_am.update(self.db).await
    }

    /// Deletes a work log
    ///
    /// Returns OK regardless of the work log existing, to confirm the deletion result
    /// check the [`DeleteResult::rows_affected`] field.
    pub async fn delete(&self, id: i32) -> Result<DeleteResult, DbErr> {
        entity::prelude::WorkLog::delete_by_id(id).exec(self.db).await
    }
}
