use chrono::{NaiveDate, Utc};
use entity::{sea_orm_active_enums::LeaveStatus, types::Attachments};
use sea_orm::{
    ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder,
};

use crate::model::leave::SubmitLeaveDto;

/// Filters applied when listing leave applications
#[derive(Clone, Debug, Default)]
pub struct LeaveApplicationFilter {
    pub employee_id: Option<i32>,
    pub status: Option<LeaveStatus>,
    pub leave_type_id: Option<i32>,
}

pub struct LeaveApplicationRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> LeaveApplicationRepository<'a, C> {
    /// Creates a new instance of [`LeaveApplicationRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Inserts a Pending application
    ///
    /// # Arguments
    /// - `employee_id` - Applicant
    /// - `request` - Validated request details
    /// - `total_days` - Inclusive day count of the request
    /// - `balance_year` - Year of the balance checked at submission, charged on approval
    pub async fn create(
        &self,
        employee_id: i32,
        request: &SubmitLeaveDto,
        total_days: i32,
        balance_year: i32,
    ) -> Result<entity::leave_application::Model, DbErr> {
        let now = Utc::now().naive_utc();

        entity::prelude::LeaveApplication::insert(entity::leave_application::ActiveModel {
            employee_id: ActiveValue::Set(employee_id),
            leave_type_id: ActiveValue::Set(request.leave_type_id),
            start_date: ActiveValue::Set(request.start_date),
            end_date: ActiveValue::Set(request.end_date),
            total_days: ActiveValue::Set(total_days),
            balance_year: ActiveValue::Set(balance_year),
            reason: ActiveValue::Set(request.reason.clone()),
            attachments: ActiveValue::Set(Attachments(
                request.attachments.clone().unwrap_or_default(),
            )),
            status: ActiveValue::Set(LeaveStatus::Pending),
            applied_at: ActiveValue::Set(now),
            approved_by: ActiveValue::Set(None),
            approved_at: ActiveValue::Set(None),
            rejection_reason: ActiveValue::Set(None),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        })
        .exec_with_returning(self.db)
        .await
    }

    pub async fn get(&self, id: i32) -> Result<Option<entity::leave_application::Model>, DbErr> {
        entity::prelude::LeaveApplication::find_by_id(id)
            .one(self.db)
            .await
    }

    /// Lists applications newest first
    ///
    /// # Returns
    /// - `Ok((applications, total))` - The requested page and the total matching row count
    pub async fn list(
        &self,
        filter: &LeaveApplicationFilter,
        page_index: u64,
        limit: u64,
    ) -> Result<(Vec<entity::leave_application::Model>, u64), DbErr> {
        let mut query = entity::prelude::LeaveApplication::find();

        if let Some(employee_id) = filter.employee_id {
            query = query.filter(entity::leave_application::Column::EmployeeId.eq(employee_id));
        }
        if let Some(status) = filter.status {
            query = query.filter(entity::leave_application::Column::Status.eq(status));
        }
        if let Some(leave_type_id) = filter.leave_type_id {
            query = query.filter(entity::leave_application::Column::LeaveTypeId.eq(leave_type_id));
        }

        let paginator = query
            .order_by_desc(entity::leave_application::Column::AppliedAt)
            .order_by_desc(entity::leave_application::Column::Id)
            .paginate(self.db, limit);

        let total = paginator.num_items().await?;
        let applications = paginator.fetch_page(page_index).await?;

        Ok((applications, total))
    }

    /// Records a decision on an application that is still Pending
    ///
    /// The status check and the update happen in a single statement, so a concurrent decision
    /// on the same application cannot both succeed.
    ///
    /// # Returns
    /// - `Ok(1)` - The application was Pending and has been updated
    /// - `Ok(0)` - No Pending application with that ID exists
    pub async fn decide(
        &self,
        id: i32,
        status: LeaveStatus,
        approver_id: i32,
        rejection_reason: Option<String>,
    ) -> Result<u64, DbErr> {
        let now = Utc::now().naive_utc();

        let result = entity::prelude::LeaveApplication::update_many()
            .set(entity::leave_application::ActiveModel {
                status: ActiveValue::Set(status),
                approved_by: ActiveValue::Set(Some(approver_id)),
                approved_at: ActiveValue::Set(Some(now)),
                rejection_reason: ActiveValue::Set(rejection_reason),
                updated_at: ActiveValue::Set(now),
                ..Default::default()
            })
            .filter(entity::leave_application::Column::Id.eq(id))
            .filter(entity::leave_application::Column::Status.eq(LeaveStatus::Pending))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }

    /// Approved applications whose leave begins on `date`
    pub async fn list_approved_starting_on(
        &self,
        date: NaiveDate,
    ) -> Result<Vec<entity::leave_application::Model>, DbErr> {
        entity::prelude::LeaveApplication::find()
            .filter(entity::leave_application::Column::Status.eq(LeaveStatus::Approved))
            .filter(entity::leave_application::Column::StartDate.eq(date))
            .all(self.db)
            .await
    }
}
