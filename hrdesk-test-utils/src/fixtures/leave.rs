use chrono::{NaiveDate, Utc};
use entity::{sea_orm_active_enums::LeaveStatus, types::Attachments};
use sea_orm::{ActiveValue, EntityTrait};

use crate::{error::TestError, TestContext};

impl TestContext {
    pub fn leave(&self) -> LeaveFixtures<'_> {
        LeaveFixtures { setup: self }
    }
}

pub struct LeaveFixtures<'a> {
    setup: &'a TestContext,
}

impl<'a> LeaveFixtures<'a> {
    pub async fn insert_leave_type(
        &self,
        name: &str,
        max_days_per_year: i32,
    ) -> Result<entity::leave_type::Model, TestError> {
        Ok(
            entity::prelude::LeaveType::insert(entity::leave_type::ActiveModel {
                name: ActiveValue::Set(name.to_string()),
                description: ActiveValue::Set(None),
                max_days_per_year: ActiveValue::Set(max_days_per_year),
                carry_forward: ActiveValue::Set(false),
                requires_approval: ActiveValue::Set(true),
                ..Default::default()
            })
            .exec_with_returning(&self.setup.db)
            .await?,
        )
    }

    /// Insert a balance row with `remaining_days = total_days - used_days`.
    pub async fn insert_balance(
        &self,
        employee_id: i32,
        leave_type_id: i32,
        year: i32,
        total_days: i32,
        used_days: i32,
    ) -> Result<entity::leave_balance::Model, TestError> {
        Ok(
            entity::prelude::LeaveBalance::insert(entity::leave_balance::ActiveModel {
                employee_id: ActiveValue::Set(employee_id),
                leave_type_id: ActiveValue::Set(leave_type_id),
                year: ActiveValue::Set(year),
                total_days: ActiveValue::Set(total_days),
                used_days: ActiveValue::Set(used_days),
                carry_forward_days: ActiveValue::Set(0),
                remaining_days: ActiveValue::Set(total_days - used_days),
                updated_at: ActiveValue::Set(Utc::now().naive_utc()),
                ..Default::default()
            })
            .exec_with_returning(&self.setup.db)
            .await?,
        )
    }

    /// Insert a leave application with the inclusive day count computed from the dates.
    pub async fn insert_application(
        &self,
        employee_id: i32,
        leave_type_id: i32,
        start_date: NaiveDate,
        end_date: NaiveDate,
        status: LeaveStatus,
    ) -> Result<entity::leave_application::Model, TestError> {
        let now = Utc::now().naive_utc();
        let total_days = (end_date - start_date).num_days() as i32 + 1;

        Ok(
            entity::prelude::LeaveApplication::insert(entity::leave_application::ActiveModel {
                employee_id: ActiveValue::Set(employee_id),
                leave_type_id: ActiveValue::Set(leave_type_id),
                start_date: ActiveValue::Set(start_date),
                end_date: ActiveValue::Set(end_date),
                total_days: ActiveValue::Set(total_days),
                balance_year: ActiveValue::Set(chrono::Datelike::year(&now)),
                reason: ActiveValue::Set(Some("Fixture leave".to_string())),
                attachments: ActiveValue::Set(Attachments::default()),
                status: ActiveValue::Set(status),
                applied_at: ActiveValue::Set(now),
                approved_by: ActiveValue::Set(None),
                approved_at: ActiveValue::Set(None),
                rejection_reason: ActiveValue::Set(None),
                updated_at: ActiveValue::Set(now),
                ..Default::default()
            })
            .exec_with_returning(&self.setup.db)
            .await?,
        )
    }
}
