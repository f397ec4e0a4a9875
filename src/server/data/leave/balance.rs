use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait,
    IntoActiveModel, QueryFilter, QueryOrder,
};

pub struct LeaveBalanceRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> LeaveBalanceRepository<'a, C> {
    /// Creates a new instance of [`LeaveBalanceRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Creates a balance for each leave type, granting its full yearly allowance
    ///
    /// # Arguments
    /// - `employee_id` - Employee receiving the balances
    /// - `year` - Calendar year of the balances
    /// - `leave_types` - Leave types to create balances for
    pub async fn create_for_types(
        &self,
        employee_id: i32,
        year: i32,
        leave_types: &[entity::leave_type::Model],
    ) -> Result<(), DbErr> {
        if leave_types.is_empty() {
            return Ok(());
        }

        let now = Utc::now().naive_utc();
        let balances = leave_types
            .iter()
            .map(|leave_type| entity::leave_balance::ActiveModel {
                employee_id: ActiveValue::Set(employee_id),
                leave_type_id: ActiveValue::Set(leave_type.id),
                year: ActiveValue::Set(year),
                total_days: ActiveValue::Set(leave_type.max_days_per_year),
                used_days: ActiveValue::Set(0),
                carry_forward_days: ActiveValue::Set(0),
                remaining_days: ActiveValue::Set(leave_type.max_days_per_year),
                updated_at: ActiveValue::Set(now),
                ..Default::default()
            });

        entity::prelude::LeaveBalance::insert_many(balances)
            .exec(self.db)
            .await?;

        Ok(())
    }

    pub async fn find(
        &self,
        employee_id: i32,
        leave_type_id: i32,
        year: i32,
    ) -> Result<Option<entity::leave_balance::Model>, DbErr> {
        entity::prelude::LeaveBalance::find()
            .filter(entity::leave_balance::Column::EmployeeId.eq(employee_id))
            .filter(entity::leave_balance::Column::LeaveTypeId.eq(leave_type_id))
            .filter(entity::leave_balance::Column::Year.eq(year))
            .one(self.db)
            .await
    }

    /// Balances of one employee for a year, with their leave type
    pub async fn list_for_employee(
        &self,
        employee_id: i32,
        year: i32,
    ) -> Result<Vec<(entity::leave_balance::Model, Option<entity::leave_type::Model>)>, DbErr>
    {
        entity::prelude::LeaveBalance::find()
            .filter(entity::leave_balance::Column::EmployeeId.eq(employee_id))
            .filter(entity::leave_balance::Column::Year.eq(year))
            .find_also_related(entity::leave_type::Entity)
            .order_by_asc(entity::leave_balance::Column::LeaveTypeId)
            .all(self.db)
            .await
    }

    /// Balances for a year, optionally restricted to some employees or one leave type
    pub async fn list_for_year(
        &self,
        year: i32,
        employee_ids: Option<&[i32]>,
        leave_type_id: Option<i32>,
    ) -> Result<Vec<(entity::leave_balance::Model, Option<entity::leave_type::Model>)>, DbErr>
    {
        let mut query = entity::prelude::LeaveBalance::find()
            .filter(entity::leave_balance::Column::Year.eq(year));

        if let Some(ids) = employee_ids {
            query = query.filter(entity::leave_balance::Column::EmployeeId.is_in(ids.to_vec()));
        }
        if let Some(leave_type_id) = leave_type_id {
            query = query.filter(entity::leave_balance::Column::LeaveTypeId.eq(leave_type_id));
        }

        query
            .find_also_related(entity::leave_type::Entity)
            .order_by_asc(entity::leave_balance::Column::EmployeeId)
            .order_by_asc(entity::leave_balance::Column::LeaveTypeId)
            .all(self.db)
            .await
    }

    /// Adds `days` to the used counter and recomputes the remaining days
    pub async fn add_used_days(
        &self,
        balance: entity::leave_balance::Model,
        days: i32,
    ) -> Result<entity::leave_balance::Model, DbErr> {
        let used_days = balance.used_days + days;
        let remaining_days = balance.total_days + balance.carry_forward_days - used_days;

        let mut balance_am = balance.into_active_model();
        balance_am.used_days = ActiveValue::Set(used_days);
        balance_am.remaining_days = ActiveValue::Set(remaining_days);
        balance_am.updated_at = ActiveValue::Set(Utc::now().naive_utc());

        balance_am.update(self.db).await
    }
}

#[cfg(test)]
mod tests {
    mod add_used_days {
        use hrdesk_test_utils::prelude::*;

        use crate::server::data::leave::balance::LeaveBalanceRepository;

        /// Expect used days to grow and remaining days to stay consistent
        #[tokio::test]
        async fn keeps_remaining_consistent() -> Result<(), TestError> {
            let test = TestBuilder::new().with_hr_tables().build().await?;
            let (employee, _) = test.employee().insert_with_role("EMP001", "Employee", &[]).await?;
            let leave_type = test.leave().insert_leave_type("Annual Leave", 25).await?;
            let balance = test
                .leave()
                .insert_balance(employee.id, leave_type.id, 2025, 25, 5)
                .await?;

            let repo = LeaveBalanceRepository::new(&test.db);
            let updated = repo.add_used_days(balance, 3).await?;

            assert_eq!(updated.used_days, 8);
            assert_eq!(updated.remaining_days, 17);

            Ok(())
        }
    }

    mod create_for_types {
        use hrdesk_test_utils::prelude::*;

        use crate::server::data::leave::balance::LeaveBalanceRepository;

        /// Expect one full balance per provided leave type
        #[tokio::test]
        async fn creates_full_balances() -> Result<(), TestError> {
            let test = TestBuilder::new().with_hr_tables().build().await?;
            let (employee, _) = test.employee().insert_with_role("EMP001", "Employee", &[]).await?;
            let annual = test.leave().insert_leave_type("Annual Leave", 25).await?;
            let sick = test.leave().insert_leave_type("Sick Leave", 10).await?;

            let repo = LeaveBalanceRepository::new(&test.db);
            repo.create_for_types(employee.id, 2025, &[annual.clone(), sick])
                .await?;
            let balances = repo.list_for_employee(employee.id, 2025).await?;

            assert_eq!(balances.len(), 2);
            let (annual_balance, annual_type) = &balances[0];
            assert_eq!(annual_balance.remaining_days, 25);
            assert_eq!(annual_type.as_ref().map(|t| t.id), Some(annual.id));

            Ok(())
        }
    }
}
