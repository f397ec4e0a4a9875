//! Employee lifecycle: hiring, updates, soft termination and lookups.

use chrono::Datelike;
use entity::sea_orm_active_enums::{AuditAction, EmployeeStatus};
use sea_orm::{ConnectionTrait, DatabaseConnection, TransactionTrait};

use crate::{
    model::employee::{
        CreateEmployeeDto, DepartmentDto, EmployeeDto, EmployeeListDto, EmployeeListQuery,
        RoleDto, UpdateEmployeeDto,
    },
    server::{
        data::{
            audit_log::AuditLogRepository,
            department::DepartmentRepository,
            employee::{EmployeeFilter, EmployeeRepository},
            leave::{balance::LeaveBalanceRepository, leave_type::LeaveTypeRepository},
            role::RoleRepository,
        },
        error::Error,
        util::{pagination::Page, password::hash_password, time::today},
    },
};

const EMPLOYEE_TABLE: &str = "employee";
const DEFAULT_PAGE_SIZE: u64 = 10;

/// Converts employee rows into DTOs, resolving department, role and manager names in bulk.
///
/// The password hash never leaves this function.
pub async fn employee_dtos<C: ConnectionTrait>(
    db: &C,
    employees: Vec<entity::employee::Model>,
) -> Result<Vec<EmployeeDto>, Error> {
    let department_ids: Vec<i32> = employees.iter().map(|e| e.department_id).collect();
    let role_ids: Vec<i32> = employees.iter().map(|e| e.role_id).collect();
    let manager_ids: Vec<i32> = employees.iter().filter_map(|e| e.manager_id).collect();

    let departments = DepartmentRepository::new(db).names_by_ids(&department_ids).await?;
    let roles = RoleRepository::new(db).names_by_ids(&role_ids).await?;
    let managers = EmployeeRepository::new(db).names_by_ids(&manager_ids).await?;

    Ok(employees
        .into_iter()
        .map(|e| EmployeeDto {
            department_name: departments.get(&e.department_id).cloned(),
            role_name: roles.get(&e.role_id).cloned(),
            manager_name: e.manager_id.and_then(|id| managers.get(&id).cloned()),
            id: e.id,
            employee_code: e.employee_code,
            first_name: e.first_name,
            last_name: e.last_name,
            email: e.email,
            phone: e.phone,
            date_of_birth: e.date_of_birth,
            hire_date: e.hire_date,
            department_id: e.department_id,
            role_id: e.role_id,
            manager_id: e.manager_id,
            salary: e.salary,
            address: e.address,
            emergency_contact: e.emergency_contact,
            status: e.status,
            last_login: e.last_login,
            created_at: e.created_at,
            updated_at: e.updated_at,
        })
        .collect())
}

async fn employee_dto<C: ConnectionTrait>(
    db: &C,
    employee: entity::employee::Model,
) -> Result<EmployeeDto, Error> {
    employee_dtos(db, vec![employee])
        .await?
        .pop()
        .ok_or_else(|| Error::InternalError("Employee conversion returned no rows".to_string()))
}

fn not_found() -> Error {
    Error::NotFound("Employee not found".to_string())
}

/// Service for managing employee records.
///
/// Every write is recorded in the audit log within the same transaction.
pub struct EmployeeService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> EmployeeService<'a> {
    /// Creates a new instance of [`EmployeeService`]
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Lists employees with search, filters, sorting and pagination.
    pub async fn list(&self, query: &EmployeeListQuery) -> Result<EmployeeListDto, Error> {
        let page = Page::new(query.page, query.limit, DEFAULT_PAGE_SIZE);
        let filter = EmployeeFilter {
            search: query.search.clone(),
            department_name: query.department.clone(),
            department_id: None,
            status: query.status,
        };

        let (employees, total) = EmployeeRepository::new(self.db)
            .list(
                &filter,
                query.sort_by.unwrap_or_default(),
                query.sort_order.unwrap_or_default(),
                page.index(),
                page.limit,
            )
            .await?;

        Ok(EmployeeListDto {
            employees: employee_dtos(self.db, employees).await?,
            pagination: page.to_dto(total),
        })
    }

    /// # Returns
    /// - `Ok(EmployeeDto)` - The employee with resolved names
    /// - `Err(Error::NotFound)` - No employee with that ID
    pub async fn get(&self, id: i32) -> Result<EmployeeDto, Error> {
        let employee = EmployeeRepository::new(self.db)
            .get(id)
            .await?
            .ok_or_else(not_found)?;

        employee_dto(self.db, employee).await
    }

    /// Hires an employee.
    ///
    /// In a single transaction this inserts the Active employee with a hashed password, seeds a
    /// leave balance for the current year for every leave type with a yearly allowance, and
    /// writes a CREATE audit entry.
    ///
    /// # Arguments
    /// - `actor_id` - Employee performing the hire, `None` for system bootstrap
    /// - `request` - Validated employee details
    ///
    /// # Returns
    /// - `Ok(EmployeeDto)` - The created employee
    /// - `Err(Error::DbErr)` - Duplicate code/email or unknown department/role, reported as 409
    pub async fn create(
        &self,
        actor_id: Option<i32>,
        request: &CreateEmployeeDto,
    ) -> Result<EmployeeDto, Error> {
        let password_hash = hash_password(&request.password)?;

        let txn = self.db.begin().await?;

        let employee = EmployeeRepository::new(&txn)
            .create(request, password_hash)
            .await?;

        let leave_types = LeaveTypeRepository::new(&txn).list_with_allowance().await?;
        LeaveBalanceRepository::new(&txn)
            .create_for_types(employee.id, today().year(), &leave_types)
            .await?;

        let dto = employee_dto(&txn, employee).await?;
        AuditLogRepository::new(&txn)
            .create(
                actor_id,
                AuditAction::Create,
                EMPLOYEE_TABLE,
                dto.id,
                None,
                Some(serde_json::to_value(&dto)?),
            )
            .await?;

        txn.commit().await?;

        tracing::info!(employee_id = dto.id, employee_code = %dto.employee_code, "employee created");

        Ok(dto)
    }

    /// Applies a partial update and records the before and after snapshots.
    pub async fn update(
        &self,
        actor_id: i32,
        id: i32,
        changes: &UpdateEmployeeDto,
    ) -> Result<EmployeeDto, Error> {
        let txn = self.db.begin().await?;
        let employee_repo = EmployeeRepository::new(&txn);

        let old = employee_repo.get(id).await?.ok_or_else(not_found)?;
        let old = employee_dto(&txn, old).await?;

        let updated = employee_repo.update(id, changes).await?.ok_or_else(not_found)?;
        let updated = employee_dto(&txn, updated).await?;

        AuditLogRepository::new(&txn)
            .create(
                Some(actor_id),
                AuditAction::Update,
                EMPLOYEE_TABLE,
                id,
                Some(serde_json::to_value(&old)?),
                Some(serde_json::to_value(&updated)?),
            )
            .await?;

        txn.commit().await?;

        Ok(updated)
    }

    /// Soft-deletes an employee by setting their status to Terminated. The row is kept.
    pub async fn terminate(&self, actor_id: i32, id: i32) -> Result<(), Error> {
        let txn = self.db.begin().await?;
        let employee_repo = EmployeeRepository::new(&txn);

        let old = employee_repo.get(id).await?.ok_or_else(not_found)?;
        let old = employee_dto(&txn, old).await?;

        employee_repo
            .set_status(id, EmployeeStatus::Terminated)
            .await?
            .ok_or_else(not_found)?;

        AuditLogRepository::new(&txn)
            .create(
                Some(actor_id),
                AuditAction::Delete,
                EMPLOYEE_TABLE,
                id,
                Some(serde_json::to_value(&old)?),
                None,
            )
            .await?;

        txn.commit().await?;

        tracing::info!(employee_id = id, "employee terminated");

        Ok(())
    }

    pub async fn departments(&self) -> Result<Vec<DepartmentDto>, Error> {
        let departments = DepartmentRepository::new(self.db).list().await?;

        Ok(departments
            .into_iter()
            .map(|d| DepartmentDto {
                id: d.id,
                name: d.name,
                description: d.description,
            })
            .collect())
    }

    /// Lists roles with the permissions each grants.
    pub async fn roles(&self) -> Result<Vec<RoleDto>, Error> {
        let role_repo = RoleRepository::new(self.db);
        let roles = role_repo.list().await?;
        let mut permissions = role_repo.all_permissions().await?;

        Ok(roles
            .into_iter()
            .map(|r| RoleDto {
                permissions: permissions.remove(&r.id).unwrap_or_default(),
                id: r.id,
                name: r.name,
                description: r.description,
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use crate::model::employee::CreateEmployeeDto;

    fn new_hire(code: &str, department_id: i32, role_id: i32) -> CreateEmployeeDto {
        CreateEmployeeDto {
            employee_code: code.to_string(),
            first_name: "Jane".to_string(),
            last_name: "Doe".to_string(),
            email: format!("{}@example.com", code.to_lowercase()),
            phone: None,
            date_of_birth: None,
            hire_date: NaiveDate::from_ymd_opt(2024, 1, 8).unwrap(),
            department_id,
            role_id,
            manager_id: None,
            salary: Some(60_000.0),
            address: None,
            emergency_contact: None,
            password: "password123".to_string(),
        }
    }

    mod create {
        use chrono::Datelike;
        use entity::sea_orm_active_enums::AuditAction;
        use hrdesk_test_utils::prelude::*;
        use sea_orm::EntityTrait;

        use crate::server::{
            data::leave::balance::LeaveBalanceRepository, service::employee::EmployeeService,
            util::time::today,
        };

        use super::new_hire;

        /// Expect balances for allowance-granting leave types and an audit row without the hash
        #[tokio::test]
        async fn seeds_balances_and_audits() -> Result<(), TestError> {
            let test = TestBuilder::new().with_hr_tables().build().await?;
            let department = test.org().insert_department("Engineering").await?;
            let role = test.org().insert_role("Employee", &[]).await?;
            let annual = test.leave().insert_leave_type("Annual Leave", 25).await?;
            test.leave().insert_leave_type("Unpaid Leave", 0).await?;

            let employee = EmployeeService::new(&test.db)
                .create(None, &new_hire("EMP100", department.id, role.id))
                .await
                .expect("create should succeed");

            let balances = LeaveBalanceRepository::new(&test.db)
                .list_for_employee(employee.id, today().year())
                .await?;
            assert_eq!(balances.len(), 1);
            assert_eq!(balances[0].0.leave_type_id, annual.id);
            assert_eq!(balances[0].0.remaining_days, 25);

            let audit = entity::prelude::AuditLog::find().all(&test.db).await?;
            assert_eq!(audit.len(), 1);
            assert_eq!(audit[0].action, AuditAction::Create);
            let snapshot = audit[0].new_values.clone().unwrap_or_default();
            assert_eq!(snapshot["employeeCode"], "EMP100");
            assert!(snapshot.get("passwordHash").is_none());

            Ok(())
        }

        /// Expect a duplicate employee code to fail and leave no partial rows behind
        #[tokio::test]
        async fn duplicate_code_rolls_back() -> Result<(), TestError> {
            let test = TestBuilder::new().with_hr_tables().build().await?;
            let department = test.org().insert_department("Engineering").await?;
            let role = test.org().insert_role("Employee", &[]).await?;
            test.leave().insert_leave_type("Annual Leave", 25).await?;
            let service = EmployeeService::new(&test.db);

            service
                .create(None, &new_hire("EMP100", department.id, role.id))
                .await
                .expect("first create should succeed");
            let mut duplicate = new_hire("EMP100", department.id, role.id);
            duplicate.email = "someone.else@example.com".to_string();
            let result = service.create(None, &duplicate).await;

            assert!(result.is_err());
            let balances = entity::prelude::LeaveBalance::find().all(&test.db).await?;
            assert_eq!(balances.len(), 1);

            Ok(())
        }
    }

    mod terminate {
        use entity::sea_orm_active_enums::{AuditAction, EmployeeStatus};
        use hrdesk_test_utils::prelude::*;
        use sea_orm::EntityTrait;

        use crate::server::{error::Error, service::employee::EmployeeService};

        /// Expect the row to remain with status Terminated and a DELETE audit entry
        #[tokio::test]
        async fn keeps_row_and_sets_terminated() -> Result<(), TestError> {
            let test = TestBuilder::new().with_hr_tables().build().await?;
            let (admin, _) = test.employee().insert_with_role("ADM001", "Admin", &["all"]).await?;
            let (employee, _) = test.employee().insert_with_role("EMP001", "Employee", &[]).await?;

            EmployeeService::new(&test.db)
                .terminate(admin.id, employee.id)
                .await
                .expect("terminate should succeed");

            let stored = entity::prelude::Employee::find_by_id(employee.id)
                .one(&test.db)
                .await?
                .expect("row should still exist");
            assert_eq!(stored.status, EmployeeStatus::Terminated);

            let audit = entity::prelude::AuditLog::find().all(&test.db).await?;
            assert_eq!(audit.len(), 1);
            assert_eq!(audit[0].action, AuditAction::Delete);
            assert_eq!(audit[0].user_id, Some(admin.id));

            Ok(())
        }

        /// Expect terminating an unknown employee to be a not found error
        #[tokio::test]
        async fn missing_employee_is_not_found() -> Result<(), TestError> {
            let test = TestBuilder::new().with_hr_tables().build().await?;
            let (admin, _) = test.employee().insert_with_role("ADM001", "Admin", &["all"]).await?;

            let result = EmployeeService::new(&test.db).terminate(admin.id, 999).await;

            assert!(matches!(result, Err(Error::NotFound(_))));

            Ok(())
        }
    }
}
