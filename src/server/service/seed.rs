//! Reference data for an empty database and the bootstrap administrator.

use sea_orm::{DatabaseConnection, TransactionTrait};

use crate::{
    model::employee::CreateEmployeeDto,
    server::{
        config::AdminBootstrap,
        data::{
            department::DepartmentRepository,
            employee::EmployeeRepository,
            leave::leave_type::{LeaveTypeRepository, NewLeaveType},
            role::RoleRepository,
        },
        error::Error,
        model::permission,
        service::employee::EmployeeService,
        util::time::today,
    },
};

const DEPARTMENTS: [(&str, &str); 6] = [
    ("Engineering", "Software development and infrastructure"),
    ("Human Resources", "People operations and recruiting"),
    ("Marketing", "Brand, campaigns and communications"),
    ("Finance", "Accounting, payroll and budgeting"),
    ("Operations", "Facilities and internal operations"),
    ("Sales", "Customer acquisition and accounts"),
];

const ROLES: [(&str, &str, &[&str]); 4] = [
    ("Admin", "Full system access", &[permission::ALL]),
    (
        "Manager",
        "Manages a team",
        &[permission::MANAGE_TEAM, permission::APPROVE_LEAVE, permission::VIEW_REPORTS],
    ),
    (
        "HR Manager",
        "Manages employees and leave",
        &[
            permission::MANAGE_EMPLOYEES,
            permission::MANAGE_LEAVE,
            permission::VIEW_ALL_REPORTS,
        ],
    ),
    (
        "Employee",
        "Standard employee access",
        &[permission::VIEW_PROFILE, permission::REQUEST_LEAVE, permission::LOG_HOURS],
    ),
];

const LEAVE_TYPES: [NewLeaveType<'static>; 7] = [
    NewLeaveType {
        name: "Annual Leave",
        description: "Yearly paid vacation",
        max_days_per_year: 25,
        carry_forward: true,
        requires_approval: true,
    },
    NewLeaveType {
        name: "Sick Leave",
        description: "Illness or medical appointments",
        max_days_per_year: 10,
        carry_forward: false,
        requires_approval: false,
    },
    NewLeaveType {
        name: "Personal Leave",
        description: "Personal matters",
        max_days_per_year: 5,
        carry_forward: false,
        requires_approval: true,
    },
    NewLeaveType {
        name: "Maternity Leave",
        description: "Leave for birth or adoption",
        max_days_per_year: 90,
        carry_forward: false,
        requires_approval: true,
    },
    NewLeaveType {
        name: "Paternity Leave",
        description: "Leave for new fathers",
        max_days_per_year: 14,
        carry_forward: false,
        requires_approval: true,
    },
    NewLeaveType {
        name: "Emergency Leave",
        description: "Urgent unforeseen situations",
        max_days_per_year: 3,
        carry_forward: false,
        requires_approval: true,
    },
    NewLeaveType {
        name: "Bereavement Leave",
        description: "Loss of a family member",
        max_days_per_year: 5,
        carry_forward: false,
        requires_approval: true,
    },
];

pub struct SeedService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> SeedService<'a> {
    /// Creates a new instance of [`SeedService`]
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Inserts departments, roles and leave types when all three tables are empty.
    ///
    /// # Returns
    /// - `Ok(true)` - The catalog was inserted
    /// - `Ok(false)` - Some reference data already existed and nothing was written
    pub async fn seed_reference_data(&self) -> Result<bool, Error> {
        let existing = DepartmentRepository::new(self.db).count().await?
            + RoleRepository::new(self.db).count().await?
            + LeaveTypeRepository::new(self.db).count().await?;
        if existing > 0 {
            return Ok(false);
        }

        let txn = self.db.begin().await?;

        let department_repo = DepartmentRepository::new(&txn);
        for (name, description) in DEPARTMENTS {
            department_repo.create(name, Some(description)).await?;
        }

        let role_repo = RoleRepository::new(&txn);
        for (name, description, permissions) in ROLES {
            role_repo.create(name, Some(description), permissions).await?;
        }

        let leave_type_repo = LeaveTypeRepository::new(&txn);
        for leave_type in &LEAVE_TYPES {
            leave_type_repo.create(leave_type).await?;
        }

        txn.commit().await?;

        tracing::info!(
            departments = DEPARTMENTS.len(),
            roles = ROLES.len(),
            leave_types = LEAVE_TYPES.len(),
            "seeded reference data"
        );

        Ok(true)
    }

    /// Creates the Admin employee for `admin.email` unless an employee already uses it.
    ///
    /// # Returns
    /// - `Ok(true)` - The administrator was created
    /// - `Ok(false)` - The email is already taken
    /// - `Err(Error::InternalError)` - No Admin role or department exists to attach it to
    pub async fn bootstrap_admin(&self, admin: &AdminBootstrap) -> Result<bool, Error> {
        if EmployeeRepository::new(self.db)
            .find_by_email(&admin.email)
            .await?
            .is_some()
        {
            return Ok(false);
        }

        let role = RoleRepository::new(self.db)
            .find_by_name("Admin")
            .await?
            .ok_or_else(|| Error::InternalError("Admin role is missing".to_string()))?;
        let department = DepartmentRepository::new(self.db)
            .list()
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| Error::InternalError("No department to place the administrator in".to_string()))?;

        EmployeeService::new(self.db)
            .create(
                None,
                &CreateEmployeeDto {
                    employee_code: "ADMIN001".to_string(),
                    first_name: "System".to_string(),
                    last_name: "Administrator".to_string(),
                    email: admin.email.clone(),
                    phone: None,
                    date_of_birth: None,
                    hire_date: today(),
                    department_id: department.id,
                    role_id: role.id,
                    manager_id: None,
                    salary: None,
                    address: None,
                    emergency_contact: None,
                    password: admin.password.clone(),
                },
            )
            .await?;

        tracing::info!(email = %admin.email, "created administrator account");

        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    mod seed_reference_data {
        use hrdesk_test_utils::prelude::*;
        use sea_orm::{EntityTrait, PaginatorTrait};

        use crate::server::service::seed::SeedService;

        /// Expect the full catalog on an empty database and nothing on a second run
        #[tokio::test]
        async fn seeds_once() -> Result<(), TestError> {
            let test = TestBuilder::new().with_hr_tables().build().await?;
            let service = SeedService::new(&test.db);

            let first = service.seed_reference_data().await.unwrap();
            let second = service.seed_reference_data().await.unwrap();

            assert!(first);
            assert!(!second);
            assert_eq!(entity::prelude::Department::find().count(&test.db).await?, 6);
            assert_eq!(entity::prelude::Role::find().count(&test.db).await?, 4);
            assert_eq!(entity::prelude::LeaveType::find().count(&test.db).await?, 7);

            Ok(())
        }
    }

    mod bootstrap_admin {
        use hrdesk_test_utils::prelude::*;

        use crate::server::{config::AdminBootstrap, service::seed::SeedService};

        /// Expect one administrator with balances, created only once
        #[tokio::test]
        async fn creates_admin_once() -> Result<(), TestError> {
            let test = TestBuilder::new().with_hr_tables().build().await?;
            let service = SeedService::new(&test.db);
            service.seed_reference_data().await.unwrap();
            let admin = AdminBootstrap {
                email: "admin@example.com".to_string(),
                password: "ChangeMe123".to_string(),
            };

            let created = service.bootstrap_admin(&admin).await.unwrap();
            let again = service.bootstrap_admin(&admin).await.unwrap();

            assert!(created);
            assert!(!again);

            Ok(())
        }
    }
}
