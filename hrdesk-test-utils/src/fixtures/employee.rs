use std::sync::OnceLock;

use argon2::{
    password_hash::{rand_core::OsRng, SaltString},
    Argon2, PasswordHasher,
};
use chrono::{NaiveDate, Utc};
use entity::sea_orm_active_enums::EmployeeStatus;
use sea_orm::{ActiveModelTrait, ActiveValue, EntityTrait, IntoActiveModel};

use crate::{
    constant::{TEST_DEPARTMENT, TEST_PASSWORD},
    error::TestError,
    TestContext,
};

static PASSWORD_HASH: OnceLock<String> = OnceLock::new();

/// Argon2 hash of [`TEST_PASSWORD`], computed once per test binary.
pub fn test_password_hash() -> Result<String, TestError> {
    if let Some(hash) = PASSWORD_HASH.get() {
        return Ok(hash.clone());
    }

    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(TEST_PASSWORD.as_bytes(), &salt)
        .map_err(|e| TestError::PasswordHash(e.to_string()))?
        .to_string();

    Ok(PASSWORD_HASH.get_or_init(|| hash).clone())
}

impl TestContext {
    pub fn employee(&self) -> EmployeeFixtures<'_> {
        EmployeeFixtures { setup: self }
    }
}

pub struct EmployeeFixtures<'a> {
    setup: &'a TestContext,
}

impl<'a> EmployeeFixtures<'a> {
    /// Insert an Active employee whose email is `<code>@example.com` (lowercased)
    /// and whose password is [`TEST_PASSWORD`].
    pub async fn insert_employee(
        &self,
        employee_code: &str,
        department_id: i32,
        role_id: i32,
        manager_id: Option<i32>,
    ) -> Result<entity::employee::Model, TestError> {
        let now = Utc::now().naive_utc();

        Ok(
            entity::prelude::Employee::insert(entity::employee::ActiveModel {
                employee_code: ActiveValue::Set(employee_code.to_string()),
                first_name: ActiveValue::Set("Test".to_string()),
                last_name: ActiveValue::Set(employee_code.to_string()),
                email: ActiveValue::Set(format!("{}@example.com", employee_code.to_lowercase())),
                phone: ActiveValue::Set(None),
                date_of_birth: ActiveValue::Set(None),
                hire_date: ActiveValue::Set(
                    NaiveDate::from_ymd_opt(2022, 1, 15).unwrap_or_default(),
                ),
                department_id: ActiveValue::Set(department_id),
                role_id: ActiveValue::Set(role_id),
                manager_id: ActiveValue::Set(manager_id),
                salary: ActiveValue::Set(Some(50_000.0)),
                address: ActiveValue::Set(None),
                emergency_contact: ActiveValue::Set(None),
                status: ActiveValue::Set(EmployeeStatus::Active),
                password_hash: ActiveValue::Set(test_password_hash()?),
                last_login: ActiveValue::Set(None),
                created_at: ActiveValue::Set(now),
                updated_at: ActiveValue::Set(now),
                ..Default::default()
            })
            .exec_with_returning(&self.setup.db)
            .await?,
        )
    }

    /// Insert an employee in the default department holding the named role.
    ///
    /// The role is created with `permissions` if it does not exist yet.
    pub async fn insert_with_role(
        &self,
        employee_code: &str,
        role_name: &str,
        permissions: &[&str],
    ) -> Result<(entity::employee::Model, entity::role::Model), TestError> {
        self.insert_with_role_and_manager(employee_code, role_name, permissions, None)
            .await
    }

    /// Same as [`Self::insert_with_role`] but reporting to `manager_id`.
    pub async fn insert_with_role_and_manager(
        &self,
        employee_code: &str,
        role_name: &str,
        permissions: &[&str],
        manager_id: Option<i32>,
    ) -> Result<(entity::employee::Model, entity::role::Model), TestError> {
        let department = self.setup.org().insert_department(TEST_DEPARTMENT).await?;
        let role = self.setup.org().insert_role(role_name, permissions).await?;

        let employee = self
            .insert_employee(employee_code, department.id, role.id, manager_id)
            .await?;

        Ok((employee, role))
    }

    /// Overwrite selected fields on an existing employee.
    pub async fn update(
        &self,
        employee: entity::employee::Model,
        apply: impl FnOnce(&mut entity::employee::ActiveModel),
    ) -> Result<entity::employee::Model, TestError> {
        let mut active = employee.into_active_model();
        apply(&mut active);

        Ok(active.update(&self.setup.db).await?)
    }

    /// Set the employment status of an employee.
    pub async fn set_status(
        &self,
        employee: entity::employee::Model,
        status: EmployeeStatus,
    ) -> Result<entity::employee::Model, TestError> {
        self.update(employee, |e| e.status = ActiveValue::Set(status))
            .await
    }
}
