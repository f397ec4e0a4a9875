use std::collections::HashMap;

use chrono::Utc;
use entity::sea_orm_active_enums::EmployeeStatus;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, Condition, ConnectionTrait, DbErr, EntityTrait,
    IntoActiveModel, Order, PaginatorTrait, QueryFilter, QueryOrder,
};

use crate::{
    model::employee::{CreateEmployeeDto, EmployeeSortField, SortOrder, UpdateEmployeeDto},
    server::util::decimal::round_amount,
};

/// Filters applied when listing employees
#[derive(Clone, Debug, Default)]
pub struct EmployeeFilter {
    /// Substring matched against first name, last name, email and employee code
    pub search: Option<String>,
    pub department_name: Option<String>,
    pub department_id: Option<i32>,
    pub status: Option<EmployeeStatus>,
}

pub struct EmployeeRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> EmployeeRepository<'a, C> {
    /// Creates a new instance of [`EmployeeRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Inserts a new Active employee
    ///
    /// # Arguments
    /// - `employee` - Validated employee details
    /// - `password_hash` - Argon2 hash of the initial password
    pub async fn create(
        &self,
        employee: &CreateEmployeeDto,
        password_hash: String,
    ) -> Result<entity::employee::Model, DbErr> {
        let now = Utc::now().naive_utc();

        entity::prelude::Employee::insert(entity::employee::ActiveModel {
            employee_code: ActiveValue::Set(employee.employee_code.clone()),
            first_name: ActiveValue::Set(employee.first_name.clone()),
            last_name: ActiveValue::Set(employee.last_name.clone()),
            email: ActiveValue::Set(employee.email.clone()),
            phone: ActiveValue::Set(employee.phone.clone()),
            date_of_birth: ActiveValue::Set(employee.date_of_birth),
            hire_date: ActiveValue::Set(employee.hire_date),
            department_id: ActiveValue::Set(employee.department_id),
            role_id: ActiveValue::Set(employee.role_id),
            manager_id: ActiveValue::Set(employee.manager_id),
            salary: ActiveValue::Set(employee.salary.map(round_amount)),
            address: ActiveValue::Set(employee.address.clone()),
            emergency_contact: ActiveValue::Set(employee.emergency_contact.clone()),
            status: ActiveValue::Set(EmployeeStatus::Active),
            password_hash: ActiveValue::Set(password_hash),
            last_login: ActiveValue::Set(None),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        })
        .exec_with_returning(self.db)
        .await
    }

    pub async fn get(&self, id: i32) -> Result<Option<entity::employee::Model>, DbErr> {
        entity::prelude::Employee::find_by_id(id).one(self.db).await
    }

    pub async fn find_by_email(
        &self,
        email: &str,
    ) -> Result<Option<entity::employee::Model>, DbErr> {
        entity::prelude::Employee::find()
            .filter(entity::employee::Column::Email.eq(email))
            .one(self.db)
            .await
    }

    pub async fn get_many(&self, ids: &[i32]) -> Result<Vec<entity::employee::Model>, DbErr> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        entity::prelude::Employee::find()
            .filter(entity::employee::Column::Id.is_in(ids.to_vec()))
            .all(self.db)
            .await
    }

    /// Returns a map of employee ID to "first last" name for the provided IDs
    pub async fn names_by_ids(&self, ids: &[i32]) -> Result<HashMap<i32, String>, DbErr> {
        let employees = self.get_many(ids).await?;

        Ok(employees
            .into_iter()
            .map(|e| (e.id, format!("{} {}", e.first_name, e.last_name)))
            .collect())
    }

    /// Lists employees page by page
    ///
    /// # Arguments
    /// - `filter` - Optional search, department and status filters
    /// - `sort_by` - Column to order by
    /// - `order` - Sort direction
    /// - `page_index` - Zero-based page index
    /// - `limit` - Page size
    ///
    /// # Returns
    /// - `Ok((employees, total))` - The requested page and the total matching row count
    pub async fn list(
        &self,
        filter: &EmployeeFilter,
        sort_by: EmployeeSortField,
        order: SortOrder,
        page_index: u64,
        limit: u64,
    ) -> Result<(Vec<entity::employee::Model>, u64), DbErr> {
        let column = match sort_by {
            EmployeeSortField::FirstName => entity::employee::Column::FirstName,
            EmployeeSortField::LastName => entity::employee::Column::LastName,
            EmployeeSortField::Email => entity::employee::Column::Email,
            EmployeeSortField::EmployeeCode => entity::employee::Column::EmployeeCode,
            EmployeeSortField::HireDate => entity::employee::Column::HireDate,
            EmployeeSortField::CreatedAt => entity::employee::Column::CreatedAt,
        };
        let order = match order {
            SortOrder::Asc => Order::Asc,
            SortOrder::Desc => Order::Desc,
        };

        let mut query = entity::prelude::Employee::find();

        if let Some(search) = filter.search.as_deref().filter(|s| !s.is_empty()) {
            query = query.filter(
                Condition::any()
                    .add(entity::employee::Column::FirstName.contains(search))
                    .add(entity::employee::Column::LastName.contains(search))
                    .add(entity::employee::Column::Email.contains(search))
                    .add(entity::employee::Column::EmployeeCode.contains(search)),
            );
        }
        if let Some(name) = filter.department_name.as_deref().filter(|s| !s.is_empty()) {
            query = query
                .inner_join(entity::department::Entity)
                .filter(entity::department::Column::Name.eq(name));
        }
        if let Some(department_id) = filter.department_id {
            query = query.filter(entity::employee::Column::DepartmentId.eq(department_id));
        }
        if let Some(status) = filter.status {
            query = query.filter(entity::employee::Column::Status.eq(status));
        }

        let paginator = query
            .order_by(column, order)
            .order_by_asc(entity::employee::Column::Id)
            .paginate(self.db, limit);

        let total = paginator.num_items().await?;
        let employees = paginator.fetch_page(page_index).await?;

        Ok((employees, total))
    }

    /// All employees matching `filter` without pagination, ordered by name
    pub async fn list_all(
        &self,
        filter: &EmployeeFilter,
    ) -> Result<Vec<entity::employee::Model>, DbErr> {
        let mut query = entity::prelude::Employee::find();

        if let Some(department_id) = filter.department_id {
            query = query.filter(entity::employee::Column::DepartmentId.eq(department_id));
        }
        if let Some(status) = filter.status {
            query = query.filter(entity::employee::Column::Status.eq(status));
        }

        query
            .order_by_asc(entity::employee::Column::FirstName)
            .order_by_asc(entity::employee::Column::LastName)
            .all(self.db)
            .await
    }

    /// Active employees, used by the reminder jobs and analytics
    pub async fn list_active(&self) -> Result<Vec<entity::employee::Model>, DbErr> {
        self.list_all(&EmployeeFilter {
            status: Some(EmployeeStatus::Active),
            ..Default::default()
        })
        .await
    }

    /// Applies a partial update. Absent fields are left unchanged.
    ///
    /// # Returns
    /// - `Ok(Some(employee))` - The updated employee
    /// - `Ok(None)` - No employee with that ID
    pub async fn update(
        &self,
        id: i32,
        changes: &UpdateEmployeeDto,
    ) -> Result<Option<entity::employee::Model>, DbErr> {
        let Some(employee) = self.get(id).await? else {
            return Ok(None);
        };

        let mut employee_am = employee.into_active_model();
        if let Some(first_name) = &changes.first_name {
            employee_am.first_name = ActiveValue::Set(first_name.clone());
        }
        if let Some(last_name) = &changes.last_name {
            employee_am.last_name = ActiveValue::Set(last_name.clone());
        }
        if let Some(email) = &changes.email {
            employee_am.email = ActiveValue::Set(email.clone());
        }
        if let Some(phone) = &changes.phone {
            employee_am.phone = ActiveValue::Set(Some(phone.clone()));
        }
        if let Some(date_of_birth) = changes.date_of_birth {
            employee_am.date_of_birth = ActiveValue::Set(Some(date_of_birth));
        }
        if let Some(department_id) = changes.department_id {
            employee_am.department_id = ActiveValue::Set(department_id);
        }
        if let Some(role_id) = changes.role_id {
            employee_am.role_id = ActiveValue::Set(role_id);
        }
        if let Some(manager_id) = changes.manager_id {
            employee_am.manager_id = ActiveValue::Set(Some(manager_id));
        }
        if let Some(salary) = changes.salary {
            employee_am.salary = ActiveValue::Set(Some(round_amount(salary)));
        }
        if let Some(address) = &changes.address {
            employee_am.address = ActiveValue::Set(Some(address.clone()));
        }
        if let Some(contact) = &changes.emergency_contact {
            employee_am.emergency_contact = ActiveValue::Set(Some(contact.clone()));
        }
        if let Some(status) = changes.status {
            employee_am.status = ActiveValue::Set(status);
        }
        employee_am.updated_at = ActiveValue::Set(Utc::now().naive_utc());

        let employee = employee_am.update(self.db).await?;

        Ok(Some(employee))
    }

    /// Sets the employment status, returning `None` if the employee does not exist
    pub async fn set_status(
        &self,
        id: i32,
        status: EmployeeStatus,
    ) -> Result<Option<entity::employee::Model>, DbErr> {
        let Some(employee) = self.get(id).await? else {
            return Ok(None);
        };

        let mut employee_am = employee.into_active_model();
        employee_am.status = ActiveValue::Set(status);
        employee_am.updated_at = ActiveValue::Set(Utc::now().naive_utc());

        employee_am.update(self.db).await.map(Some)
    }

    /// Records a successful login
    pub async fn set_last_login(&self, id: i32) -> Result<(), DbErr> {
        let now = Utc::now().naive_utc();

        entity::prelude::Employee::update_many()
            .col_expr(
                entity::employee::Column::LastLogin,
                sea_orm::sea_query::Expr::value(Some(now)),
            )
            .filter(entity::employee::Column::Id.eq(id))
            .exec(self.db)
            .await?;

        Ok(())
    }

    pub async fn set_password_hash(&self, id: i32, password_hash: String) -> Result<(), DbErr> {
        entity::prelude::Employee::update_many()
            .col_expr(
                entity::employee::Column::PasswordHash,
                sea_orm::sea_query::Expr::value(password_hash),
            )
            .col_expr(
                entity::employee::Column::UpdatedAt,
                sea_orm::sea_query::Expr::value(Utc::now().naive_utc()),
            )
            .filter(entity::employee::Column::Id.eq(id))
            .exec(self.db)
            .await?;

        Ok(())
    }

    pub async fn count(&self) -> Result<u64, DbErr> {
        entity::prelude::Employee::find().count(self.db).await
    }
}
