use sea_orm_migration::{prelude::*, schema::*};

use crate::{
    m20251101_000001_create_department_table::Department,
    m20251101_000002_create_role_table::Role,
};

static IDX_EMPLOYEE_DEPARTMENT_ID: &str = "idx-employee-department_id";
static IDX_EMPLOYEE_MANAGER_ID: &str = "idx-employee-manager_id";
static IDX_EMPLOYEE_STATUS: &str = "idx-employee-status";
static FK_EMPLOYEE_DEPARTMENT_ID: &str = "fk-employee-department_id";
static FK_EMPLOYEE_ROLE_ID: &str = "fk-employee-role_id";
static FK_EMPLOYEE_MANAGER_ID: &str = "fk-employee-manager_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Employee::Table)
                    .if_not_exists()
                    .col(pk_auto(Employee::Id))
                    .col(string_uniq(Employee::EmployeeCode))
                    .col(string(Employee::FirstName))
                    .col(string(Employee::LastName))
                    .col(string_uniq(Employee::Email))
                    .col(string_null(Employee::Phone))
                    .col(date_null(Employee::DateOfBirth))
                    .col(date(Employee::HireDate))
                    .col(integer(Employee::DepartmentId))
                    .col(integer(Employee::RoleId))
                    .col(integer_null(Employee::ManagerId))
                    .col(double_null(Employee::Salary))
                    .col(string_null(Employee::Address))
                    .col(json_binary_null(Employee::EmergencyContact))
                    .col(string(Employee::Status))
                    .col(string(Employee::PasswordHash))
                    .col(timestamp_null(Employee::LastLogin))
                    .col(timestamp(Employee::CreatedAt).default(Expr::current_timestamp()))
                    .col(timestamp(Employee::UpdatedAt).default(Expr::current_timestamp()))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_EMPLOYEE_DEPARTMENT_ID)
                    .table(Employee::Table)
                    .col(Employee::DepartmentId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_EMPLOYEE_MANAGER_ID)
                    .table(Employee::Table)
                    .col(Employee::ManagerId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_EMPLOYEE_STATUS)
                    .table(Employee::Table)
                    .col(Employee::Status)
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_EMPLOYEE_DEPARTMENT_ID)
                    .from_tbl(Employee::Table)
                    .from_col(Employee::DepartmentId)
                    .to_tbl(Department::Table)
                    .to_col(Department::Id)
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_EMPLOYEE_ROLE_ID)
                    .from_tbl(Employee::Table)
                    .from_col(Employee::RoleId)
                    .to_tbl(Role::Table)
                    .to_col(Role::Id)
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_EMPLOYEE_MANAGER_ID)
                    .from_tbl(Employee::Table)
                    .from_col(Employee::ManagerId)
                    .to_tbl(Employee::Table)
                    .to_col(Employee::Id)
                    .on_delete(ForeignKeyAction::SetNull)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_foreign_key(
                ForeignKey::drop()
                    .name(FK_EMPLOYEE_MANAGER_ID)
                    .table(Employee::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_foreign_key(
                ForeignKey::drop()
                    .name(FK_EMPLOYEE_ROLE_ID)
                    .table(Employee::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_foreign_key(
                ForeignKey::drop()
                    .name(FK_EMPLOYEE_DEPARTMENT_ID)
                    .table(Employee::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name(IDX_EMPLOYEE_STATUS)
                    .table(Employee::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name(IDX_EMPLOYEE_MANAGER_ID)
                    .table(Employee::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name(IDX_EMPLOYEE_DEPARTMENT_ID)
                    .table(Employee::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(Employee::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum Employee {
    Table,
    Id,
    EmployeeCode,
    FirstName,
    LastName,
    Email,
    Phone,
    DateOfBirth,
    HireDate,
    DepartmentId,
    RoleId,
    ManagerId,
    Salary,
    Address,
    EmergencyContact,
    Status,
    PasswordHash,
    LastLogin,
    CreatedAt,
    UpdatedAt,
}
