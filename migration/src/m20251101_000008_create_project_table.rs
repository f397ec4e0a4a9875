use sea_orm_migration::{prelude::*, schema::*};

use crate::{
    m20251101_000001_create_department_table::Department,
    m20251101_000004_create_employee_table::Employee,
};

static FK_PROJECT_MANAGER_ID: &str = "fk-project-manager_id";
static FK_PROJECT_DEPARTMENT_ID: &str = "fk-project-department_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Project::Table)
                    .if_not_exists()
                    .col(pk_auto(Project::Id))
                    .col(string(Project::Name))
                    .col(text_null(Project::Description))
                    .col(date(Project::StartDate))
                    .col(date_null(Project::EndDate))
                    .col(string(Project::Status))
                    .col(integer_null(Project::ManagerId))
                    .col(integer_null(Project::DepartmentId))
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_PROJECT_MANAGER_ID)
                    .from_tbl(Project::Table)
                    .from_col(Project::ManagerId)
                    .to_tbl(Employee::Table)
                    .to_col(Employee::Id)
                    .on_delete(ForeignKeyAction::SetNull)
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_PROJECT_DEPARTMENT_ID)
                    .from_tbl(Project::Table)
                    .from_col(Project::DepartmentId)
                    .to_tbl(Department::Table)
                    .to_col(Department::Id)
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
                    .name(FK_PROJECT_DEPARTMENT_ID)
                    .table(Project::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_foreign_key(
                ForeignKey::drop()
                    .name(FK_PROJECT_MANAGER_ID)
                    .table(Project::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(Project::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum Project {
    Table,
    Id,
    Name,
    Description,
    StartDate,
    EndDate,
    Status,
    ManagerId,
    DepartmentId,
}
