use sea_orm_migration::{prelude::*, schema::*};

use crate::{
    m20251101_000004_create_employee_table::Employee,
    m20251101_000008_create_project_table::Project,
};

static IDX_WORK_LOG_EMPLOYEE_ID_LOG_DATE: &str = "idx-work_log-employee_id_log_date";
static FK_WORK_LOG_EMPLOYEE_ID: &str = "fk-work_log-employee_id";
static FK_WORK_LOG_PROJECT_ID: &str = "fk-work_log-project_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(WorkLog::Table)
                    .if_not_exists()
                    .col(pk_auto(WorkLog::Id))
                    .col(integer(WorkLog::EmployeeId))
                    .col(integer_null(WorkLog::ProjectId))
                    .col(date(WorkLog::LogDate))
                    .col(double(WorkLog::HoursWorked))
                    .col(text_null(WorkLog::TaskDescription))
                    .col(string(WorkLog::Status))
                    .col(timestamp(WorkLog::CreatedAt).default(Expr::current_timestamp()))
                    .col(timestamp(WorkLog::UpdatedAt).default(Expr::current_timestamp()))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_WORK_LOG_EMPLOYEE_ID_LOG_DATE)
                    .table(WorkLog::Table)
                    .col(WorkLog::EmployeeId)
                    .col(WorkLog::LogDate)
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_WORK_LOG_EMPLOYEE_ID)
                    .from_tbl(WorkLog::Table)
                    .from_col(WorkLog::EmployeeId)
                    .to_tbl(Employee::Table)
                    .to_col(Employee::Id)
                    .on_delete(ForeignKeyAction::Cascade)
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_WORK_LOG_PROJECT_ID)
                    .from_tbl(WorkLog::Table)
                    .from_col(WorkLog::ProjectId)
                    .to_tbl(Project::Table)
                    .to_col(Project::Id)
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
                    .name(FK_WORK_LOG_PROJECT_ID)
                    .table(WorkLog::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_foreign_key(
                ForeignKey::drop()
                    .name(FK_WORK_LOG_EMPLOYEE_ID)
                    .table(WorkLog::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name(IDX_WORK_LOG_EMPLOYEE_ID_LOG_DATE)
                    .table(WorkLog::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(WorkLog::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum WorkLog {
    Table,
    Id,
    EmployeeId,
    ProjectId,
    LogDate,
    HoursWorked,
    TaskDescription,
    Status,
    CreatedAt,
    UpdatedAt,
}
