use sea_orm_migration::{prelude::*, schema::*};

use crate::{
    m20251101_000004_create_employee_table::Employee,
    m20251101_000005_create_leave_type_table::LeaveType,
};

static IDX_LEAVE_APPLICATION_EMPLOYEE_ID: &str = "idx-leave_application-employee_id";
static IDX_LEAVE_APPLICATION_STATUS: &str = "idx-leave_application-status";
static FK_LEAVE_APPLICATION_EMPLOYEE_ID: &str = "fk-leave_application-employee_id";
static FK_LEAVE_APPLICATION_LEAVE_TYPE_ID: &str = "fk-leave_application-leave_type_id";
static FK_LEAVE_APPLICATION_APPROVED_BY: &str = "fk-leave_application-approved_by";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(LeaveApplication::Table)
                    .if_not_exists()
                    .col(pk_auto(LeaveApplication::Id))
                    .col(integer(LeaveApplication::EmployeeId))
                    .col(integer(LeaveApplication::LeaveTypeId))
                    .col(date(LeaveApplication::StartDate))
                    .col(date(LeaveApplication::EndDate))
                    .col(integer(LeaveApplication::TotalDays))
                    .col(integer(LeaveApplication::BalanceYear))
                    .col(text_null(LeaveApplication::Reason))
                    .col(json_binary(LeaveApplication::Attachments))
                    .col(string(LeaveApplication::Status))
                    .col(timestamp(LeaveApplication::AppliedAt).default(Expr::current_timestamp()))
                    .col(integer_null(LeaveApplication::ApprovedBy))
                    .col(timestamp_null(LeaveApplication::ApprovedAt))
                    .col(text_null(LeaveApplication::RejectionReason))
                    .col(timestamp(LeaveApplication::UpdatedAt).default(Expr::current_timestamp()))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_LEAVE_APPLICATION_EMPLOYEE_ID)
                    .table(LeaveApplication::Table)
                    .col(LeaveApplication::EmployeeId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_LEAVE_APPLICATION_STATUS)
                    .table(LeaveApplication::Table)
                    .col(LeaveApplication::Status)
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_LEAVE_APPLICATION_EMPLOYEE_ID)
                    .from_tbl(LeaveApplication::Table)
                    .from_col(LeaveApplication::EmployeeId)
                    .to_tbl(Employee::Table)
                    .to_col(Employee::Id)
                    .on_delete(ForeignKeyAction::Cascade)
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_LEAVE_APPLICATION_LEAVE_TYPE_ID)
                    .from_tbl(LeaveApplication::Table)
                    .from_col(LeaveApplication::LeaveTypeId)
                    .to_tbl(LeaveType::Table)
                    .to_col(LeaveType::Id)
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_LEAVE_APPLICATION_APPROVED_BY)
                    .from_tbl(LeaveApplication::Table)
                    .from_col(LeaveApplication::ApprovedBy)
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
                    .name(FK_LEAVE_APPLICATION_APPROVED_BY)
                    .table(LeaveApplication::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_foreign_key(
                ForeignKey::drop()
                    .name(FK_LEAVE_APPLICATION_LEAVE_TYPE_ID)
                    .table(LeaveApplication::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_foreign_key(
                ForeignKey::drop()
                    .name(FK_LEAVE_APPLICATION_EMPLOYEE_ID)
                    .table(LeaveApplication::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name(IDX_LEAVE_APPLICATION_STATUS)
                    .table(LeaveApplication::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name(IDX_LEAVE_APPLICATION_EMPLOYEE_ID)
                    .table(LeaveApplication::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(LeaveApplication::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum LeaveApplication {
    Table,
    Id,
    EmployeeId,
    LeaveTypeId,
    StartDate,
    EndDate,
    TotalDays,
    BalanceYear,
    Reason,
    Attachments,
    Status,
    AppliedAt,
    ApprovedBy,
    ApprovedAt,
    RejectionReason,
    UpdatedAt,
}
