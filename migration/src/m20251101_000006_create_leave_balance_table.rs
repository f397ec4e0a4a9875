use sea_orm_migration::{prelude::*, schema::*};

use crate::{
    m20251101_000004_create_employee_table::Employee,
    m20251101_000005_create_leave_type_table::LeaveType,
};

static IDX_LEAVE_BALANCE_EMPLOYEE_ID_LEAVE_TYPE_ID_YEAR: &str = "idx-leave_balance-employee_id_leave_type_id_year";
static FK_LEAVE_BALANCE_EMPLOYEE_ID: &str = "fk-leave_balance-employee_id";
static FK_LEAVE_BALANCE_LEAVE_TYPE_ID: &str = "fk-leave_balance-leave_type_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(LeaveBalance::Table)
                    .if_not_exists()
                    .col(pk_auto(LeaveBalance::Id))
                    .col(integer(LeaveBalance::EmployeeId))
                    .col(integer(LeaveBalance::LeaveTypeId))
                    .col(integer(LeaveBalance::Year))
                    .col(integer(LeaveBalance::TotalDays).default(0))
                    .col(integer(LeaveBalance::UsedDays).default(0))
                    .col(integer(LeaveBalance::CarryForwardDays).default(0))
                    .col(integer(LeaveBalance::RemainingDays).default(0))
                    .col(timestamp(LeaveBalance::UpdatedAt).default(Expr::current_timestamp()))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_LEAVE_BALANCE_EMPLOYEE_ID_LEAVE_TYPE_ID_YEAR)
                    .table(LeaveBalance::Table)
                    .col(LeaveBalance::EmployeeId)
                    .col(LeaveBalance::LeaveTypeId)
                    .col(LeaveBalance::Year)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_LEAVE_BALANCE_EMPLOYEE_ID)
                    .from_tbl(LeaveBalance::Table)
                    .from_col(LeaveBalance::EmployeeId)
                    .to_tbl(Employee::Table)
                    .to_col(Employee::Id)
                    .on_delete(ForeignKeyAction::Cascade)
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_LEAVE_BALANCE_LEAVE_TYPE_ID)
                    .from_tbl(LeaveBalance::Table)
                    .from_col(LeaveBalance::LeaveTypeId)
                    .to_tbl(LeaveType::Table)
                    .to_col(LeaveType::Id)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_foreign_key(
                ForeignKey::drop()
                    .name(FK_LEAVE_BALANCE_LEAVE_TYPE_ID)
                    .table(LeaveBalance::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_foreign_key(
                ForeignKey::drop()
                    .name(FK_LEAVE_BALANCE_EMPLOYEE_ID)
                    .table(LeaveBalance::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name(IDX_LEAVE_BALANCE_EMPLOYEE_ID_LEAVE_TYPE_ID_YEAR)
                    .table(LeaveBalance::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(LeaveBalance::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum LeaveBalance {
    Table,
    Id,
    EmployeeId,
    LeaveTypeId,
    Year,
    TotalDays,
    UsedDays,
    CarryForwardDays,
    RemainingDays,
    UpdatedAt,
}
