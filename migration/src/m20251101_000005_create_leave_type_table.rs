use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(LeaveType::Table)
                    .if_not_exists()
                    .col(pk_auto(LeaveType::Id))
                    .col(string_uniq(LeaveType::Name))
                    .col(string_null(LeaveType::Description))
                    .col(integer(LeaveType::MaxDaysPerYear).default(0))
                    .col(boolean(LeaveType::CarryForward).default(false))
                    .col(boolean(LeaveType::RequiresApproval).default(true))
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(LeaveType::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum LeaveType {
    Table,
    Id,
    Name,
    Description,
    MaxDaysPerYear,
    CarryForward,
    RequiresApproval,
}
