use sea_orm_migration::{prelude::*, schema::*};

use crate::m20251101_000004_create_employee_table::Employee;

static IDX_AUDIT_LOG_TABLE_NAME_RECORD_ID: &str = "idx-audit_log-table_name_record_id";
static FK_AUDIT_LOG_USER_ID: &str = "fk-audit_log-user_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(AuditLog::Table)
                    .if_not_exists()
                    .col(pk_auto(AuditLog::Id))
                    .col(integer_null(AuditLog::UserId))
                    .col(string(AuditLog::Action))
                    .col(string(AuditLog::TableName))
                    .col(integer(AuditLog::RecordId))
                    .col(json_binary_null(AuditLog::OldValues))
                    .col(json_binary_null(AuditLog::NewValues))
                    .col(timestamp(AuditLog::CreatedAt).default(Expr::current_timestamp()))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_AUDIT_LOG_TABLE_NAME_RECORD_ID)
                    .table(AuditLog::Table)
                    .col(AuditLog::TableName)
                    .col(AuditLog::RecordId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_AUDIT_LOG_USER_ID)
                    .from_tbl(AuditLog::Table)
                    .from_col(AuditLog::UserId)
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
                    .name(FK_AUDIT_LOG_USER_ID)
                    .table(AuditLog::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name(IDX_AUDIT_LOG_TABLE_NAME_RECORD_ID)
                    .table(AuditLog::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(AuditLog::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum AuditLog {
    Table,
    Id,
    UserId,
    Action,
    TableName,
    RecordId,
    OldValues,
    NewValues,
    CreatedAt,
}
