use sea_orm_migration::{prelude::*, schema::*};

use crate::m20251101_000004_create_employee_table::Employee;

static IDX_NOTIFICATION_RECIPIENT_ID_IS_READ: &str = "idx-notification-recipient_id_is_read";
static FK_NOTIFICATION_RECIPIENT_ID: &str = "fk-notification-recipient_id";
static FK_NOTIFICATION_SENDER_ID: &str = "fk-notification-sender_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Notification::Table)
                    .if_not_exists()
                    .col(pk_auto(Notification::Id))
                    .col(integer(Notification::RecipientId))
                    .col(integer_null(Notification::SenderId))
                    .col(string(Notification::Kind))
                    .col(string(Notification::Title))
                    .col(text(Notification::Message))
                    .col(json_binary_null(Notification::Data))
                    .col(string(Notification::Priority))
                    .col(boolean(Notification::IsRead).default(false))
                    .col(timestamp_null(Notification::ReadAt))
                    .col(timestamp(Notification::CreatedAt).default(Expr::current_timestamp()))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_NOTIFICATION_RECIPIENT_ID_IS_READ)
                    .table(Notification::Table)
                    .col(Notification::RecipientId)
                    .col(Notification::IsRead)
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_NOTIFICATION_RECIPIENT_ID)
                    .from_tbl(Notification::Table)
                    .from_col(Notification::RecipientId)
                    .to_tbl(Employee::Table)
                    .to_col(Employee::Id)
                    .on_delete(ForeignKeyAction::Cascade)
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_NOTIFICATION_SENDER_ID)
                    .from_tbl(Notification::Table)
                    .from_col(Notification::SenderId)
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
                    .name(FK_NOTIFICATION_SENDER_ID)
                    .table(Notification::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_foreign_key(
                ForeignKey::drop()
                    .name(FK_NOTIFICATION_RECIPIENT_ID)
                    .table(Notification::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name(IDX_NOTIFICATION_RECIPIENT_ID_IS_READ)
                    .table(Notification::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(Notification::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum Notification {
    Table,
    Id,
    RecipientId,
    SenderId,
    Kind,
    Title,
    Message,
    Data,
    Priority,
    IsRead,
    ReadAt,
    CreatedAt,
}
