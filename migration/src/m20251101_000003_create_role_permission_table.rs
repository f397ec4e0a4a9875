use sea_orm_migration::{prelude::*, schema::*};

use crate::m20251101_000002_create_role_table::Role;

static IDX_ROLE_PERMISSION_ROLE_ID_PERMISSION: &str = "idx-role_permission-role_id_permission";
static FK_ROLE_PERMISSION_ROLE_ID: &str = "fk-role_permission-role_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(RolePermission::Table)
                    .if_not_exists()
                    .col(pk_auto(RolePermission::Id))
                    .col(integer(RolePermission::RoleId))
                    .col(string(RolePermission::Permission))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_ROLE_PERMISSION_ROLE_ID_PERMISSION)
                    .table(RolePermission::Table)
                    .col(RolePermission::RoleId)
                    .col(RolePermission::Permission)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_ROLE_PERMISSION_ROLE_ID)
                    .from_tbl(RolePermission::Table)
                    .from_col(RolePermission::RoleId)
                    .to_tbl(Role::Table)
                    .to_col(Role::Id)
                    .on_delete(ForeignKeyAction::Cascade)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_foreign_key(
                ForeignKey::drop()
                    .name(FK_ROLE_PERMISSION_ROLE_ID)
                    .table(RolePermission::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name(IDX_ROLE_PERMISSION_ROLE_ID_PERMISSION)
                    .table(RolePermission::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(RolePermission::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum RolePermission {
    Table,
    Id,
    RoleId,
    Permission,
}
