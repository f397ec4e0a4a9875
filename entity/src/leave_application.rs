use sea_orm::entity::prelude::*;

use crate::{sea_orm_active_enums::LeaveStatus, types::Attachments};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "leave_application")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub employee_id: i32,
    pub leave_type_id: i32,
    pub start_date: Date,
    pub end_date: Date,
    pub total_days: i32,
    pub balance_year: i32,
    pub reason: Option<String>,
    #[sea_orm(column_type = "JsonBinary")]
    pub attachments: Attachments,
    pub status: LeaveStatus,
    pub applied_at: DateTime,
    pub approved_by: Option<i32>,
    pub approved_at: Option<DateTime>,
    pub rejection_reason: Option<String>,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::employee::Entity",
        from = "Column::EmployeeId",
        to = "super::employee::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Employee,
    #[sea_orm(
        belongs_to = "super::employee::Entity",
        from = "Column::ApprovedBy",
        to = "super::employee::Column::Id",
        on_update = "NoAction",
        on_delete = "SetNull"
    )]
    Approver,
    #[sea_orm(
        belongs_to = "super::leave_type::Entity",
        from = "Column::LeaveTypeId",
        to = "super::leave_type::Column::Id",
        on_update = "Cascade",
        on_delete = "Restrict"
    )]
    LeaveType,
}

impl Related<super::leave_type::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::LeaveType.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
