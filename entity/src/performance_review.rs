use sea_orm::entity::prelude::*;

use crate::sea_orm_active_enums::ReviewStatus;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "performance_review")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub employee_id: i32,
    pub reviewer_id: i32,
    pub review_period: String,
    #[sea_orm(column_type = "Double", nullable)]
    pub overall_rating: Option<f64>,
    #[sea_orm(column_type = "Text", nullable)]
    pub goals: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub achievements: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub areas_for_improvement: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub feedback: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub employee_comments: Option<String>,
    pub status: ReviewStatus,
    pub review_date: DateTime,
    pub created_at: DateTime,
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
        from = "Column::ReviewerId",
        to = "super::employee::Column::Id",
        on_update = "NoAction",
        on_delete = "Restrict"
    )]
    Reviewer,
}

impl ActiveModelBehavior for ActiveModel {}
