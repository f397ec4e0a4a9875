use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "performance_metric")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub review_id: i32,
    pub metric_name: String,
    #[sea_orm(column_type = "Double")]
    pub rating: f64,
    pub comments: Option<String>,
    #[sea_orm(column_type = "Double")]
    pub weight: f64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::performance_review::Entity",
        from = "Column::ReviewId",
        to = "super::performance_review::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    PerformanceReview,
}

impl Related<super::performance_review::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PerformanceReview.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
