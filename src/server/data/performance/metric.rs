use sea_orm::{
    ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, QueryOrder,
};

use crate::model::performance::CreateMetricDto;

pub struct PerformanceMetricRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> PerformanceMetricRepository<'a, C> {
    /// Creates a new instance of [`PerformanceMetricRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Inserts the metric ratings of a review
    pub async fn create_many(&self, review_id: i32, metrics: &[CreateMetricDto]) -> Result<(), DbErr> {
        if metrics.is_empty() {
            return Ok(());
        }

        let rows = metrics
            .iter()
            .map(|metric| entity::performance_metric::ActiveModel {
                review_id: ActiveValue::Set(review_id),
                metric_name: ActiveValue::Set(metric.metric_name.clone()),
                rating: ActiveValue::Set(metric.rating),
                comments: ActiveValue::Set(metric.comments.clone()),
                weight: ActiveValue::Set(metric.weight),
                ..Default::default()
            });

        entity::prelude::PerformanceMetric::insert_many(rows)
            .exec(self.db)
            .await?;

        Ok(())
    }

    pub async fn list_for_review(
        &self,
        review_id: i32,
    ) -> Result<Vec<entity::performance_metric::Model>, DbErr> {
        entity::prelude::PerformanceMetric::find()
            .filter(entity::performance_metric::Column::ReviewId.eq(review_id))
            .order_by_asc(entity::performance_metric::Column::Id)
            .all(self.db)
            .await
    }
}
