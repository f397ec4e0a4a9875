use chrono::Utc;
use entity::sea_orm_active_enums::ReviewStatus;
use sea_orm::{ActiveValue, EntityTrait};

use crate::{error::TestError, TestContext};

impl TestContext {
    pub fn performance(&self) -> PerformanceFixtures<'_> {
        PerformanceFixtures { setup: self }
    }
}

pub struct PerformanceFixtures<'a> {
    setup: &'a TestContext,
}

impl<'a> PerformanceFixtures<'a> {
    /// Insert a review dated now.
    pub async fn insert_review(
        &self,
        employee_id: i32,
        reviewer_id: i32,
        review_period: &str,
        overall_rating: f64,
        status: ReviewStatus,
    ) -> Result<entity::performance_review::Model, TestError> {
        let now = Utc::now().naive_utc();

        Ok(
            entity::prelude::PerformanceReview::insert(entity::performance_review::ActiveModel {
                employee_id: ActiveValue::Set(employee_id),
                reviewer_id: ActiveValue::Set(reviewer_id),
                review_period: ActiveValue::Set(review_period.to_string()),
                overall_rating: ActiveValue::Set(Some(overall_rating)),
                goals: ActiveValue::Set(None),
                achievements: ActiveValue::Set(None),
                areas_for_improvement: ActiveValue::Set(None),
                feedback: ActiveValue::Set(Some("Solid quarter".to_string())),
                employee_comments: ActiveValue::Set(None),
                status: ActiveValue::Set(status),
                review_date: ActiveValue::Set(now),
                created_at: ActiveValue::Set(now),
                updated_at: ActiveValue::Set(now),
                ..Default::default()
            })
            .exec_with_returning(&self.setup.db)
            .await?,
        )
    }
}
