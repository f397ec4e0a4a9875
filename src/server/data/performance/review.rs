use chrono::{NaiveDateTime, Utc};
use entity::sea_orm_active_enums::ReviewStatus;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait,
    IntoActiveModel, PaginatorTrait, QueryFilter, QueryOrder,
};

use crate::model::performance::{CreateReviewDto, UpdateReviewDto};

/// Filters applied when listing performance reviews
#[derive(Clone, Debug, Default)]
pub struct ReviewFilter {
    pub employee_id: Option<i32>,
    pub employee_ids: Option<Vec<i32>>,
    pub review_period: Option<String>,
    pub status: Option<ReviewStatus>,
    /// Only reviews dated on or after this instant
    pub reviewed_since: Option<NaiveDateTime>,
}

pub struct PerformanceReviewRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> PerformanceReviewRepository<'a, C> {
    /// Creates a new instance of [`PerformanceReviewRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Inserts a Draft review authored by `reviewer_id`
    pub async fn create(
        &self,
        reviewer_id: i32,
        review: &CreateReviewDto,
    ) -> Result<entity::performance_review::Model, DbErr> {
        let now = Utc::now().naive_utc();

        entity::prelude::PerformanceReview::insert(entity::performance_review::ActiveModel {
            employee_id: ActiveValue::Set(review.employee_id),
            reviewer_id: ActiveValue::Set(reviewer_id),
            review_period: ActiveValue::Set(review.review_period.clone()),
            overall_rating: ActiveValue::Set(review.overall_rating),
            goals: ActiveValue::Set(review.goals.clone()),
            achievements: ActiveValue::Set(review.achievements.clone()),
            areas_for_improvement: ActiveValue::Set(review.areas_for_improvement.clone()),
            feedback: ActiveValue::Set(review.feedback.clone()),
            employee_comments: ActiveValue::Set(None),
            status: ActiveValue::Set(ReviewStatus::Draft),
            review_date: ActiveValue::Set(now),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        })
        .exec_with_returning(self.db)
        .await
    }

    pub async fn get(&self, id: i32) -> Result<Option<entity::performance_review::Model>, DbErr> {
        entity::prelude::PerformanceReview::find_by_id(id)
            .one(self.db)
            .await
    }

    pub async fn find_by_period(
        &self,
        employee_id: i32,
        review_period: &str,
    ) -> Result<Option<entity::performance_review::Model>, DbErr> {
        entity::prelude::PerformanceReview::find()
            .filter(entity::performance_review::Column::EmployeeId.eq(employee_id))
            .filter(entity::performance_review::Column::ReviewPeriod.eq(review_period))
            .one(self.db)
            .await
    }

    fn filtered(filter: &ReviewFilter) -> sea_orm::Select<entity::performance_review::Entity> {
        let mut query = entity::prelude::PerformanceReview::find();

        if let Some(employee_id) = filter.employee_id {
            query = query.filter(entity::performance_review::Column::EmployeeId.eq(employee_id));
        }
        if let Some(ids) = &filter.employee_ids {
            query = query.filter(entity::performance_review::Column::EmployeeId.is_in(ids.clone()));
        }
        if let Some(period) = &filter.review_period {
            query = query.filter(entity::performance_review::Column::ReviewPeriod.eq(period.as_str()));
        }
        if let Some(status) = filter.status {
            query = query.filter(entity::performance_review::Column::Status.eq(status));
        }
        if let Some(since) = filter.reviewed_since {
            query = query.filter(entity::performance_review::Column::ReviewDate.gte(since));
        }

        query
            .order_by_desc(entity::performance_review::Column::ReviewDate)
            .order_by_desc(entity::performance_review::Column::Id)
    }

    /// Lists reviews newest first
    ///
    /// # Returns
    /// - `Ok((reviews, total))` - The requested page and the total matching row count
    pub async fn list(
        &self,
        filter: &ReviewFilter,
        page_index: u64,
        limit: u64,
    ) -> Result<(Vec<entity::performance_review::Model>, u64), DbErr> {
        let paginator = Self::filtered(filter).paginate(self.db, limit);

        let total = paginator.num_items().await?;
        let reviews = paginator.fetch_page(page_index).await?;

        Ok((reviews, total))
    }

    /// All reviews matching `filter`, newest first
    pub async fn list_all(
        &self,
        filter: &ReviewFilter,
    ) -> Result<Vec<entity::performance_review::Model>, DbErr> {
        Self::filtered(filter).all(self.db).await
    }

    /// Applies a partial update. Absent fields are left unchanged.
    pub async fn update(
        &self,
        review: entity::performance_review::Model,
        changes: &UpdateReviewDto,
    ) -> Result<entity::performance_review::Model, DbErr> {
        let mut review_am = review.into_active_model();

        if let Some(rating) = changes.overall_rating {
            review_am.overall_rating = ActiveValue::Set(Some(rating));
        }
        if let Some(goals) = &changes.goals {
            review_am.goals = ActiveValue::Set(Some(goals.clone()));
        }
        if let Some(achievements) = &changes.achievements {
            review_am.achievements = ActiveValue::Set(Some(achievements.clone()));
        }
        if let Some(areas) = &changes.areas_for_improvement {
            review_am.areas_for_improvement = ActiveValue::Set(Some(areas.clone()));
        }
        if let Some(feedback) = &changes.feedback {
            review_am.feedback = ActiveValue::Set(Some(feedback.clone()));
        }
        if let Some(comments) = &changes.employee_comments {
            review_am.employee_comments = ActiveValue::Set(Some(comments.clone()));
        }
        if let Some(status) = changes.status {
            review_am.status = ActiveValue::Set(status);
        }
        review_am.updated_at = ActiveValue::Set(Utc::now().naive_utc());

        review_am.update(self.db).await
    }
}

#[cfg(test)]
mod tests {
    mod find_by_period {
        use entity::sea_orm_active_enums::ReviewStatus;
        use hrdesk_test_utils::prelude::*;

        use crate::server::data::performance::review::PerformanceReviewRepository;

        /// Expect the existing review for the same period to be found
        #[tokio::test]
        async fn finds_existing_period() -> Result<(), TestError> {
            let test = TestBuilder::new().with_hr_tables().build().await?;
            let (manager, _) = test.employee().insert_with_role("MGR001", "Manager", &[]).await?;
            let (employee, _) = test.employee().insert_with_role("EMP001", "Employee", &[]).await?;
            test.performance()
                .insert_review(employee.id, manager.id, "2025-Q1", 4.0, ReviewStatus::Draft)
                .await?;

            let repo = PerformanceReviewRepository::new(&test.db);

            assert!(matches!(
                repo.find_by_period(employee.id, "2025-Q1").await,
                Ok(Some(_))
            ));
            assert!(matches!(
                repo.find_by_period(employee.id, "2025-Q2").await,
                Ok(None)
            ));

            Ok(())
        }
    }

    mod list {
        use entity::sea_orm_active_enums::ReviewStatus;
        use hrdesk_test_utils::prelude::*;

        use crate::server::data::performance::review::{PerformanceReviewRepository, ReviewFilter};

        /// Expect the status filter to only return matching reviews
        #[tokio::test]
        async fn filters_by_status() -> Result<(), TestError> {
            let test = TestBuilder::new().with_hr_tables().build().await?;
            let (manager, _) = test.employee().insert_with_role("MGR001", "Manager", &[]).await?;
            let (employee, _) = test.employee().insert_with_role("EMP001", "Employee", &[]).await?;
            test.performance()
                .insert_review(employee.id, manager.id, "2025-Q1", 4.0, ReviewStatus::Published)
                .await?;
            test.performance()
                .insert_review(employee.id, manager.id, "2025-Q2", 3.0, ReviewStatus::Draft)
                .await?;

            let repo = PerformanceReviewRepository::new(&test.db);
            let filter = ReviewFilter {
                status: Some(ReviewStatus::Published),
                ..Default::default()
            };
            let (reviews, total) = repo.list(&filter, 0, 10).await?;

            assert_eq!(total, 1);
            assert_eq!(reviews[0].review_period, "2025-Q1");

            Ok(())
        }
    }
}
