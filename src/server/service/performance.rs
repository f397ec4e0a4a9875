//! Performance reviews, their metrics and performance analytics.

use std::collections::HashMap;

use entity::sea_orm_active_enums::{NotificationPriority, ReviewStatus};
use sea_orm::{ConnectionTrait, DatabaseConnection, TransactionTrait};
use serde_json::json;

use crate::{
    model::performance::{
        AnalyticsQuery, CreateReviewDto, PerformanceAnalyticsDto, PerformanceMetricDto,
        PerformanceReviewDetailDto, PerformanceReviewDto, PerformanceReviewListDto,
        PerformanceReviewQuery, UpdateReviewDto,
    },
    server::{
        data::{
            department::DepartmentRepository,
            employee::{EmployeeFilter, EmployeeRepository},
            notification::NewNotification,
            performance::{
                metric::PerformanceMetricRepository,
                review::{PerformanceReviewRepository, ReviewFilter},
            },
            work_log::{WorkLogFilter, WorkLogRepository},
        },
        error::Error,
        mail::{template, Mailer},
        model::{auth::AuthUser, permission},
        service::{
            analytics,
            notification::{kind, NotificationService},
        },
        util::{
            pagination::Page,
            time::{months_before, period_start, start_of_day, today},
        },
    },
};

const DEFAULT_PAGE_SIZE: u64 = 10;

fn not_found() -> Error {
    Error::NotFound("Performance review not found".to_string())
}

async fn review_dtos<C: ConnectionTrait>(
    db: &C,
    reviews: Vec<entity::performance_review::Model>,
) -> Result<Vec<PerformanceReviewDto>, Error> {
    let ids: Vec<i32> = reviews
        .iter()
        .flat_map(|r| [r.employee_id, r.reviewer_id])
        .collect();
    let names = EmployeeRepository::new(db).names_by_ids(&ids).await?;

    Ok(reviews
        .into_iter()
        .map(|r| PerformanceReviewDto {
            employee_name: names.get(&r.employee_id).cloned(),
            reviewer_name: names.get(&r.reviewer_id).cloned(),
            id: r.id,
            employee_id: r.employee_id,
            reviewer_id: r.reviewer_id,
            review_period: r.review_period,
            overall_rating: r.overall_rating,
            goals: r.goals,
            achievements: r.achievements,
            areas_for_improvement: r.areas_for_improvement,
            feedback: r.feedback,
            employee_comments: r.employee_comments,
            status: r.status,
            review_date: r.review_date,
            created_at: r.created_at,
            updated_at: r.updated_at,
        })
        .collect())
}

async fn review_dto<C: ConnectionTrait>(
    db: &C,
    review: entity::performance_review::Model,
) -> Result<PerformanceReviewDto, Error> {
    review_dtos(db, vec![review])
        .await?
        .pop()
        .ok_or_else(|| Error::InternalError("Review conversion returned no rows".to_string()))
}

impl From<entity::performance_metric::Model> for PerformanceMetricDto {
    fn from(m: entity::performance_metric::Model) -> Self {
        Self {
            id: m.id,
            metric_name: m.metric_name,
            rating: m.rating,
            comments: m.comments,
            weight: m.weight,
        }
    }
}

pub struct PerformanceService<'a> {
    db: &'a DatabaseConnection,
    mailer: &'a Mailer,
}

impl<'a> PerformanceService<'a> {
    /// Creates a new instance of [`PerformanceService`]
    pub fn new(db: &'a DatabaseConnection, mailer: &'a Mailer) -> Self {
        Self { db, mailer }
    }

    pub async fn list_reviews(
        &self,
        user: &AuthUser,
        query: &PerformanceReviewQuery,
    ) -> Result<PerformanceReviewListDto, Error> {
        let page = Page::new(query.page, query.limit, DEFAULT_PAGE_SIZE);
        let filter = ReviewFilter {
            employee_id: user.scope_employee(query.employee_id),
            review_period: query.review_period.clone(),
            status: query.status,
            ..Default::default()
        };

        let (reviews, total) = PerformanceReviewRepository::new(self.db)
            .list(&filter, page.index(), page.limit)
            .await?;

        Ok(PerformanceReviewListDto {
            reviews: review_dtos(self.db, reviews).await?,
            pagination: page.to_dto(total),
        })
    }

    /// A review with its metrics. Employees outside management may only read their own.
    pub async fn get_review(
        &self,
        user: &AuthUser,
        id: i32,
    ) -> Result<PerformanceReviewDetailDto, Error> {
        let review = PerformanceReviewRepository::new(self.db)
            .get(id)
            .await?
            .ok_or_else(not_found)?;

        if !user.is_manager_or_hr() && review.employee_id != user.id {
            return Err(Error::Forbidden("Access denied".to_string()));
        }

        let metrics = PerformanceMetricRepository::new(self.db)
            .list_for_review(review.id)
            .await?;

        Ok(PerformanceReviewDetailDto {
            review: review_dto(self.db, review).await?,
            metrics: metrics.into_iter().map(PerformanceMetricDto::from).collect(),
        })
    }

    /// Records a Draft review, with the caller as reviewer, and notifies the employee.
    ///
    /// # Returns
    /// - `Ok(PerformanceReviewDto)` - The stored review
    /// - `Err(Error::NotFound)` - The employee does not exist
    /// - `Err(Error::Conflict)` - The employee already has a review for the period
    pub async fn create_review(
        &self,
        user: &AuthUser,
        request: &CreateReviewDto,
    ) -> Result<PerformanceReviewDto, Error> {
        user.require_manager()?;

        let employee = EmployeeRepository::new(self.db)
            .get(request.employee_id)
            .await?
            .ok_or_else(|| Error::NotFound("Employee not found".to_string()))?;

        if PerformanceReviewRepository::new(self.db)
            .find_by_period(request.employee_id, &request.review_period)
            .await?
            .is_some()
        {
            return Err(Error::Conflict(
                "Performance review already exists for this period".to_string(),
            ));
        }

        let txn = self.db.begin().await?;

        let review = PerformanceReviewRepository::new(&txn)
            .create(user.id, request)
            .await?;
        PerformanceMetricRepository::new(&txn)
            .create_many(review.id, &request.metrics)
            .await?;
        let dto = review_dto(&txn, review).await?;

        txn.commit().await?;

        let email = template::performance_review(
            &employee.email,
            &dto.review_period,
            dto.overall_rating,
            dto.review_date.date(),
        );
        NotificationService::new(self.db, self.mailer)
            .dispatch_best_effort(
                NewNotification {
                    recipient_id: employee.id,
                    sender_id: Some(user.id),
                    kind: kind::PERFORMANCE_REVIEW.to_string(),
                    title: "Performance Review Available".to_string(),
                    message: format!(
                        "Your performance review for {} has been recorded",
                        dto.review_period
                    ),
                    data: Some(json!({ "reviewId": dto.id })),
                    priority: NotificationPriority::Medium,
                },
                Some(email),
            )
            .await;

        Ok(dto)
    }

    /// Partially updates a review. Only its reviewer or HR may do so.
    pub async fn update_review(
        &self,
        user: &AuthUser,
        id: i32,
        changes: &UpdateReviewDto,
    ) -> Result<PerformanceReviewDto, Error> {
        user.require_manager()?;

        let review_repo = PerformanceReviewRepository::new(self.db);
        let review = review_repo.get(id).await?.ok_or_else(not_found)?;

        if review.reviewer_id != user.id && !user.is_hr() {
            return Err(Error::Forbidden(
                "Only the reviewer or HR can update this review".to_string(),
            ));
        }

        let updated = review_repo.update(review, changes).await?;

        review_dto(self.db, updated).await
    }

    /// Department averages, top performers and the monthly hours trend.
    ///
    /// Requires `view_all_reports` or `manage_team`. Ratings come from Published reviews dated
    /// inside the requested period.
    pub async fn analytics(
        &self,
        user: &AuthUser,
        query: &AnalyticsQuery,
    ) -> Result<PerformanceAnalyticsDto, Error> {
        user.require_any(&[permission::VIEW_ALL_REPORTS, permission::MANAGE_TEAM])?;

        let today = today();
        let since = period_start(query.period.unwrap_or_default(), today)?;

        let employees = EmployeeRepository::new(self.db)
            .list_all(&EmployeeFilter {
                department_id: query.department_id,
                ..Default::default()
            })
            .await?;
        let employee_ids: Vec<i32> = employees.iter().map(|e| e.id).collect();
        let department_ids: Vec<i32> = employees.iter().map(|e| e.department_id).collect();
        let departments = DepartmentRepository::new(self.db)
            .names_by_ids(&department_ids)
            .await?;

        let reviews = PerformanceReviewRepository::new(self.db)
            .list_all(&ReviewFilter {
                employee_ids: Some(employee_ids.clone()),
                status: Some(ReviewStatus::Published),
                reviewed_since: Some(start_of_day(since)),
                ..Default::default()
            })
            .await?;

        let logs: Vec<entity::work_log::Model> = WorkLogRepository::new(self.db)
            .list_all(&WorkLogFilter {
                employee_ids: Some(employee_ids),
                start_date: Some(months_before(today, analytics::TREND_MONTHS)?),
                ..Default::default()
            })
            .await?
            .into_iter()
            .map(|(log, _)| log)
            .collect();

        let employees: HashMap<i32, entity::employee::Model> =
            employees.into_iter().map(|e| (e.id, e)).collect();

        Ok(PerformanceAnalyticsDto {
            department_performance: analytics::department_performance(
                &reviews,
                &employees,
                &departments,
            ),
            top_performers: analytics::top_performers(&reviews, &employees, &departments),
            work_hours_trend: analytics::monthly_hours(&logs),
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::server::model::auth::AuthUser;

    pub(super) fn caller(employee: &entity::employee::Model, role_name: &str) -> AuthUser {
        AuthUser {
            id: employee.id,
            employee_code: employee.employee_code.clone(),
            first_name: employee.first_name.clone(),
            last_name: employee.last_name.clone(),
            email: employee.email.clone(),
            department_id: employee.department_id,
            department_name: None,
            manager_id: employee.manager_id,
            role_name: role_name.to_string(),
            permissions: Vec::new(),
        }
    }

    mod create_review {
        use entity::sea_orm_active_enums::ReviewStatus;
        use hrdesk_test_utils::prelude::*;
        use sea_orm::EntityTrait;

        use crate::{
            model::performance::{CreateMetricDto, CreateReviewDto},
            server::{
                error::Error, mail::Mailer, service::performance::PerformanceService,
            },
        };

        use super::caller;

        fn request(employee_id: i32) -> CreateReviewDto {
            CreateReviewDto {
                employee_id,
                review_period: "2025-Q1".to_string(),
                overall_rating: Some(4.0),
                goals: None,
                achievements: Some("Shipped payroll".to_string()),
                areas_for_improvement: None,
                feedback: None,
                metrics: vec![CreateMetricDto {
                    metric_name: "Delivery".to_string(),
                    rating: 4.5,
                    comments: None,
                    weight: 1.0,
                }],
            }
        }

        /// Expect a Draft review with its metrics and a notification for the employee
        #[tokio::test]
        async fn stores_review_with_metrics() -> Result<(), TestError> {
            let test = TestBuilder::new().with_hr_tables().build().await?;
            let (manager, _) = test.employee().insert_with_role("MGR001", "Manager", &[]).await?;
            let (employee, _) = test.employee().insert_with_role("EMP001", "Employee", &[]).await?;
            let mailer = Mailer::disabled();
            let service = PerformanceService::new(&test.db, &mailer);

            let review = service
                .create_review(&caller(&manager, "Manager"), &request(employee.id))
                .await
                .unwrap();
            let detail = service
                .get_review(&caller(&employee, "Employee"), review.id)
                .await
                .unwrap();

            assert_eq!(review.status, ReviewStatus::Draft);
            assert_eq!(review.reviewer_id, manager.id);
            assert_eq!(detail.metrics.len(), 1);
            assert_eq!(detail.metrics[0].metric_name, "Delivery");
            let notifications = entity::prelude::Notification::find().all(&test.db).await?;
            assert_eq!(notifications.len(), 1);
            assert_eq!(notifications[0].recipient_id, employee.id);

            Ok(())
        }

        /// Expect a second review for the same period to conflict
        #[tokio::test]
        async fn rejects_duplicate_period() -> Result<(), TestError> {
            let test = TestBuilder::new().with_hr_tables().build().await?;
            let (manager, _) = test.employee().insert_with_role("MGR001", "Manager", &[]).await?;
            let (employee, _) = test.employee().insert_with_role("EMP001", "Employee", &[]).await?;
            test.performance()
                .insert_review(employee.id, manager.id, "2025-Q1", 3.0, ReviewStatus::Draft)
                .await?;
            let mailer = Mailer::disabled();

            let result = PerformanceService::new(&test.db, &mailer)
                .create_review(&caller(&manager, "Manager"), &request(employee.id))
                .await;

            assert!(matches!(result, Err(Error::Conflict(_))));

            Ok(())
        }
    }

    mod get_review {
        use entity::sea_orm_active_enums::ReviewStatus;
        use hrdesk_test_utils::prelude::*;

        use crate::server::{error::Error, mail::Mailer, service::performance::PerformanceService};

        use super::caller;

        /// Expect employees to be refused another employee's review
        #[tokio::test]
        async fn hides_other_employees_reviews() -> Result<(), TestError> {
            let test = TestBuilder::new().with_hr_tables().build().await?;
            let (manager, _) = test.employee().insert_with_role("MGR001", "Manager", &[]).await?;
            let (alice, _) = test.employee().insert_with_role("EMP001", "Employee", &[]).await?;
            let (bob, _) = test.employee().insert_with_role("EMP002", "Employee", &[]).await?;
            let review = test
                .performance()
                .insert_review(alice.id, manager.id, "2025-Q1", 4.0, ReviewStatus::Published)
                .await?;
            let mailer = Mailer::disabled();

            let result = PerformanceService::new(&test.db, &mailer)
                .get_review(&caller(&bob, "Employee"), review.id)
                .await;

            assert!(matches!(result, Err(Error::Forbidden(_))));

            Ok(())
        }
    }

    mod update_review {
        use entity::sea_orm_active_enums::ReviewStatus;
        use hrdesk_test_utils::prelude::*;

        use crate::{
            model::performance::UpdateReviewDto,
            server::{error::Error, mail::Mailer, service::performance::PerformanceService},
        };

        use super::caller;

        /// Expect another manager to be refused while HR may update
        #[tokio::test]
        async fn restricts_to_reviewer_or_hr() -> Result<(), TestError> {
            let test = TestBuilder::new().with_hr_tables().build().await?;
            let (reviewer, _) = test.employee().insert_with_role("MGR001", "Manager", &[]).await?;
            let (other, _) = test.employee().insert_with_role("MGR002", "Manager", &[]).await?;
            let (hr, _) = test.employee().insert_with_role("HR001", "HR Manager", &[]).await?;
            let (employee, _) = test.employee().insert_with_role("EMP001", "Employee", &[]).await?;
            let review = test
                .performance()
                .insert_review(employee.id, reviewer.id, "2025-Q1", 3.0, ReviewStatus::Draft)
                .await?;
            let mailer = Mailer::disabled();
            let service = PerformanceService::new(&test.db, &mailer);
            let changes = UpdateReviewDto {
                status: Some(ReviewStatus::Published),
                ..Default::default()
            };

            let refused = service
                .update_review(&caller(&other, "Manager"), review.id, &changes)
                .await;
            let updated = service
                .update_review(&caller(&hr, "HR Manager"), review.id, &changes)
                .await
                .unwrap();

            assert!(matches!(refused, Err(Error::Forbidden(_))));
            assert_eq!(updated.status, ReviewStatus::Published);

            Ok(())
        }
    }
}
