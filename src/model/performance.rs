use chrono::NaiveDateTime;
use entity::sea_orm_active_enums::ReviewStatus;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::model::api::PaginationDto;

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceReviewDto {
    pub id: i32,
    pub employee_id: i32,
    pub employee_name: Option<String>,
    pub reviewer_id: i32,
    pub reviewer_name: Option<String>,
    pub review_period: String,
    pub overall_rating: Option<f64>,
    pub goals: Option<String>,
    pub achievements: Option<String>,
    pub areas_for_improvement: Option<String>,
    pub feedback: Option<String>,
    pub employee_comments: Option<String>,
    #[schema(value_type = String)]
    pub status: ReviewStatus,
    pub review_date: NaiveDateTime,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceMetricDto {
    pub id: i32,
    pub metric_name: String,
    pub rating: f64,
    pub comments: Option<String>,
    pub weight: f64,
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceReviewDetailDto {
    #[serde(flatten)]
    pub review: PerformanceReviewDto,
    pub metrics: Vec<PerformanceMetricDto>,
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct PerformanceReviewListDto {
    pub reviews: Vec<PerformanceReviewDto>,
    pub pagination: PaginationDto,
}

#[derive(Clone, Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct PerformanceReviewQuery {
    pub page: Option<u64>,
    pub limit: Option<u64>,
    pub employee_id: Option<i32>,
    pub review_period: Option<String>,
    #[param(value_type = Option<String>)]
    pub status: Option<ReviewStatus>,
}

fn default_weight() -> f64 {
    1.0
}

#[derive(Clone, Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateMetricDto {
    #[validate(length(min = 1, max = 100, message = "must be 1-100 characters"))]
    pub metric_name: String,
    #[validate(range(min = 1.0, max = 5.0, message = "must be between 1 and 5"))]
    pub rating: f64,
    #[validate(length(max = 500, message = "must be at most 500 characters"))]
    pub comments: Option<String>,
    #[serde(default = "default_weight")]
    #[validate(range(min = 0.0, max = 1.0, message = "must be between 0 and 1"))]
    pub weight: f64,
}

#[derive(Clone, Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateReviewDto {
    pub employee_id: i32,
    #[validate(length(min = 1, max = 50, message = "must be 1-50 characters"))]
    pub review_period: String,
    #[validate(range(min = 1.0, max = 5.0, message = "must be between 1 and 5"))]
    pub overall_rating: Option<f64>,
    pub goals: Option<String>,
    pub achievements: Option<String>,
    pub areas_for_improvement: Option<String>,
    pub feedback: Option<String>,
    #[serde(default)]
    #[validate(nested)]
    pub metrics: Vec<CreateMetricDto>,
}

/// Fields a reviewer may revise. Absent fields are left untouched.
#[derive(Clone, Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateReviewDto {
    #[validate(range(min = 1.0, max = 5.0, message = "must be between 1 and 5"))]
    pub overall_rating: Option<f64>,
    pub goals: Option<String>,
    pub achievements: Option<String>,
    pub areas_for_improvement: Option<String>,
    pub feedback: Option<String>,
    pub employee_comments: Option<String>,
    #[schema(value_type = Option<String>)]
    pub status: Option<ReviewStatus>,
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct ReviewResponseDto {
    pub message: String,
    pub review: PerformanceReviewDto,
}

/// Window that analytics and reports are computed over
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "kebab-case")]
pub enum ReportPeriod {
    CurrentMonth,
    #[default]
    CurrentQuarter,
    CurrentYear,
}

#[derive(Clone, Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct AnalyticsQuery {
    pub department_id: Option<i32>,
    #[param(value_type = Option<String>)]
    pub period: Option<ReportPeriod>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DepartmentPerformanceDto {
    pub department_id: i32,
    pub department_name: String,
    pub average_rating: f64,
    pub review_count: u64,
    pub employee_count: u64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TopPerformerDto {
    pub employee_id: i32,
    pub employee_code: String,
    pub employee_name: String,
    pub department_name: Option<String>,
    pub average_rating: f64,
    pub review_count: u64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyHoursDto {
    /// Month formatted as `YYYY-MM`
    pub month: String,
    pub total_hours: f64,
    pub average_hours: f64,
    pub employee_count: u64,
}

#[derive(Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceAnalyticsDto {
    pub department_performance: Vec<DepartmentPerformanceDto>,
    pub top_performers: Vec<TopPerformerDto>,
    pub work_hours_trend: Vec<MonthlyHoursDto>,
}
