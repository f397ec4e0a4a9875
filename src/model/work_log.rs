use chrono::{NaiveDate, NaiveDateTime};
use entity::sea_orm_active_enums::{ProjectStatus, WorkLogStatus};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::model::api::PaginationDto;

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WorkLogDto {
    pub id: i32,
    pub employee_id: i32,
    pub project_id: Option<i32>,
    pub project_name: Option<String>,
    pub log_date: NaiveDate,
    pub hours_worked: f64,
    pub task_description: Option<String>,
    #[schema(value_type = String)]
    pub status: WorkLogStatus,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WorkLogListDto {
    pub work_logs: Vec<WorkLogDto>,
    pub pagination: PaginationDto,
}

#[derive(Clone, Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct WorkLogQuery {
    pub page: Option<u64>,
    pub limit: Option<u64>,
    pub employee_id: Option<i32>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub project_id: Option<i32>,
}

fn default_status() -> WorkLogStatus {
    WorkLogStatus::Completed
}

#[derive(Clone, Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateWorkLogDto {
    pub project_id: Option<i32>,
    pub log_date: NaiveDate,
    #[validate(range(min = 0.0, max = 24.0, message = "must be between 0 and 24"))]
    pub hours_worked: f64,
    #[validate(length(max = 1000, message = "must be at most 1000 characters"))]
    pub task_description: Option<String>,
    #[serde(default = "default_status")]
    #[schema(value_type = String)]
    pub status: WorkLogStatus,
}

#[derive(Clone, Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateWorkLogDto {
    pub project_id: Option<i32>,
    pub log_date: Option<NaiveDate>,
    #[validate(range(min = 0.0, max = 24.0, message = "must be between 0 and 24"))]
    pub hours_worked: Option<f64>,
    #[validate(length(max = 1000, message = "must be at most 1000 characters"))]
    pub task_description: Option<String>,
    #[schema(value_type = Option<String>)]
    pub status: Option<WorkLogStatus>,
}

#[derive(Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WorkLogResponseDto {
    pub message: String,
    pub work_log: WorkLogDto,
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProjectDto {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    #[schema(value_type = String)]
    pub status: ProjectStatus,
    pub manager_id: Option<i32>,
    pub department_id: Option<i32>,
}
