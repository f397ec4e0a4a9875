use chrono::NaiveDate;
use entity::sea_orm_active_enums::EmployeeStatus;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::model::performance::{MonthlyHoursDto, ReportPeriod};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum ReportFormat {
    #[default]
    #[serde(rename = "PDF")]
    Pdf,
    Excel,
}

impl ReportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            Self::Pdf => "pdf",
            Self::Excel => "xlsx",
        }
    }

    pub fn content_type(self) -> &'static str {
        match self {
            Self::Pdf => "application/pdf",
            Self::Excel => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        }
    }
}

/// Reports that can be generated, keyed by their URL slug
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "kebab-case")]
pub enum ReportKind {
    EmployeePerformance,
    LeaveUsage,
    WorkHours,
    EmployeeDirectory,
}

impl ReportKind {
    pub const ALL: [ReportKind; 4] = [
        Self::EmployeePerformance,
        Self::LeaveUsage,
        Self::WorkHours,
        Self::EmployeeDirectory,
    ];

    pub fn slug(self) -> &'static str {
        match self {
            Self::EmployeePerformance => "employee-performance",
            Self::LeaveUsage => "leave-usage",
            Self::WorkHours => "work-hours",
            Self::EmployeeDirectory => "employee-directory",
        }
    }

    pub fn from_slug(slug: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.slug() == slug)
    }

    /// Attachment file name without extension
    pub fn file_stem(self) -> &'static str {
        match self {
            Self::EmployeePerformance => "performance-report",
            Self::LeaveUsage => "leave-usage-report",
            Self::WorkHours => "work-hours-report",
            Self::EmployeeDirectory => "employee-directory-report",
        }
    }
}

/// Body of a report generation request. Filters that do not apply to the requested report are ignored.
#[derive(Clone, Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GenerateReportDto {
    #[serde(default)]
    pub format: ReportFormat,
    pub department_id: Option<i32>,
    pub employee_id: Option<i32>,
    pub period: Option<ReportPeriod>,
    pub year: Option<i32>,
    pub leave_type_id: Option<i32>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub project_id: Option<i32>,
    #[schema(value_type = Option<String>)]
    pub status: Option<EmployeeStatus>,
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct ReportParameterDto {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub required: bool,
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct ReportTemplateDto {
    pub id: String,
    pub name: String,
    pub description: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub formats: Vec<String>,
    pub parameters: Vec<ReportParameterDto>,
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DepartmentSummaryDto {
    pub department_id: i32,
    pub department_name: String,
    pub active_employees: u64,
    pub average_rating: Option<f64>,
    pub total_hours_last_month: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LeaveUtilizationDto {
    pub leave_type_id: i32,
    pub leave_type_name: String,
    pub total_days: i64,
    pub used_days: i64,
    pub utilization_rate: f64,
}

#[derive(Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReportAnalyticsDto {
    pub department_summary: Vec<DepartmentSummaryDto>,
    pub leave_utilization: Vec<LeaveUtilizationDto>,
    pub work_hours_trend: Vec<MonthlyHoursDto>,
}
