use chrono::{NaiveDate, NaiveDateTime};
use entity::sea_orm_active_enums::LeaveStatus;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::{Validate, ValidationError};

use crate::model::api::PaginationDto;

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LeaveApplicationDto {
    pub id: i32,
    pub employee_id: i32,
    pub employee_name: Option<String>,
    pub leave_type_id: i32,
    pub leave_type_name: Option<String>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub total_days: i32,
    pub reason: Option<String>,
    pub attachments: Vec<String>,
    #[schema(value_type = String)]
    pub status: LeaveStatus,
    pub applied_at: NaiveDateTime,
    pub approved_by: Option<i32>,
    pub approver_name: Option<String>,
    pub approved_at: Option<NaiveDateTime>,
    pub rejection_reason: Option<String>,
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct LeaveApplicationListDto {
    pub applications: Vec<LeaveApplicationDto>,
    pub pagination: PaginationDto,
}

#[derive(Clone, Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct LeaveApplicationQuery {
    pub page: Option<u64>,
    pub limit: Option<u64>,
    #[param(value_type = Option<String>)]
    pub status: Option<LeaveStatus>,
    pub employee_id: Option<i32>,
    pub leave_type_id: Option<i32>,
}

#[derive(Clone, Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_leave_dates"))]
pub struct SubmitLeaveDto {
    pub leave_type_id: i32,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[validate(length(max = 1000, message = "must be at most 1000 characters"))]
    pub reason: Option<String>,
    pub attachments: Option<Vec<String>>,
}

fn validate_leave_dates(dto: &SubmitLeaveDto) -> Result<(), ValidationError> {
    if dto.end_date < dto.start_date {
        return Err(ValidationError::new("date_range")
            .with_message("endDate must not be before startDate".into()));
    }

    Ok(())
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct SubmitLeaveResponseDto {
    pub message: String,
    pub application: LeaveApplicationDto,
}

/// The outcome a manager may record for a pending application
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum LeaveDecision {
    Approved,
    Rejected,
}

impl From<LeaveDecision> for LeaveStatus {
    fn from(decision: LeaveDecision) -> Self {
        match decision {
            LeaveDecision::Approved => LeaveStatus::Approved,
            LeaveDecision::Rejected => LeaveStatus::Rejected,
        }
    }
}

#[derive(Clone, Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_rejection_reason"))]
pub struct UpdateLeaveStatusDto {
    pub status: LeaveDecision,
    #[validate(length(max = 1000, message = "must be at most 1000 characters"))]
    pub rejection_reason: Option<String>,
}

fn validate_rejection_reason(dto: &UpdateLeaveStatusDto) -> Result<(), ValidationError> {
    let has_reason = dto
        .rejection_reason
        .as_deref()
        .is_some_and(|reason| !reason.trim().is_empty());

    if dto.status == LeaveDecision::Rejected && !has_reason {
        return Err(ValidationError::new("rejection_reason")
            .with_message("rejectionReason is required when rejecting".into()));
    }

    Ok(())
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct LeaveStatusResponseDto {
    pub message: String,
    pub application: LeaveApplicationDto,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LeaveBalanceDto {
    pub id: i32,
    pub employee_id: i32,
    pub leave_type_id: i32,
    pub leave_type_name: Option<String>,
    pub year: i32,
    pub total_days: i32,
    pub used_days: i32,
    pub carry_forward_days: i32,
    pub remaining_days: i32,
}

#[derive(Clone, Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct LeaveBalanceQuery {
    /// Only honoured for managers and HR
    pub employee_id: Option<i32>,
}

#[derive(Clone, Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct AllBalancesQuery {
    pub year: Option<i32>,
    pub department_id: Option<i32>,
}

/// Leave balances of a single employee
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeBalancesDto {
    pub employee_id: i32,
    pub employee_code: String,
    pub employee_name: String,
    pub department_name: Option<String>,
    pub balances: Vec<LeaveBalanceDto>,
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LeaveTypeDto {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub max_days_per_year: i32,
    pub carry_forward: bool,
    pub requires_approval: bool,
}
