use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::{
    model::{
        api::{ErrorDto, ValidationErrorDto},
        leave::{
            AllBalancesQuery, EmployeeBalancesDto, LeaveApplicationListDto, LeaveApplicationQuery,
            LeaveBalanceDto, LeaveBalanceQuery, LeaveDecision, LeaveStatusResponseDto,
            LeaveTypeDto, SubmitLeaveDto, SubmitLeaveResponseDto, UpdateLeaveStatusDto,
        },
    },
    server::{
        controller::util::valid_json::ValidJson,
        error::Error,
        model::{app::AppState, auth::AuthUser},
        service::leave::LeaveService,
    },
};

pub static LEAVE_TAG: &str = "leave";

/// List leave applications
///
/// Employees outside management and HR only see their own applications.
#[utoipa::path(
    get,
    path = "/api/leave/applications",
    tag = LEAVE_TAG,
    params(LeaveApplicationQuery),
    responses(
        (status = 200, description = "A page of applications, newest first", body = LeaveApplicationListDto),
        (status = 401, description = "Missing or invalid token", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn list_applications(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<LeaveApplicationQuery>,
) -> Result<impl IntoResponse, Error> {
    let applications = LeaveService::new(&state.db, &state.mailer)
        .list(&user, &query)
        .await?;

    Ok((StatusCode::OK, Json(applications)))
}

/// Submit a leave application
///
/// # Responses
/// - 201 (Created): Pending application stored, the caller's manager is notified
/// - 400 (Bad Request): Invalid dates, no balance, or not enough remaining days
#[utoipa::path(
    post,
    path = "/api/leave/applications",
    tag = LEAVE_TAG,
    request_body = SubmitLeaveDto,
    responses(
        (status = 201, description = "Application submitted", body = SubmitLeaveResponseDto),
        (status = 400, description = "Validation error or insufficient balance", body = ValidationErrorDto),
        (status = 401, description = "Missing or invalid token", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn submit_application(
    State(state): State<AppState>,
    user: AuthUser,
    ValidJson(request): ValidJson<SubmitLeaveDto>,
) -> Result<impl IntoResponse, Error> {
    let application = LeaveService::new(&state.db, &state.mailer)
        .submit(&user, &request)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(SubmitLeaveResponseDto {
            message: "Leave application submitted successfully".to_string(),
            application,
        }),
    ))
}

/// Approve or reject a pending application
///
/// # Responses
/// - 200 (OK): Decision recorded; approval charges the employee's balance
/// - 400 (Bad Request): Missing rejection reason or not enough remaining days
/// - 403 (Forbidden): Caller is not a manager
/// - 404 (Not Found): No pending application with that ID
#[utoipa::path(
    patch,
    path = "/api/leave/applications/{id}/status",
    tag = LEAVE_TAG,
    params(("id" = i32, Path, description = "Leave application ID")),
    request_body = UpdateLeaveStatusDto,
    responses(
        (status = 200, description = "Decision recorded", body = LeaveStatusResponseDto),
        (status = 400, description = "Validation error or insufficient balance", body = ValidationErrorDto),
        (status = 401, description = "Missing or invalid token", body = ErrorDto),
        (status = 403, description = "Manager access required", body = ErrorDto),
        (status = 404, description = "Application not found or already processed", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_application_status(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<i32>,
    ValidJson(request): ValidJson<UpdateLeaveStatusDto>,
) -> Result<impl IntoResponse, Error> {
    let application = LeaveService::new(&state.db, &state.mailer)
        .decide(&user, id, &request)
        .await?;

    let verb = match request.status {
        LeaveDecision::Approved => "approved",
        LeaveDecision::Rejected => "rejected",
    };

    Ok((
        StatusCode::OK,
        Json(LeaveStatusResponseDto {
            message: format!("Leave application {} successfully", verb),
            application,
        }),
    ))
}

/// Current-year leave balances of the caller, or of `employeeId` for managers and HR
#[utoipa::path(
    get,
    path = "/api/leave/balances",
    tag = LEAVE_TAG,
    params(LeaveBalanceQuery),
    responses(
        (status = 200, description = "Balances per leave type", body = Vec<LeaveBalanceDto>),
        (status = 401, description = "Missing or invalid token", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_balances(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<LeaveBalanceQuery>,
) -> Result<impl IntoResponse, Error> {
    let balances = LeaveService::new(&state.db, &state.mailer)
        .balances(&user, &query)
        .await?;

    Ok((StatusCode::OK, Json(balances)))
}

/// Balances of every active employee for a year
#[utoipa::path(
    get,
    path = "/api/leave/balances/all",
    tag = LEAVE_TAG,
    params(AllBalancesQuery),
    responses(
        (status = 200, description = "Balances grouped by employee", body = Vec<EmployeeBalancesDto>),
        (status = 401, description = "Missing or invalid token", body = ErrorDto),
        (status = 403, description = "Insufficient permissions", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_all_balances(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<AllBalancesQuery>,
) -> Result<impl IntoResponse, Error> {
    let balances = LeaveService::new(&state.db, &state.mailer)
        .all_balances(&user, &query)
        .await?;

    Ok((StatusCode::OK, Json(balances)))
}

/// List leave types
#[utoipa::path(
    get,
    path = "/api/leave/types",
    tag = LEAVE_TAG,
    responses(
        (status = 200, description = "The leave type catalog", body = Vec<LeaveTypeDto>),
        (status = 401, description = "Missing or invalid token", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn list_leave_types(
    State(state): State<AppState>,
    _user: AuthUser,
) -> Result<impl IntoResponse, Error> {
    let leave_types = LeaveService::new(&state.db, &state.mailer)
        .leave_types()
        .await?;

    Ok((StatusCode::OK, Json(leave_types)))
}
