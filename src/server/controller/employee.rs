use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::{
    model::{
        api::{ErrorDto, MessageDto, ValidationErrorDto},
        employee::{
            CreateEmployeeDto, DepartmentDto, EmployeeDto, EmployeeListDto, EmployeeListQuery,
            EmployeeResponseDto, RoleDto, UpdateEmployeeDto,
        },
    },
    server::{
        controller::util::valid_json::ValidJson,
        error::Error,
        model::{app::AppState, auth::AuthUser, permission},
        service::employee::EmployeeService,
    },
};

pub static EMPLOYEE_TAG: &str = "employee";

const READ_PERMISSIONS: [&str; 2] = [permission::MANAGE_EMPLOYEES, permission::VIEW_ALL_REPORTS];

/// List employees with search, filters, sorting and pagination
#[utoipa::path(
    get,
    path = "/api/employees",
    tag = EMPLOYEE_TAG,
    params(EmployeeListQuery),
    responses(
        (status = 200, description = "A page of employees", body = EmployeeListDto),
        (status = 401, description = "Missing or invalid token", body = ErrorDto),
        (status = 403, description = "Insufficient permissions", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn list_employees(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<EmployeeListQuery>,
) -> Result<impl IntoResponse, Error> {
    user.require_any(&READ_PERMISSIONS)?;

    let employees = EmployeeService::new(&state.db).list(&query).await?;

    Ok((StatusCode::OK, Json(employees)))
}

/// Get one employee
#[utoipa::path(
    get,
    path = "/api/employees/{id}",
    tag = EMPLOYEE_TAG,
    params(("id" = i32, Path, description = "Employee ID")),
    responses(
        (status = 200, description = "The employee", body = EmployeeDto),
        (status = 401, description = "Missing or invalid token", body = ErrorDto),
        (status = 403, description = "Insufficient permissions", body = ErrorDto),
        (status = 404, description = "Employee not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_employee(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    user.require_any(&READ_PERMISSIONS)?;

    let employee = EmployeeService::new(&state.db).get(id).await?;

    Ok((StatusCode::OK, Json(employee)))
}

/// Create an employee and seed their leave balances
///
/// # Responses
/// - 201 (Created): Employee stored with a balance for every leave type with an allowance
/// - 400 (Bad Request): Validation failed
/// - 409 (Conflict): Employee code or email already in use
#[utoipa::path(
    post,
    path = "/api/employees",
    tag = EMPLOYEE_TAG,
    request_body = CreateEmployeeDto,
    responses(
        (status = 201, description = "Employee created", body = EmployeeResponseDto),
        (status = 400, description = "Validation error", body = ValidationErrorDto),
        (status = 401, description = "Missing or invalid token", body = ErrorDto),
        (status = 403, description = "Insufficient permissions", body = ErrorDto),
        (status = 409, description = "Duplicate employee code or email", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_employee(
    State(state): State<AppState>,
    user: AuthUser,
    ValidJson(request): ValidJson<CreateEmployeeDto>,
) -> Result<impl IntoResponse, Error> {
    user.require_any(&[permission::MANAGE_EMPLOYEES])?;

    let employee = EmployeeService::new(&state.db)
        .create(Some(user.id), &request)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(EmployeeResponseDto {
            message: "Employee created successfully".to_string(),
            employee,
        }),
    ))
}

/// Partially update an employee
#[utoipa::path(
    put,
    path = "/api/employees/{id}",
    tag = EMPLOYEE_TAG,
    params(("id" = i32, Path, description = "Employee ID")),
    request_body = UpdateEmployeeDto,
    responses(
        (status = 200, description = "Employee updated", body = EmployeeResponseDto),
        (status = 400, description = "Validation error", body = ValidationErrorDto),
        (status = 401, description = "Missing or invalid token", body = ErrorDto),
        (status = 403, description = "Insufficient permissions", body = ErrorDto),
        (status = 404, description = "Employee not found", body = ErrorDto),
        (status = 409, description = "Duplicate employee code or email", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_employee(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<i32>,
    ValidJson(request): ValidJson<UpdateEmployeeDto>,
) -> Result<impl IntoResponse, Error> {
    user.require_any(&[permission::MANAGE_EMPLOYEES])?;

    let employee = EmployeeService::new(&state.db)
        .update(user.id, id, &request)
        .await?;

    Ok((
        StatusCode::OK,
        Json(EmployeeResponseDto {
            message: "Employee updated successfully".to_string(),
            employee,
        }),
    ))
}

/// Terminate an employee
///
/// The row is kept with status Terminated.
#[utoipa::path(
    delete,
    path = "/api/employees/{id}",
    tag = EMPLOYEE_TAG,
    params(("id" = i32, Path, description = "Employee ID")),
    responses(
        (status = 200, description = "Employee terminated", body = MessageDto),
        (status = 401, description = "Missing or invalid token", body = ErrorDto),
        (status = 403, description = "Insufficient permissions", body = ErrorDto),
        (status = 404, description = "Employee not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_employee(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    user.require_any(&[permission::MANAGE_EMPLOYEES])?;

    EmployeeService::new(&state.db).terminate(user.id, id).await?;

    Ok((
        StatusCode::OK,
        Json(MessageDto::new("Employee terminated successfully")),
    ))
}

/// List departments
#[utoipa::path(
    get,
    path = "/api/employees/meta/departments",
    tag = EMPLOYEE_TAG,
    responses(
        (status = 200, description = "All departments", body = Vec<DepartmentDto>),
        (status = 401, description = "Missing or invalid token", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn list_departments(
    State(state): State<AppState>,
    _user: AuthUser,
) -> Result<impl IntoResponse, Error> {
    let departments = EmployeeService::new(&state.db).departments().await?;

    Ok((StatusCode::OK, Json(departments)))
}

/// List roles with their permissions
#[utoipa::path(
    get,
    path = "/api/employees/meta/roles",
    tag = EMPLOYEE_TAG,
    responses(
        (status = 200, description = "All roles", body = Vec<RoleDto>),
        (status = 401, description = "Missing or invalid token", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn list_roles(
    State(state): State<AppState>,
    _user: AuthUser,
) -> Result<impl IntoResponse, Error> {
    let roles = EmployeeService::new(&state.db).roles().await?;

    Ok((StatusCode::OK, Json(roles)))
}
