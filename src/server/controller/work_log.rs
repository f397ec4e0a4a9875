use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::{
    model::{
        api::{ErrorDto, MessageDto, ValidationErrorDto},
        work_log::{
            CreateWorkLogDto, ProjectDto, UpdateWorkLogDto, WorkLogListDto, WorkLogQuery,
            WorkLogResponseDto,
        },
    },
    server::{
        controller::util::valid_json::ValidJson,
        error::Error,
        model::{app::AppState, auth::AuthUser},
        service::work_log::WorkLogService,
    },
};

pub static WORK_LOG_TAG: &str = "work-log";

/// List work logs
#[utoipa::path(
    get,
    path = "/api/performance/work-logs",
    tag = WORK_LOG_TAG,
    params(WorkLogQuery),
    responses(
        (status = 200, description = "A page of work logs, newest first", body = WorkLogListDto),
        (status = 401, description = "Missing or invalid token", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn list_work_logs(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<WorkLogQuery>,
) -> Result<impl IntoResponse, Error> {
    let logs = WorkLogService::new(&state.db).list(&user, &query).await?;

    Ok((StatusCode::OK, Json(logs)))
}

/// Log hours for the caller
///
/// # Responses
/// - 201 (Created): Entry stored
/// - 400 (Bad Request): Validation failed or the day would exceed 24 hours
#[utoipa::path(
    post,
    path = "/api/performance/work-logs",
    tag = WORK_LOG_TAG,
    request_body = CreateWorkLogDto,
    responses(
        (status = 201, description = "Work log created", body = WorkLogResponseDto),
        (status = 400, description = "Validation error or daily limit exceeded", body = ValidationErrorDto),
        (status = 401, description = "Missing or invalid token", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_work_log(
    State(state): State<AppState>,
    user: AuthUser,
    ValidJson(request): ValidJson<CreateWorkLogDto>,
) -> Result<impl IntoResponse, Error> {
    let work_log = WorkLogService::new(&state.db).create(&user, &request).await?;

    Ok((
        StatusCode::CREATED,
        Json(WorkLogResponseDto {
            message: "Work log created successfully".to_string(),
            work_log,
        }),
    ))
}

/// Partially update a work log
#[utoipa::path(
    put,
    path = "/api/performance/work-logs/{id}",
    tag = WORK_LOG_TAG,
    params(("id" = i32, Path, description = "Work log ID")),
    request_body = UpdateWorkLogDto,
    responses(
        (status = 200, description = "Work log updated", body = WorkLogResponseDto),
        (status = 400, description = "Validation error or daily limit exceeded", body = ValidationErrorDto),
        (status = 401, description = "Missing or invalid token", body = ErrorDto),
        (status = 403, description = "Entry belongs to another employee", body = ErrorDto),
        (status = 404, description = "Work log not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_work_log(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<i32>,
    ValidJson(request): ValidJson<UpdateWorkLogDto>,
) -> Result<impl IntoResponse, Error> {
    let work_log = WorkLogService::new(&state.db)
        .update(&user, id, &request)
        .await?;

    Ok((
        StatusCode::OK,
        Json(WorkLogResponseDto {
            message: "Work log updated successfully".to_string(),
            work_log,
        }),
    ))
}

/// Delete a work log
#[utoipa::path(
    delete,
    path = "/api/performance/work-logs/{id}",
    tag = WORK_LOG_TAG,
    params(("id" = i32, Path, description = "Work log ID")),
    responses(
        (status = 200, description = "Work log deleted", body = MessageDto),
        (status = 401, description = "Missing or invalid token", body = ErrorDto),
        (status = 403, description = "Entry belongs to another employee", body = ErrorDto),
        (status = 404, description = "Work log not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_work_log(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    WorkLogService::new(&state.db).delete(&user, id).await?;

    Ok((StatusCode::OK, Json(MessageDto::new("Work log deleted successfully"))))
}

/// List active projects
#[utoipa::path(
    get,
    path = "/api/performance/projects",
    tag = WORK_LOG_TAG,
    responses(
        (status = 200, description = "Active projects", body = Vec<ProjectDto>),
        (status = 401, description = "Missing or invalid token", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn list_projects(
    State(state): State<AppState>,
    _user: AuthUser,
) -> Result<impl IntoResponse, Error> {
    let projects = WorkLogService::new(&state.db).projects().await?;

    Ok((StatusCode::OK, Json(projects)))
}
