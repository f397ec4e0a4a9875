use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};

use crate::{
    model::{
        api::{ErrorDto, ValidationErrorDto},
        report::{GenerateReportDto, ReportAnalyticsDto, ReportTemplateDto},
    },
    server::{
        controller::util::valid_json::ValidJson,
        error::Error,
        model::{app::AppState, auth::AuthUser, permission},
        service::report::{self, ReportService},
    },
};

pub static REPORT_TAG: &str = "report";

/// List the reports that can be generated
#[utoipa::path(
    get,
    path = "/api/reports/templates",
    tag = REPORT_TAG,
    responses(
        (status = 200, description = "Report catalog", body = Vec<ReportTemplateDto>),
        (status = 401, description = "Missing or invalid token", body = ErrorDto),
        (status = 403, description = "Insufficient permissions", body = ErrorDto)
    ),
)]
pub async fn list_templates(user: AuthUser) -> Result<impl IntoResponse, Error> {
    user.require_any(&[permission::VIEW_ALL_REPORTS])?;

    Ok((StatusCode::OK, Json(report::templates())))
}

/// Generate a report as a PDF or spreadsheet attachment
///
/// # Responses
/// - 200 (OK): The file, with `Content-Disposition: attachment`
/// - 404 (Not Found): Unknown report
#[utoipa::path(
    post,
    path = "/api/reports/generate/{report}",
    tag = REPORT_TAG,
    params(("report" = String, Path, description = "employee-performance, leave-usage, work-hours or employee-directory")),
    request_body = GenerateReportDto,
    responses(
        (status = 200, description = "Generated file", content_type = "application/octet-stream"),
        (status = 400, description = "Invalid request body", body = ValidationErrorDto),
        (status = 401, description = "Missing or invalid token", body = ErrorDto),
        (status = 403, description = "Insufficient permissions", body = ErrorDto),
        (status = 404, description = "Report type not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn generate_report(
    State(state): State<AppState>,
    user: AuthUser,
    Path(report): Path<String>,
    ValidJson(request): ValidJson<GenerateReportDto>,
) -> Result<impl IntoResponse, Error> {
    let generated = ReportService::new(&state.db)
        .generate(&user, &report, &request)
        .await?;

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, generated.content_type.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", generated.filename),
            ),
        ],
        generated.bytes,
    ))
}

/// Reporting dashboard figures
#[utoipa::path(
    get,
    path = "/api/reports/analytics",
    tag = REPORT_TAG,
    responses(
        (status = 200, description = "Department summary, leave utilization and hours trend", body = ReportAnalyticsDto),
        (status = 401, description = "Missing or invalid token", body = ErrorDto),
        (status = 403, description = "Insufficient permissions", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_analytics(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<impl IntoResponse, Error> {
    let analytics = ReportService::new(&state.db).analytics(&user).await?;

    Ok((StatusCode::OK, Json(analytics)))
}
