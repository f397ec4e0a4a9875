use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::{
    model::{
        api::{ErrorDto, ValidationErrorDto},
        performance::{
            AnalyticsQuery, CreateReviewDto, PerformanceAnalyticsDto, PerformanceReviewDetailDto,
            PerformanceReviewListDto, PerformanceReviewQuery, ReviewResponseDto, UpdateReviewDto,
        },
    },
    server::{
        controller::util::valid_json::ValidJson,
        error::Error,
        model::{app::AppState, auth::AuthUser},
        service::performance::PerformanceService,
    },
};

pub static PERFORMANCE_TAG: &str = "performance";

/// List performance reviews
#[utoipa::path(
    get,
    path = "/api/performance/reviews",
    tag = PERFORMANCE_TAG,
    params(PerformanceReviewQuery),
    responses(
        (status = 200, description = "A page of reviews", body = PerformanceReviewListDto),
        (status = 401, description = "Missing or invalid token", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn list_reviews(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<PerformanceReviewQuery>,
) -> Result<impl IntoResponse, Error> {
    let reviews = PerformanceService::new(&state.db, &state.mailer)
        .list_reviews(&user, &query)
        .await?;

    Ok((StatusCode::OK, Json(reviews)))
}

/// Get a review with its metrics
#[utoipa::path(
    get,
    path = "/api/performance/reviews/{id}",
    tag = PERFORMANCE_TAG,
    params(("id" = i32, Path, description = "Performance review ID")),
    responses(
        (status = 200, description = "The review and its metrics", body = PerformanceReviewDetailDto),
        (status = 401, description = "Missing or invalid token", body = ErrorDto),
        (status = 403, description = "Review belongs to another employee", body = ErrorDto),
        (status = 404, description = "Review not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_review(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    let review = PerformanceService::new(&state.db, &state.mailer)
        .get_review(&user, id)
        .await?;

    Ok((StatusCode::OK, Json(review)))
}

/// Create a Draft review with its metrics
///
/// # Responses
/// - 201 (Created): Review stored and the employee notified
/// - 404 (Not Found): Employee does not exist
/// - 409 (Conflict): The employee already has a review for the period
#[utoipa::path(
    post,
    path = "/api/performance/reviews",
    tag = PERFORMANCE_TAG,
    request_body = CreateReviewDto,
    responses(
        (status = 201, description = "Review created", body = ReviewResponseDto),
        (status = 400, description = "Validation error", body = ValidationErrorDto),
        (status = 401, description = "Missing or invalid token", body = ErrorDto),
        (status = 403, description = "Manager access required", body = ErrorDto),
        (status = 404, description = "Employee not found", body = ErrorDto),
        (status = 409, description = "Review already exists for this period", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_review(
    State(state): State<AppState>,
    user: AuthUser,
    ValidJson(request): ValidJson<CreateReviewDto>,
) -> Result<impl IntoResponse, Error> {
    let review = PerformanceService::new(&state.db, &state.mailer)
        .create_review(&user, &request)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ReviewResponseDto {
            message: "Performance review created successfully".to_string(),
            review,
        }),
    ))
}

/// Partially update a review
#[utoipa::path(
    put,
    path = "/api/performance/reviews/{id}",
    tag = PERFORMANCE_TAG,
    params(("id" = i32, Path, description = "Performance review ID")),
    request_body = UpdateReviewDto,
    responses(
        (status = 200, description = "Review updated", body = ReviewResponseDto),
        (status = 400, description = "Validation error", body = ValidationErrorDto),
        (status = 401, description = "Missing or invalid token", body = ErrorDto),
        (status = 403, description = "Not the reviewer or HR", body = ErrorDto),
        (status = 404, description = "Review not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_review(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<i32>,
    ValidJson(request): ValidJson<UpdateReviewDto>,
) -> Result<impl IntoResponse, Error> {
    let review = PerformanceService::new(&state.db, &state.mailer)
        .update_review(&user, id, &request)
        .await?;

    Ok((
        StatusCode::OK,
        Json(ReviewResponseDto {
            message: "Performance review updated successfully".to_string(),
            review,
        }),
    ))
}

/// Performance analytics for a period
#[utoipa::path(
    get,
    path = "/api/performance/analytics",
    tag = PERFORMANCE_TAG,
    params(AnalyticsQuery),
    responses(
        (status = 200, description = "Department averages, top performers and hours trend", body = PerformanceAnalyticsDto),
        (status = 401, description = "Missing or invalid token", body = ErrorDto),
        (status = 403, description = "Insufficient permissions", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_analytics(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<AnalyticsQuery>,
) -> Result<impl IntoResponse, Error> {
    let analytics = PerformanceService::new(&state.db, &state.mailer)
        .analytics(&user, &query)
        .await?;

    Ok((StatusCode::OK, Json(analytics)))
}
