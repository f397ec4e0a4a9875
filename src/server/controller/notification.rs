use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::{
    model::{
        api::{ErrorDto, MessageDto, ValidationErrorDto},
        notification::{
            BulkActionDto, BulkActionResultDto, CreateNotificationDto, MarkAllReadDto,
            NotificationListDto, NotificationQuery, NotificationResponseDto,
            NotificationStatsDto, UnreadCountDto,
        },
    },
    server::{
        controller::util::valid_json::ValidJson,
        error::Error,
        model::{app::AppState, auth::AuthUser},
        service::notification::NotificationService,
    },
};

pub static NOTIFICATION_TAG: &str = "notification";

/// List the caller's notifications, newest first
#[utoipa::path(
    get,
    path = "/api/notifications",
    tag = NOTIFICATION_TAG,
    params(NotificationQuery),
    responses(
        (status = 200, description = "A page of notifications with the unread count", body = NotificationListDto),
        (status = 401, description = "Missing or invalid token", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn list_notifications(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<NotificationQuery>,
) -> Result<impl IntoResponse, Error> {
    let notifications = NotificationService::new(&state.db, &state.mailer)
        .list(&user, &query)
        .await?;

    Ok((StatusCode::OK, Json(notifications)))
}

/// Count the caller's unread notifications
#[utoipa::path(
    get,
    path = "/api/notifications/unread-count",
    tag = NOTIFICATION_TAG,
    responses(
        (status = 200, description = "Unread count", body = UnreadCountDto),
        (status = 401, description = "Missing or invalid token", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn unread_count(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<impl IntoResponse, Error> {
    let unread_count = NotificationService::new(&state.db, &state.mailer)
        .unread_count(&user)
        .await?;

    Ok((StatusCode::OK, Json(UnreadCountDto { unread_count })))
}

/// Mark one of the caller's notifications as read
#[utoipa::path(
    patch,
    path = "/api/notifications/{id}/read",
    tag = NOTIFICATION_TAG,
    params(("id" = i32, Path, description = "Notification ID")),
    responses(
        (status = 200, description = "Marked as read", body = MessageDto),
        (status = 401, description = "Missing or invalid token", body = ErrorDto),
        (status = 404, description = "Notification not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn mark_read(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    let message = NotificationService::new(&state.db, &state.mailer)
        .mark_read(&user, id)
        .await?;

    Ok((StatusCode::OK, Json(message)))
}

/// Mark every notification of the caller as read
#[utoipa::path(
    patch,
    path = "/api/notifications/mark-all-read",
    tag = NOTIFICATION_TAG,
    responses(
        (status = 200, description = "Notifications updated", body = MarkAllReadDto),
        (status = 401, description = "Missing or invalid token", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn mark_all_read(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<impl IntoResponse, Error> {
    let result = NotificationService::new(&state.db, &state.mailer)
        .mark_all_read(&user)
        .await?;

    Ok((StatusCode::OK, Json(result)))
}

/// Delete one of the caller's notifications
#[utoipa::path(
    delete,
    path = "/api/notifications/{id}",
    tag = NOTIFICATION_TAG,
    params(("id" = i32, Path, description = "Notification ID")),
    responses(
        (status = 200, description = "Notification deleted", body = MessageDto),
        (status = 401, description = "Missing or invalid token", body = ErrorDto),
        (status = 404, description = "Notification not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_notification(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    let message = NotificationService::new(&state.db, &state.mailer)
        .delete(&user, id)
        .await?;

    Ok((StatusCode::OK, Json(message)))
}

/// Send a notification to an employee
#[utoipa::path(
    post,
    path = "/api/notifications",
    tag = NOTIFICATION_TAG,
    request_body = CreateNotificationDto,
    responses(
        (status = 201, description = "Notification created", body = NotificationResponseDto),
        (status = 400, description = "Validation error", body = ValidationErrorDto),
        (status = 401, description = "Missing or invalid token", body = ErrorDto),
        (status = 403, description = "Insufficient permissions", body = ErrorDto),
        (status = 404, description = "Recipient not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_notification(
    State(state): State<AppState>,
    user: AuthUser,
    ValidJson(request): ValidJson<CreateNotificationDto>,
) -> Result<impl IntoResponse, Error> {
    let notification = NotificationService::new(&state.db, &state.mailer)
        .create(&user, request)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(NotificationResponseDto {
            message: "Notification created successfully".to_string(),
            notification,
        }),
    ))
}

/// Notification counters for the caller
#[utoipa::path(
    get,
    path = "/api/notifications/stats",
    tag = NOTIFICATION_TAG,
    responses(
        (status = 200, description = "Counters", body = NotificationStatsDto),
        (status = 401, description = "Missing or invalid token", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_stats(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<impl IntoResponse, Error> {
    let stats = NotificationService::new(&state.db, &state.mailer)
        .stats(&user)
        .await?;

    Ok((StatusCode::OK, Json(stats)))
}

/// Apply one action to several of the caller's notifications
#[utoipa::path(
    post,
    path = "/api/notifications/bulk-action",
    tag = NOTIFICATION_TAG,
    request_body = BulkActionDto,
    responses(
        (status = 200, description = "Action applied", body = BulkActionResultDto),
        (status = 400, description = "Empty id list or unknown action", body = ValidationErrorDto),
        (status = 401, description = "Missing or invalid token", body = ErrorDto),
        (status = 403, description = "Some notifications belong to someone else", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn bulk_action(
    State(state): State<AppState>,
    user: AuthUser,
    ValidJson(request): ValidJson<BulkActionDto>,
) -> Result<impl IntoResponse, Error> {
    let result = NotificationService::new(&state.db, &state.mailer)
        .bulk_action(&user, &request)
        .await?;

    Ok((StatusCode::OK, Json(result)))
}
