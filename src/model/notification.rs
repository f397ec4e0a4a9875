use chrono::NaiveDateTime;
use entity::sea_orm_active_enums::NotificationPriority;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::model::api::PaginationDto;

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NotificationDto {
    pub id: i32,
    pub recipient_id: i32,
    pub sender_id: Option<i32>,
    #[serde(rename = "type")]
    pub kind: String,
    pub title: String,
    pub message: String,
    #[schema(value_type = Option<Object>)]
    pub data: Option<serde_json::Value>,
    #[schema(value_type = String)]
    pub priority: NotificationPriority,
    pub is_read: bool,
    pub read_at: Option<NaiveDateTime>,
    pub created_at: NaiveDateTime,
}

#[derive(Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NotificationListDto {
    pub notifications: Vec<NotificationDto>,
    pub pagination: PaginationDto,
    pub unread_count: u64,
}

#[derive(Clone, Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct NotificationQuery {
    pub page: Option<u64>,
    pub limit: Option<u64>,
    #[serde(default)]
    pub unread_only: bool,
}

#[derive(Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UnreadCountDto {
    pub unread_count: u64,
}

#[derive(Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MarkAllReadDto {
    pub message: String,
    pub updated_count: u64,
}

fn default_priority() -> NotificationPriority {
    NotificationPriority::Medium
}

#[derive(Clone, Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateNotificationDto {
    pub recipient_id: i32,
    #[serde(rename = "type")]
    #[validate(length(min = 1, max = 50, message = "must be 1-50 characters"))]
    pub kind: String,
    #[validate(length(min = 1, max = 255, message = "must be 1-255 characters"))]
    pub title: String,
    #[validate(length(min = 1, message = "is required"))]
    pub message: String,
    #[schema(value_type = Option<Object>)]
    pub data: Option<serde_json::Value>,
    #[serde(default = "default_priority")]
    #[schema(value_type = String)]
    pub priority: NotificationPriority,
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct NotificationResponseDto {
    pub message: String,
    pub notification: NotificationDto,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NotificationStatsDto {
    pub total: u64,
    pub unread: u64,
    pub high_priority_unread: u64,
    pub today: u64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum BulkAction {
    MarkRead,
    MarkUnread,
    Delete,
}

#[derive(Clone, Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BulkActionDto {
    #[validate(length(min = 1, message = "must contain at least one id"))]
    pub notification_ids: Vec<i32>,
    pub action: BulkAction,
}

#[derive(Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BulkActionResultDto {
    pub message: String,
    pub affected_count: u64,
}
