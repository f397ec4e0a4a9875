//! HTTP controller endpoints for the HRDesk API.
//!
//! Each module holds the Axum handlers of one resource. Handlers resolve the caller with the
//! [`AuthUser`](crate::server::model::auth::AuthUser) extractor, validate bodies with
//! [`util::valid_json::ValidJson`], call a service and wrap its result in a JSON response.
//! Every handler carries a `utoipa` path annotation for the OpenAPI document.

pub mod auth;
pub mod employee;
pub mod health;
pub mod leave;
pub mod notification;
pub mod performance;
pub mod report;
pub mod util;
pub mod work_log;
