//! Error types for the HRDesk server application.
//!
//! This module provides the error handling system with specialized error types for the
//! different domains (authentication, configuration, validation, leave, work logs, mail).
//! All errors implement `IntoResponse` for Axum HTTP responses and use `thiserror` for
//! `Display` and `Error` implementations. Every response body has the shape `{"error": "..."}`.

pub mod auth;
pub mod config;
pub mod leave;
pub mod mail;
pub mod validation;
pub mod work_log;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use sea_orm::{ConnAcquireErr, DbErr, SqlErr};
use thiserror::Error;

use crate::{
    model::api::ErrorDto,
    server::error::{
        auth::AuthError, config::ConfigError, leave::LeaveError, mail::MailError,
        validation::ValidationError, work_log::WorkLogError,
    },
};

/// Main error type for the HRDesk server application.
///
/// This enum aggregates all domain-specific error types and external library errors into a
/// single unified error type. `#[from]` conversions let handlers and services propagate any
/// of them with the `?` operator, and the `IntoResponse` implementation maps each to an HTTP
/// status code and JSON body.
///
/// # Error Categories
/// - Configuration errors (missing/invalid environment variables)
/// - Authentication and permission errors
/// - Request validation errors
/// - Leave and work log business rule violations
/// - Missing resources and conflicts
/// - External library errors (database, password hashing, spreadsheet, mail, scheduler)
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error (missing or invalid environment variables).
    #[error(transparent)]
    ConfigError(#[from] ConfigError),
    /// Authentication or authorization failure.
    #[error(transparent)]
    AuthError(#[from] AuthError),
    /// Request payload failed validation.
    #[error(transparent)]
    ValidationError(#[from] ValidationError),
    /// Leave balance or workflow rule violated.
    #[error(transparent)]
    LeaveError(#[from] LeaveError),
    /// Work log rule violated.
    #[error(transparent)]
    WorkLogError(#[from] WorkLogError),
    /// Outbound email could not be built or delivered.
    #[error(transparent)]
    MailError(#[from] MailError),
    /// Requested resource does not exist; the message is returned to the client.
    #[error("{0}")]
    NotFound(String),
    /// Request conflicts with existing data; the message is returned to the client.
    #[error("{0}")]
    Conflict(String),
    /// Caller may not act on this particular resource; the message is returned to the client.
    #[error("{0}")]
    Forbidden(String),
    /// Parse error (failed to parse a value from string or other format).
    #[error("Failed to parse value: {0:?}")]
    ParseError(String),
    /// Internal error indicating a bug in HRDesk's code.
    #[error("Internal error, this indicates a bug: {0:?}")]
    InternalError(String),
    /// Database error (query failures, connection issues, constraint violations).
    #[error(transparent)]
    DbErr(#[from] DbErr),
    /// Password hashing or verification failed unexpectedly.
    #[error("Password hashing error: {0}")]
    PasswordHashError(#[from] argon2::password_hash::Error),
    /// Spreadsheet rendering error.
    #[error(transparent)]
    XlsxError(#[from] rust_xlsxwriter::XlsxError),
    /// JSON (de)serialization error.
    #[error(transparent)]
    SerdeJsonError(#[from] serde_json::Error),
    /// Cron scheduler error (job registration, scheduler startup).
    #[error(transparent)]
    SchedulerError(#[from] tokio_cron_scheduler::JobSchedulerError),
    /// I/O error (binding the listener, serving requests).
    #[error(transparent)]
    IoError(#[from] std::io::Error),
}

impl From<validator::ValidationErrors> for Error {
    fn from(errors: validator::ValidationErrors) -> Self {
        Self::ValidationError(errors.into())
    }
}

/// Converts application errors into HTTP responses.
///
/// # Returns
/// - 400 Bad Request - Validation failures and leave/work log rule violations
/// - 401 Unauthorized / 403 Forbidden - Authentication and permission failures
/// - 404 Not Found - Missing resources
/// - 409 Conflict - Duplicates and foreign key violations
/// - 503 / 504 - Database connection failures and acquisition timeouts
/// - 500 Internal Server Error - For all other errors (with error logging)
impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Self::ConfigError(err) => err.into_response(),
            Self::AuthError(err) => err.into_response(),
            Self::ValidationError(err) => err.into_response(),
            Self::LeaveError(err) => err.into_response(),
            Self::WorkLogError(err) => err.into_response(),
            Self::NotFound(message) => {
                tracing::debug!("{}", message);

                error_response(StatusCode::NOT_FOUND, message)
            }
            Self::Conflict(message) => error_response(StatusCode::CONFLICT, message),
            Self::Forbidden(message) => {
                tracing::debug!("{}", message);

                error_response(StatusCode::FORBIDDEN, message)
            }
            Self::DbErr(err) => db_error_response(err),
            err => InternalServerError(err).into_response(),
        }
    }
}

/// Builds a `{"error": message}` response with the provided status.
pub fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (
        status,
        Json(ErrorDto {
            error: message.into(),
        }),
    )
        .into_response()
}

fn db_error_response(err: DbErr) -> Response {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(detail)) => {
            tracing::debug!(detail = %detail, "unique constraint violation");

            return error_response(
                StatusCode::CONFLICT,
                "Duplicate entry - record already exists",
            );
        }
        Some(SqlErr::ForeignKeyConstraintViolation(detail)) => {
            tracing::debug!(detail = %detail, "foreign key constraint violation");

            return error_response(
                StatusCode::CONFLICT,
                "Operation conflicts with related records",
            );
        }
        _ => {}
    }

    match err {
        DbErr::ConnectionAcquire(ConnAcquireErr::Timeout) => {
            tracing::error!("{}", err);

            error_response(StatusCode::GATEWAY_TIMEOUT, "Database timeout")
        }
        DbErr::ConnectionAcquire(_) | DbErr::Conn(_) => {
            tracing::error!("{}", err);

            error_response(StatusCode::SERVICE_UNAVAILABLE, "Database connection lost")
        }
        err => InternalServerError(err).into_response(),
    }
}

/// Wrapper type for converting any displayable error into a 500 Internal Server Error response.
///
/// This struct logs the error message and returns a generic "Internal server error" message
/// to the client to avoid leaking implementation details.
pub struct InternalServerError<E>(pub E);

impl<E: std::fmt::Display> IntoResponse for InternalServerError<E> {
    fn into_response(self) -> Response {
        tracing::error!("{}", self.0);

        error_response(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
    }
}
