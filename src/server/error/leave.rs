use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::server::error::error_response;

#[derive(Error, Debug)]
pub enum LeaveError {
    #[error("Leave type not found or no balance available")]
    NoBalance,
    #[error("Insufficient leave balance. Available: {available} days, Requested: {requested} days")]
    InsufficientBalance { available: i32, requested: i32 },
    #[error("Leave application not found or already processed")]
    NotPending,
}

impl IntoResponse for LeaveError {
    fn into_response(self) -> Response {
        let status = match self {
            Self::NoBalance | Self::InsufficientBalance { .. } => StatusCode::BAD_REQUEST,
            Self::NotPending => StatusCode::NOT_FOUND,
        };

        error_response(status, self.to_string())
    }
}
