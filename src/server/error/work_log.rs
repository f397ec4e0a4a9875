use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use rust_decimal::Decimal;
use thiserror::Error;

use crate::server::error::error_response;

#[derive(Error, Debug)]
pub enum WorkLogError {
    #[error("Total hours for the day cannot exceed 24. Current: {logged}, Adding: {requested}")]
    DailyHoursExceeded { logged: Decimal, requested: Decimal },
}

impl IntoResponse for WorkLogError {
    fn into_response(self) -> Response {
        error_response(StatusCode::BAD_REQUEST, self.to_string())
    }
}
