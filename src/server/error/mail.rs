use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::server::error::InternalServerError;

#[derive(Error, Debug)]
pub enum MailError {
    #[error("Invalid email address {address:?}: {source}")]
    InvalidAddress {
        address: String,
        source: lettre::address::AddressError,
    },
    #[error("Failed to build email: {0}")]
    Build(#[from] lettre::error::Error),
    #[error("Failed to deliver email: {0}")]
    Transport(#[from] lettre::transport::smtp::Error),
}

impl IntoResponse for MailError {
    fn into_response(self) -> Response {
        InternalServerError(self).into_response()
    }
}
