use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::server::error::{error_response, InternalServerError};

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Access token required")]
    MissingToken,
    #[error("Invalid token")]
    InvalidToken,
    #[error("Token expired")]
    TokenExpired,
    #[error("Invalid or inactive user")]
    AccountInactive,
    #[error("Invalid credentials")]
    InvalidCredentials,
    #[error("Account is not active")]
    AccountNotActive,
    #[error("Current password is incorrect")]
    IncorrectPassword,
    #[error("Insufficient permissions")]
    Forbidden,
    #[error("Manager access required")]
    ManagerRequired,
    #[error("Failed to encode access token: {0}")]
    TokenEncoding(#[source] jsonwebtoken::errors::Error),
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        match self {
            Self::MissingToken
            | Self::InvalidToken
            | Self::TokenExpired
            | Self::AccountInactive
            | Self::InvalidCredentials
            | Self::AccountNotActive => {
                tracing::debug!("{}", self);

                error_response(StatusCode::UNAUTHORIZED, self.to_string())
            }
            Self::IncorrectPassword => error_response(StatusCode::BAD_REQUEST, self.to_string()),
            Self::Forbidden | Self::ManagerRequired => {
                tracing::debug!("{}", self);

                error_response(StatusCode::FORBIDDEN, self.to_string())
            }
            Self::TokenEncoding(_) => InternalServerError(self).into_response(),
        }
    }
}
