use thiserror::Error;

#[derive(Error, Debug)]
pub enum TestError {
    #[error(transparent)]
    DbErr(#[from] sea_orm::DbErr),
    #[error("Failed to hash fixture password: {0}")]
    PasswordHash(String),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
