use std::time::Instant;

use sea_orm::DatabaseConnection;

use crate::server::{config::DEFAULT_JWT_EXPIRES_IN_HOURS, mail::Mailer, model::auth::TokenSettings};

#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub tokens: TokenSettings,
    pub mailer: Mailer,
    pub started_at: Instant,
}

/// Builds a state with email delivery disabled and the default token lifetime.
impl From<(DatabaseConnection, String)> for AppState {
    fn from((db, jwt_secret): (DatabaseConnection, String)) -> Self {
        Self {
            db,
            tokens: TokenSettings {
                secret: jwt_secret,
                expires_in_hours: DEFAULT_JWT_EXPIRES_IN_HOURS,
            },
            mailer: Mailer::disabled(),
            started_at: Instant::now(),
        }
    }
}
