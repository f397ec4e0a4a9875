use std::time::Instant;

use axum::http::{header, HeaderValue, Method};
use sea_orm::DatabaseConnection;
use tower_http::cors::CorsLayer;

use crate::server::{
    config::Config,
    error::{config::ConfigError, Error},
    mail::Mailer,
    model::{app::AppState, auth::TokenSettings},
    service::seed::SeedService,
};

/// Connect to the database and run migrations
pub async fn connect_to_database(config: &Config) -> Result<DatabaseConnection, Error> {
    use migration::{Migrator, MigratorTrait};
    use sea_orm::{ConnectOptions, Database};

    let mut opt = ConnectOptions::new(&config.database_url);
    opt.sqlx_logging(false);

    let db = Database::connect(opt).await?;

    Migrator::up(&db, None).await?;

    Ok(db)
}

/// Build the SMTP mailer, or a logging-only mailer when no relay is configured
pub fn build_mailer(config: &Config) -> Result<Mailer, Error> {
    match &config.smtp {
        Some(smtp) => {
            let mailer = Mailer::from_config(smtp)?;
            tracing::info!(host = %smtp.host, port = smtp.port, "email delivery enabled");

            Ok(mailer)
        }
        None => {
            tracing::info!("SMTP_HOST not set, emails will only be logged");

            Ok(Mailer::disabled())
        }
    }
}

/// Seed reference data into an empty database and create the bootstrap administrator
pub async fn seed_database(db: &DatabaseConnection, config: &Config) -> Result<(), Error> {
    let seed_service = SeedService::new(db);

    seed_service.seed_reference_data().await?;

    if let Some(admin) = &config.admin {
        seed_service.bootstrap_admin(admin).await?;
    }

    Ok(())
}

/// CORS policy allowing the front-end origin to call the API with bearer tokens
pub fn cors_layer(config: &Config) -> Result<CorsLayer, Error> {
    let origin = HeaderValue::from_str(&config.frontend_url).map_err(|e| {
        ConfigError::InvalidEnvValue {
            var: "FRONTEND_URL".to_string(),
            reason: e.to_string(),
        }
    })?;

    Ok(CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
        ])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
        .allow_credentials(true))
}

/// Assemble the shared handler state
pub fn build_state(db: DatabaseConnection, config: &Config, mailer: Mailer) -> AppState {
    AppState {
        db,
        tokens: TokenSettings {
            secret: config.jwt_secret.clone(),
            expires_in_hours: config.jwt_expires_in_hours,
        },
        mailer,
        started_at: Instant::now(),
    }
}
