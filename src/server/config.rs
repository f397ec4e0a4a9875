//! Environment-driven server configuration.

use std::str::FromStr;

use crate::server::error::config::ConfigError;

/// Default lifetime of an issued access token.
pub const DEFAULT_JWT_EXPIRES_IN_HOURS: i64 = 24;
/// Default HTTP listen port.
pub const DEFAULT_PORT: u16 = 5000;
/// Default origin allowed by CORS.
pub const DEFAULT_FRONTEND_URL: &str = "http://localhost:3000";
/// Default SMTP submission port.
pub const DEFAULT_SMTP_PORT: u16 = 587;

/// SMTP relay settings. Present only when `SMTP_HOST` is set.
#[derive(Clone, Debug)]
pub struct SmtpConfig {
    /// Relay host name.
    pub host: String,
    /// Relay port; 465 selects implicit TLS, anything else STARTTLS.
    pub port: u16,
    /// Optional login user.
    pub user: Option<String>,
    /// Optional login password.
    pub password: Option<String>,
    /// Address mail is sent from.
    pub from: String,
}

/// Credentials of the administrator created on an empty database.
#[derive(Clone, Debug)]
pub struct AdminBootstrap {
    /// Login email of the administrator.
    pub email: String,
    /// Initial password of the administrator.
    pub password: String,
}

/// Server configuration read from the process environment.
#[derive(Clone, Debug)]
pub struct Config {
    /// PostgreSQL connection string.
    pub database_url: String,
    /// Secret used to sign access tokens.
    pub jwt_secret: String,
    /// Token lifetime in hours.
    pub jwt_expires_in_hours: i64,
    /// HTTP listen port.
    pub port: u16,
    /// Origin allowed by CORS.
    pub frontend_url: String,
    /// Outbound mail relay, `None` disables email delivery.
    pub smtp: Option<SmtpConfig>,
    /// Administrator to create when no such account exists.
    pub admin: Option<AdminBootstrap>,
}

impl Config {
    /// Reads the configuration from environment variables.
    ///
    /// # Returns
    /// - `Ok(Config)` - All required variables present and parseable
    /// - `Err(ConfigError::MissingEnvVar)` - `DATABASE_URL` or `JWT_SECRET` is unset
    /// - `Err(ConfigError::InvalidEnvValue)` - A numeric variable could not be parsed
    /// - `Err(ConfigError::IncompletePair)` - Only one of `ADMIN_EMAIL` / `ADMIN_PASSWORD` is set
    pub fn from_env() -> Result<Self, ConfigError> {
        let smtp = match optional("SMTP_HOST") {
            Some(host) => {
                let user = optional("SMTP_USER");
                let from = optional("SMTP_FROM")
                    .or_else(|| user.clone())
                    .ok_or_else(|| ConfigError::MissingEnvVar("SMTP_FROM".to_string()))?;

                Some(SmtpConfig {
                    host,
                    port: parse_or("SMTP_PORT", DEFAULT_SMTP_PORT)?,
                    user,
                    password: optional("SMTP_PASS"),
                    from,
                })
            }
            None => None,
        };

        let admin = match (optional("ADMIN_EMAIL"), optional("ADMIN_PASSWORD")) {
            (Some(email), Some(password)) => Some(AdminBootstrap { email, password }),
            (Some(_), None) => {
                return Err(ConfigError::IncompletePair {
                    set: "ADMIN_EMAIL",
                    missing: "ADMIN_PASSWORD",
                })
            }
            (None, Some(_)) => {
                return Err(ConfigError::IncompletePair {
                    set: "ADMIN_PASSWORD",
                    missing: "ADMIN_EMAIL",
                })
            }
            (None, None) => None,
        };

        Ok(Self {
            database_url: required("DATABASE_URL")?,
            jwt_secret: required("JWT_SECRET")?,
            jwt_expires_in_hours: parse_or("JWT_EXPIRES_IN_HOURS", DEFAULT_JWT_EXPIRES_IN_HOURS)?,
            port: parse_or("PORT", DEFAULT_PORT)?,
            frontend_url: optional("FRONTEND_URL")
                .unwrap_or_else(|| DEFAULT_FRONTEND_URL.to_string()),
            smtp,
            admin,
        })
    }
}

fn required(var: &str) -> Result<String, ConfigError> {
    optional(var).ok_or_else(|| ConfigError::MissingEnvVar(var.to_string()))
}

fn optional(var: &str) -> Option<String> {
    std::env::var(var).ok().filter(|value| !value.is_empty())
}

fn parse_or<T>(var: &str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match optional(var) {
        Some(value) => value.parse().map_err(|e: T::Err| ConfigError::InvalidEnvValue {
            var: var.to_string(),
            reason: e.to_string(),
        }),
        None => Ok(default),
    }
}
