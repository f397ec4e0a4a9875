use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Liveness information for the running process
#[derive(Serialize, Deserialize, ToSchema)]
pub struct HealthDto {
    /// Always "OK"
    pub status: String,
    /// Current time in RFC 3339 format
    pub timestamp: String,
    /// Seconds since the server started
    pub uptime: f64,
}
