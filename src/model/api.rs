use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize)]
pub struct ErrorDto {
    pub error: String,
}

/// Liveness payload returned by `GET /`.
#[derive(Serialize, Deserialize)]
pub struct HealthDto {
    pub status: String,
    /// Seconds since the process started.
    pub uptime: f64,
}
