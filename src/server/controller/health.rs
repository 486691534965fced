use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

use crate::{model::api::HealthDto, server::state::AppState};

/// Liveness check reporting seconds since startup.
pub async fn get_health(State(state): State<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(HealthDto {
            status: "Bot is running".to_string(),
            uptime: state.started_at.elapsed().as_secs_f64(),
        }),
    )
}
