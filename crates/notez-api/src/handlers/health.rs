//! Health check handler.

use axum::Json;
use axum::extract::State;

use crate::dto::response::{ApiResponse, HealthResponse};
use crate::state::AppState;

/// GET /health
pub async fn health(State(state): State<AppState>) -> Json<ApiResponse<HealthResponse>> {
    let (status, database) = match &state.db_pool {
        Some(pool) => match pool.health_check().await {
            Ok(true) => ("ok", "connected"),
            Ok(false) | Err(_) => ("degraded", "unreachable"),
        },
        None => ("ok", "in-memory"),
    };

    Json(ApiResponse::ok(HealthResponse {
        status: status.to_string(),
        database: database.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    }))
}
