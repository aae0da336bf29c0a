use axum::Json;
use axum::extract::State;
use axum::http::Uri;

use crate::error::AppError;
use crate::models::system::DebugInfoResponse;
use crate::state::AppState;

/// Only routed when `logging.debug` is enabled.
#[utoipa::path(
    get,
    path = "/debug-info",
    tag = "System",
    operation_id = "debugInfo",
    summary = "Debug status",
    responses(
        (status = 200, description = "Debug mode is on", body = DebugInfoResponse),
    ),
)]
pub async fn debug_info(State(state): State<AppState>) -> Json<DebugInfoResponse> {
    Json(DebugInfoResponse {
        message: "Debugging is enabled".into(),
        log_level: state.config.logging.max_level().to_string().to_lowercase(),
    })
}

/// Fallback for unmatched routes, so a 404 carries the usual JSON body.
pub async fn route_not_found(uri: Uri) -> AppError {
    AppError::NotFound(format!("No route for {}", uri.path()))
}
