use super::state::AppState;
use crate::collab::CollabRoom;
use crate::settings::Settings;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde::{Deserialize, Serialize};
use tracing::{error, info};

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSettingsRequest {
    /// New note folder
    pub folder_path: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

fn error_response(status: StatusCode, error: String) -> axum::response::Response {
    (status, Json(ErrorResponse { error })).into_response()
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /rooms
/// Create a collaboration room in the configured folder
pub async fn create_room(State(state): State<AppState>) -> impl IntoResponse {
    // Copy the folder out so the settings lock isn't held during creation
    let folder_path = state.settings.get().await.folder_path;

    info!("Creating collaboration room in {:?}", folder_path);

    match state.recorder.create_collaboration_link(&folder_path).await {
        Ok(room) => (StatusCode::CREATED, Json::<CollabRoom>(room)).into_response(),
        Err(e) => {
            error!("Failed to create collaboration room: {}", e);
            error_response(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        }
    }
}

/// GET /settings
pub async fn get_settings(State(state): State<AppState>) -> impl IntoResponse {
    (StatusCode::OK, Json::<Settings>(state.settings.get().await))
}

/// PUT /settings
/// Update and persist settings
pub async fn update_settings(
    State(state): State<AppState>,
    Json(req): Json<UpdateSettingsRequest>,
) -> impl IntoResponse {
    match state.settings.set_folder_path(req.folder_path).await {
        Ok(settings) => (StatusCode::OK, Json(settings)).into_response(),
        Err(e) => {
            error!("Failed to save settings: {:#}", e);
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to save settings: {:#}", e),
            )
        }
    }
}

/// GET /health
/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}
