use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Json, State},
    http::StatusCode,
    routing::post,
    Router,
};

use crate::domain::toggle::{ToggleResult, UiState};

use super::trigger::parse_event;
use super::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/editor/initialize", post(initialize))
        .route("/editor/confirm", post(confirm))
        .route("/editor/cancel", post(cancel))
}

async fn initialize(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<UiState>, (StatusCode, String)> {
    let incoming = parse_event(&body)?;
    Ok(Json(state.editor.initialize(Some(&incoming))))
}

async fn confirm(
    State(state): State<Arc<AppState>>,
    Json(ui_state): Json<UiState>,
) -> Result<Json<ToggleResult>, (StatusCode, String)> {
    let result = state.editor.on_confirm(ui_state);

    state
        .hand_off
        .save(&result)
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;

    tracing::info!("Configuration saved: {}", result.description);
    Ok(Json(result))
}

async fn cancel(State(state): State<Arc<AppState>>) -> StatusCode {
    state.editor.on_cancel();
    StatusCode::NO_CONTENT
}
