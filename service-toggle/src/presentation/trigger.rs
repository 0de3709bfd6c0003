use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    routing::post,
    Router,
};
use serde::Deserialize;
use serde_json::Value;

use crate::domain::toggle::{OpaqueBundle, ToggleEvent};

use super::AppState;

/// Body shared by trigger delivery and editor initialization.
///
/// An empty body and `{}` both mean "no bundle".
#[derive(Debug, Default, Deserialize)]
pub struct EventRequest {
    #[serde(default)]
    pub bundle: Option<Value>,
}

impl From<EventRequest> for ToggleEvent {
    fn from(req: EventRequest) -> Self {
        ToggleEvent::new(req.bundle.map(OpaqueBundle::from_value))
    }
}

pub(crate) fn parse_event(body: &Bytes) -> Result<ToggleEvent, (StatusCode, String)> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(ToggleEvent::empty());
    }

    let req: EventRequest = serde_json::from_slice(body)
        .map_err(|e| (StatusCode::BAD_REQUEST, format!("invalid event body: {e}")))?;
    Ok(req.into())
}

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/trigger", post(deliver))
        .route("/trigger/stored", post(deliver_stored))
}

async fn deliver(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<StatusCode, (StatusCode, String)> {
    let event = parse_event(&body)?;
    state.handler.on_event(&event);
    Ok(StatusCode::ACCEPTED)
}

/// Deliver whatever configuration the hand-off currently holds.
async fn deliver_stored(
    State(state): State<Arc<AppState>>,
) -> Result<StatusCode, (StatusCode, String)> {
    let stored = state
        .hand_off
        .load()
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;

    let event = match stored {
        Some(stored) => ToggleEvent::with_bundle(stored.bundle),
        None => ToggleEvent::empty(),
    };
    state.handler.on_event(&event);
    Ok(StatusCode::ACCEPTED)
}
