use std::sync::Arc;

use axum::{routing::get, Router};

use crate::application_service::config_editor::ConfigEditor;
use crate::application_service::toggle_handler::ServiceToggleHandler;
use crate::port::configuration_hand_off::ConfigurationHandOff;

pub mod editor;
pub mod trigger;

pub struct AppState {
    pub editor: ConfigEditor,
    pub handler: ServiceToggleHandler,
    pub hand_off: Arc<dyn ConfigurationHandOff>,
}

async fn health() -> &'static str {
    "ok"
}

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health))
        .merge(editor::routes())
        .merge(trigger::routes())
        .with_state(state)
}
