pub mod application_service;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod port;
pub mod presentation;
#[doc(hidden)]
pub mod test_utils;

pub use application_service::command_dispatcher::{CommandDispatcher, DispatchError};
pub use application_service::config_editor::ConfigEditor;
pub use application_service::toggle_handler::ServiceToggleHandler;
pub use config::{ConfigError, ToggleConfig};
pub use domain::payload_codec;
pub use domain::toggle::{
    ConfigPayload, OpaqueBundle, ServiceCommand, ServiceContext, ToggleEvent, ToggleResult,
    UiState,
};
