pub mod command_dispatcher;
pub mod config_editor;
pub mod toggle_handler;
