use crate::application_service::command_dispatcher::CommandDispatcher;
use crate::domain::payload_codec;
use crate::domain::toggle::{ServiceCommand, ToggleEvent};

/// Maps trigger events onto start/stop commands.
///
/// `on_event` runs on whatever context delivers the event and returns as soon
/// as the command is queued. It has no failure path.
#[derive(Clone)]
pub struct ServiceToggleHandler {
    dispatcher: CommandDispatcher,
}

impl ServiceToggleHandler {
    pub fn new(dispatcher: CommandDispatcher) -> Self {
        Self { dispatcher }
    }

    pub fn on_event(&self, event: &ToggleEvent) {
        let payload = payload_codec::decode(event.bundle.as_ref());
        let command = ServiceCommand::from(payload);
        tracing::debug!(
            "Trigger event decoded: switch_state={} -> {:?}",
            payload.switch_state(),
            command
        );

        if let Err(e) = self.dispatcher.dispatch(command) {
            tracing::warn!("Dropping trigger event: {}", e);
        }
    }
}
