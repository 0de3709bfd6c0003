use crate::config::DescriptionConfig;
use crate::domain::payload_codec;
use crate::domain::toggle::{ConfigPayload, ToggleEvent, ToggleResult, UiState};

/// Editing surface for the single on/off option.
///
/// Holds no state between `initialize` and `on_confirm`/`on_cancel`; the
/// caller carries the `UiState`.
#[derive(Debug, Clone, Default)]
pub struct ConfigEditor {
    descriptions: DescriptionConfig,
}

impl ConfigEditor {
    pub fn new(descriptions: DescriptionConfig) -> Self {
        Self { descriptions }
    }

    /// Seed the control from the configuration the trigger source sent along.
    pub fn initialize(&self, incoming: Option<&ToggleEvent>) -> UiState {
        let bundle = incoming.and_then(|event| event.bundle.as_ref());
        UiState {
            checked: payload_codec::decode(bundle).switch_state(),
        }
    }

    pub fn on_confirm(&self, state: UiState) -> ToggleResult {
        let payload = ConfigPayload::new(state.checked);
        ToggleResult {
            description: self.descriptions.for_state(state.checked).to_string(),
            bundle: payload_codec::encode(payload),
        }
    }

    /// Dismiss without producing a result. The stored configuration stays as it was.
    pub fn on_cancel(&self) {
        tracing::debug!("Configuration edit cancelled");
    }
}
