//! ConfigurationHandOff trait - Storage owned by the trigger source

use serde::{Deserialize, Serialize};

use crate::domain::toggle::{OpaqueBundle, ToggleResult};

#[derive(Debug, thiserror::Error)]
pub enum ConfigurationStoreError {
    #[error("storage error: {0}")]
    Storage(String),
    #[error("invalid stored configuration: {0}")]
    InvalidData(String),
}

/// Configuration as the trigger source keeps it between edit and delivery.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredConfiguration {
    pub description: String,
    pub bundle: OpaqueBundle,
}

impl From<&ToggleResult> for StoredConfiguration {
    fn from(result: &ToggleResult) -> Self {
        Self {
            description: result.description.clone(),
            bundle: result.bundle.clone(),
        }
    }
}

/// Receives a confirmed editor result and keeps it for later delivery.
///
/// - Only a confirmation reaches `save`; a cancelled edit never calls it.
/// - `save` replaces any configuration stored before.
pub trait ConfigurationHandOff: Send + Sync {
    fn save(&self, result: &ToggleResult) -> Result<(), ConfigurationStoreError>;

    fn load(&self) -> Result<Option<StoredConfiguration>, ConfigurationStoreError>;
}
