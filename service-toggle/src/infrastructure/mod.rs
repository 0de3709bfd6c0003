pub mod configuration_store;
pub mod process_lifecycle;

pub use configuration_store::{InMemoryConfigurationStore, SledConfigurationStore};
pub use process_lifecycle::ProcessServiceLifecycle;
