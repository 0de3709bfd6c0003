//! Port layer - Abstract interfaces for the external collaborators
//!
//! The application layer only talks to the service lifecycle API and the
//! trigger source's storage through these traits.

pub mod configuration_hand_off;
pub mod service_lifecycle;

pub use configuration_hand_off::{
    ConfigurationHandOff, ConfigurationStoreError, StoredConfiguration,
};
pub use service_lifecycle::{ServiceLifecycle, ServiceLifecycleError};
