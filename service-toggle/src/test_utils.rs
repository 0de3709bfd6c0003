//! Mock implementations of the ports for testing.
//!
//! These record every call so tests can assert on exactly what reached the
//! external collaborators.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::toggle::{ServiceContext, ToggleResult};
use crate::infrastructure::configuration_store::InMemoryConfigurationStore;
use crate::port::configuration_hand_off::{
    ConfigurationHandOff, ConfigurationStoreError, StoredConfiguration,
};
use crate::port::service_lifecycle::{ServiceLifecycle, ServiceLifecycleError};

// ============================================================================
// RecordingServiceLifecycle
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleCall {
    Start,
    Stop,
}

/// Records start/stop calls. Optionally fails every call after recording it.
#[derive(Default)]
pub struct RecordingServiceLifecycle {
    calls: Arc<Mutex<Vec<LifecycleCall>>>,
    fail: bool,
}

impl RecordingServiceLifecycle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            calls: Arc::new(Mutex::new(Vec::new())),
            fail: true,
        }
    }

    pub async fn calls(&self) -> Vec<LifecycleCall> {
        self.calls.lock().await.clone()
    }

    pub async fn count(&self, call: LifecycleCall) -> usize {
        self.calls.lock().await.iter().filter(|c| **c == call).count()
    }
}

#[async_trait]
impl ServiceLifecycle for RecordingServiceLifecycle {
    async fn start(&self, ctx: &ServiceContext) -> Result<(), ServiceLifecycleError> {
        self.calls.lock().await.push(LifecycleCall::Start);
        if self.fail {
            return Err(ServiceLifecycleError::Start {
                service: ctx.service_name.clone(),
                reason: "simulated failure".to_string(),
            });
        }
        Ok(())
    }

    async fn stop(&self, ctx: &ServiceContext) -> Result<(), ServiceLifecycleError> {
        self.calls.lock().await.push(LifecycleCall::Stop);
        if self.fail {
            return Err(ServiceLifecycleError::Stop {
                service: ctx.service_name.clone(),
                reason: "simulated failure".to_string(),
            });
        }
        Ok(())
    }
}

// ============================================================================
// RecordingHandOff
// ============================================================================

/// In-memory hand-off that counts `save` calls.
#[derive(Clone, Default)]
pub struct RecordingHandOff {
    store: InMemoryConfigurationStore,
    saves: Arc<AtomicUsize>,
    fail_saves: bool,
}

impl RecordingHandOff {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every `save` fails with a storage error.
    pub fn failing() -> Self {
        Self {
            fail_saves: true,
            ..Self::default()
        }
    }

    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }
}

impl ConfigurationHandOff for RecordingHandOff {
    fn save(&self, result: &ToggleResult) -> Result<(), ConfigurationStoreError> {
        self.saves.fetch_add(1, Ordering::SeqCst);
        if self.fail_saves {
            return Err(ConfigurationStoreError::Storage("simulated failure".to_string()));
        }
        self.store.save(result)
    }

    fn load(&self) -> Result<Option<StoredConfiguration>, ConfigurationStoreError> {
        self.store.load()
    }
}
