//! ServiceLifecycle trait - Abstract interface for starting and stopping the managed service

use async_trait::async_trait;

use crate::domain::toggle::ServiceContext;

#[derive(Debug, thiserror::Error)]
pub enum ServiceLifecycleError {
    #[error("failed to start service {service}: {reason}")]
    Start { service: String, reason: String },
    #[error("failed to stop service {service}: {reason}")]
    Stop { service: String, reason: String },
}

/// Start/stop control surface of the managed background service.
///
/// Implementations receive the execution context explicitly on every call.
/// Return values are only used for logging; nothing is reported back to the
/// trigger source.
#[async_trait]
pub trait ServiceLifecycle: Send + Sync {
    async fn start(&self, ctx: &ServiceContext) -> Result<(), ServiceLifecycleError>;

    async fn stop(&self, ctx: &ServiceContext) -> Result<(), ServiceLifecycleError>;
}
