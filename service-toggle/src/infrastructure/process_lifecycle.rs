//! Service lifecycle backed by a child process.

use async_trait::async_trait;
use tokio::process::{Child, Command};
use tokio::sync::Mutex;

use crate::domain::toggle::ServiceContext;
use crate::port::service_lifecycle::{ServiceLifecycle, ServiceLifecycleError};

/// Runs the program named in the `ServiceContext` as a single child process.
///
/// `start` while running and `stop` while stopped are no-ops.
#[derive(Default)]
pub struct ProcessServiceLifecycle {
    child: Mutex<Option<Child>>,
}

impl ProcessServiceLifecycle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a child is currently alive. Reaps a child that has exited.
    pub async fn is_running(&self) -> bool {
        let mut guard = self.child.lock().await;
        reap_exited(&mut guard)
    }
}

/// Returns `true` if a live child remains in the slot.
fn reap_exited(slot: &mut Option<Child>) -> bool {
    let Some(child) = slot.as_mut() else {
        return false;
    };

    match child.try_wait() {
        Ok(None) => true,
        Ok(Some(status)) => {
            tracing::info!("Service process exited on its own: {}", status);
            *slot = None;
            false
        }
        Err(e) => {
            tracing::warn!("Failed to query service process state: {}", e);
            true
        }
    }
}

#[async_trait]
impl ServiceLifecycle for ProcessServiceLifecycle {
    async fn start(&self, ctx: &ServiceContext) -> Result<(), ServiceLifecycleError> {
        let mut guard = self.child.lock().await;
        if reap_exited(&mut guard) {
            tracing::info!("Service {} already running", ctx.service_name);
            return Ok(());
        }

        if ctx.program.is_empty() {
            return Err(ServiceLifecycleError::Start {
                service: ctx.service_name.clone(),
                reason: "no program configured".to_string(),
            });
        }

        let mut command = Command::new(&ctx.program);
        command.args(&ctx.args).envs(&ctx.env).kill_on_drop(true);
        if let Some(dir) = &ctx.working_dir {
            command.current_dir(dir);
        }

        let child = command.spawn().map_err(|e| ServiceLifecycleError::Start {
            service: ctx.service_name.clone(),
            reason: e.to_string(),
        })?;

        tracing::info!(
            "Started service {} (pid {:?})",
            ctx.service_name,
            child.id()
        );
        *guard = Some(child);
        Ok(())
    }

    async fn stop(&self, ctx: &ServiceContext) -> Result<(), ServiceLifecycleError> {
        let mut guard = self.child.lock().await;
        if !reap_exited(&mut guard) {
            tracing::info!("Service {} is not running", ctx.service_name);
            return Ok(());
        }
        let Some(mut child) = guard.take() else {
            return Ok(());
        };

        // kill() also waits for the process so no zombie is left behind.
        child.kill().await.map_err(|e| ServiceLifecycleError::Stop {
            service: ctx.service_name.clone(),
            reason: e.to_string(),
        })?;

        tracing::info!("Stopped service {}", ctx.service_name);
        Ok(())
    }
}
