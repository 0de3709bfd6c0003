//! One-way command queue between the toggle handler and the service lifecycle.
//!
//! `dispatch` only enqueues. A background task owns the lifecycle adapter and
//! applies commands one at a time in the order they were dispatched.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::domain::toggle::{ServiceCommand, ServiceContext};
use crate::port::service_lifecycle::ServiceLifecycle;

#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    #[error("command worker has stopped; {0:?} dropped")]
    WorkerStopped(ServiceCommand),
}

/// Sending half of the command queue. Cheap to clone.
///
/// The queue is unbounded: at most one trigger is expected in flight, so a
/// backlog only builds up while a start/stop call is stuck.
#[derive(Clone)]
pub struct CommandDispatcher {
    tx: mpsc::UnboundedSender<ServiceCommand>,
}

impl CommandDispatcher {
    /// Spawn the worker task on the current tokio runtime.
    ///
    /// The worker exits once every `CommandDispatcher` clone has been dropped
    /// and the queue is drained.
    pub fn spawn<L>(lifecycle: Arc<L>, ctx: ServiceContext) -> (Self, JoinHandle<()>)
    where
        L: ServiceLifecycle + ?Sized + 'static,
    {
        let (tx, mut rx) = mpsc::unbounded_channel::<ServiceCommand>();

        let handle = tokio::spawn(async move {
            tracing::info!("Started command worker for {}", ctx.service_name);
            while let Some(command) = rx.recv().await {
                apply(lifecycle.as_ref(), &ctx, command).await;
            }
            tracing::info!("Command queue closed, stopping worker for {}", ctx.service_name);
        });

        (Self { tx }, handle)
    }

    pub fn dispatch(&self, command: ServiceCommand) -> Result<(), DispatchError> {
        self.tx
            .send(command)
            .map_err(|e| DispatchError::WorkerStopped(e.0))
    }
}

/// Stop accepting queued commands, then stop the service itself.
///
/// Anything still queued is discarded; the final `stop` always runs.
pub async fn shut_down<L>(worker: JoinHandle<()>, lifecycle: &L, ctx: &ServiceContext)
where
    L: ServiceLifecycle + ?Sized,
{
    worker.abort();
    let _ = worker.await;

    match lifecycle.stop(ctx).await {
        Ok(()) => tracing::info!("Service {} stopped on shutdown", ctx.service_name),
        Err(e) => tracing::error!("Failed to stop service on shutdown: {}", e),
    }
}

/// A failed command ends here; the worker moves on to the next one.
async fn apply<L>(lifecycle: &L, ctx: &ServiceContext, command: ServiceCommand)
where
    L: ServiceLifecycle + ?Sized,
{
    let result = match command {
        ServiceCommand::Start => lifecycle.start(ctx).await,
        ServiceCommand::Stop => lifecycle.stop(ctx).await,
    };

    match result {
        Ok(()) => tracing::debug!("Applied {:?} to {}", command, ctx.service_name),
        Err(e) => tracing::error!("{:?} failed: {}", command, e),
    }
}
