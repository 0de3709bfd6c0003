//! Service toggle binary entry point.
//!
//! Serves the editor and trigger endpoints and drives the managed service process.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use service_toggle::application_service::command_dispatcher;
use service_toggle::infrastructure::{
    InMemoryConfigurationStore, ProcessServiceLifecycle, SledConfigurationStore,
};
use service_toggle::port::ConfigurationHandOff;
use service_toggle::presentation::{self, AppState};
use service_toggle::{CommandDispatcher, ConfigEditor, ServiceToggleHandler, ToggleConfig};

/// Service toggle CLI arguments.
#[derive(Parser, Debug)]
#[command(name = "service-toggle")]
#[command(about = "Start or stop a background service from automation triggers")]
struct Args {
    /// Path to a TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// HTTP listen address (overrides the config file).
    #[arg(short = 'l', long)]
    listen: Option<SocketAddr>,

    /// Data directory for the stored configuration (overrides the config file).
    #[arg(short, long)]
    data_dir: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error).
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level)),
        )
        .init();

    let mut config = match &args.config {
        Some(path) => ToggleConfig::from_file(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => ToggleConfig::default(),
    };
    if let Some(listen) = args.listen {
        config.server.listen = listen;
    }
    if let Some(data_dir) = args.data_dir {
        config.storage.data_dir = Some(data_dir);
    }

    let hand_off: Arc<dyn ConfigurationHandOff> = match &config.storage.data_dir {
        Some(dir) => {
            std::fs::create_dir_all(dir).context("Failed to create data directory")?;
            tracing::info!("Data directory: {:?}", dir);
            Arc::new(
                SledConfigurationStore::open(dir.join("trigger"))
                    .context("Failed to open configuration store")?,
            )
        }
        None => {
            tracing::info!("No data directory configured, keeping configuration in memory");
            Arc::new(InMemoryConfigurationStore::default())
        }
    };

    let ctx = config.service.context();
    if ctx.program.is_empty() {
        tracing::warn!("No service program configured; start requests will fail");
    }

    let lifecycle = Arc::new(ProcessServiceLifecycle::new());
    let (dispatcher, worker) = CommandDispatcher::spawn(lifecycle.clone(), ctx.clone());

    let state = Arc::new(AppState {
        editor: ConfigEditor::new(config.descriptions.clone()),
        handler: ServiceToggleHandler::new(dispatcher),
        hand_off,
    });
    let app = presentation::create_router(state);

    let listener = TcpListener::bind(config.server.listen)
        .await
        .with_context(|| format!("Failed to bind {}", config.server.listen))?;
    tracing::info!(
        "Service toggle for {} listening on http://{}",
        config.service.name,
        config.server.listen
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    command_dispatcher::shut_down(worker, lifecycle.as_ref(), &ctx).await;

    tracing::info!("Service toggle stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
