//! Cabs server binary

use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use cabs::api::{create_router, AppState};
use cabs::config::{AppConfig, LogFormat};
use cabs::diagnostics::{Diagnostics, NoopDiagnostics, TracingDiagnostics};
use cabs::storage::{create_storage, StorageBackend};
use cabs::store::DocumentStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load().context("failed to load configuration")?;

    init_tracing(&config)?;

    let storage_config = config
        .storage_runtime()
        .context("invalid storage configuration")?;
    tracing::info!(backend = ?storage_config, "Initialising storage");

    let storage: Arc<dyn StorageBackend> = Arc::from(create_storage(storage_config)?);
    let store = DocumentStore::open(storage, config.update.policy)
        .await
        .context("failed to open cab store")?;

    let diagnostics: Arc<dyn Diagnostics> = if config.diagnostics.enabled {
        Arc::new(TracingDiagnostics)
    } else {
        tracing::info!("Create diagnostics disabled via configuration");
        Arc::new(NoopDiagnostics)
    };

    let state = AppState::new(Arc::new(store)).with_diagnostics(diagnostics);
    let router = create_router(state, &config.server.path_prefix);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind to {}", addr))?;
    tracing::info!(%addr, prefix = %config.server.path_prefix, "Listening for HTTP traffic");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %err, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}

fn init_tracing(config: &AppConfig) -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.logging.level.clone()))
        .unwrap_or_else(|_| EnvFilter::new("cabs=info,tower_http=info"));

    let registry = tracing_subscriber::registry().with(env_filter);

    match config.logging.format {
        LogFormat::Json => {
            registry
                .with(tracing_subscriber::fmt::layer().json())
                .try_init()?;
        }
        LogFormat::Text => {
            registry.with(tracing_subscriber::fmt::layer()).try_init()?;
        }
    }

    Ok(())
}
