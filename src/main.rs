//! Todo service binary.
//!
//! A minimal HTTP CRUD service over PostgreSQL whose interesting part is
//! the database-availability gate: every request passes a retry-gated
//! acquisition middleware before any handler runs.
//!
//! Startup order: telemetry → metrics exporter → database manager →
//! runtime sampler → HTTP server. Teardown reverses it.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tokio::net::TcpListener;

use todo_service::config::{load_config, ServiceConfig};
use todo_service::db::{DataSource, DbManager};
use todo_service::http::HttpServer;
use todo_service::lifecycle::Shutdown;
use todo_service::observability::runtime::RuntimeSampler;
use todo_service::observability::{metrics, tracing as telemetry};

#[derive(Parser)]
#[command(name = "todo-service", about = "Database-gated todo CRUD service")]
struct Args {
    /// Path to the TOML configuration file. Defaults apply when omitted.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => load_config(path)?,
        None => ServiceConfig::default(),
    };

    let guard = telemetry::init(&config.observability)?;

    tracing::info!(
        bind_address = %config.listener.bind_address,
        database_mode = ?config.database.mode,
        max_attempts = config.gate.max_attempts,
        base_delay_ms = config.gate.base_delay_ms,
        "configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => {
                if let Err(e) = metrics::install_exporter(addr) {
                    tracing::error!(
                        error = %e,
                        "metrics exporter install failed, continuing without metrics"
                    );
                }
            }
            Err(e) => {
                tracing::error!(
                    metrics_address = %config.observability.metrics_address,
                    error = %e,
                    "failed to parse metrics address"
                );
            }
        }
    }

    let manager = Arc::new(DbManager::initialize(&config.database).await?);

    let shutdown = Shutdown::new();
    let sampler = RuntimeSampler::new(
        manager.clone(),
        Duration::from_secs(config.observability.runtime_sample_interval_secs),
    );
    tokio::spawn(sampler.run(shutdown.subscribe()));

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    let server = HttpServer::new(&config, manager.clone());
    let served = server.run(listener).await;

    // Teardown runs whether the server exited cleanly or not, so
    // background tasks stop and pending spans get flushed either way.
    shutdown.trigger();
    manager.shutdown().await;
    guard.shutdown();
    served?;

    tracing::info!("shutdown complete");
    Ok(())
}
