//! Ledger dashboard service.
//!
//! ```text
//!                      ┌──────────────────────────────────────────────┐
//!   browser /          │               LEDGER DASHBOARD               │
//!   dashboard-cli      │                                              │
//!   ───────────────────┼─▶ http ──▶ workflow orchestrator ──┬─▶ fraud ─┼──▶ fraud service
//!                      │                │                   │          │
//!   ◀──────────────────┼── state ◀──────┘                   └─▶ ledger ┼──▶ ledger node
//!                      │                                              │
//!                      │  config · observability · lifecycle          │
//!                      └──────────────────────────────────────────────┘
//! ```

use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::net::TcpListener;

use ledger_dashboard::config::{load_config, DashboardConfig};
use ledger_dashboard::lifecycle::{wait_for_signal, Shutdown};
use ledger_dashboard::observability::{logging, metrics};
use ledger_dashboard::{HttpServer, WorkflowOrchestrator};

#[derive(Parser)]
#[command(name = "ledger-dashboard")]
#[command(about = "Fraud-gated ledger dashboard service", long_about = None)]
struct Args {
    /// TOML configuration file. Defaults apply when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the listener bind address.
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => DashboardConfig::default(),
    };
    if let Some(bind) = args.bind {
        config.listener.bind_address = bind;
    }

    logging::init_logging(&config.observability);
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "ledger-dashboard starting");
    tracing::info!(
        bind_address = %config.listener.bind_address,
        ledger = %config.ledger.base_url,
        fraud = %config.fraud.base_url,
        snapshot_policy = ?config.contracts.snapshot_policy,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr)?,
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let orchestrator = Arc::new(WorkflowOrchestrator::from_config(&config)?);

    // Initial load; the dashboard starts even if the ledger is down.
    match orchestrator.refresh_chain().await {
        Ok(blocks) => tracing::info!(blocks, "Initial chain loaded"),
        Err(e) => tracing::warn!(error = %e, "Initial chain load failed"),
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    let server = HttpServer::new(orchestrator, &config.listener);
    let serving = tokio::spawn(server.run(listener, shutdown.signal()));

    let signal = wait_for_signal().await?;
    tracing::info!(signal, "Shutdown signal received");
    shutdown.trigger();

    serving.await??;
    tracing::info!("Shutdown complete");
    Ok(())
}
