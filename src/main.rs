//! SecurFlow edge gate.
//!
//! # Architecture Overview
//!
//! ```text
//!     Client Request
//!     ─────────────▶ request id ─▶ trace ─▶ security headers ─▶ timeout / body limit
//!                                                                      │
//!                                                                      ▼
//!                          ┌──────────────────── gate ────────────────────┐
//!                          │ scope? ─▶ shield ruleset ─▶ session policy   │
//!                          └──────┬──────────────┬───────────────┬───────┘
//!                                 │              │               │
//!                             403 empty     307 /login      pass through
//!                                           307 /dashboard       │
//!                                                                ▼
//!                                                   upstream by path prefix
//!                                                   (dashboard "/", api "/api")
//! ```

use clap::Parser;
use std::path::PathBuf;
use tokio::net::TcpListener;

use securflow_gate::config::{load_config, validate_config, ConfigError, GateConfig};
use securflow_gate::lifecycle::{wait_for_shutdown_signal, Shutdown};
use securflow_gate::observability::{init_logging, metrics::init_metrics};
use securflow_gate::HttpServer;

#[derive(Parser)]
#[command(name = "securflow-gate")]
#[command(about = "Edge gate for the SecurFlow dashboard", long_about = None)]
struct Args {
    /// TOML configuration file; built-in defaults when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => load_config(path)?,
        None => {
            let config = GateConfig::default();
            validate_config(&config).map_err(ConfigError::Validation)?;
            config
        }
    };

    init_logging(&config.observability)?;

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "securflow-gate starting");
    tracing::info!(
        bind_address = %config.listener.bind_address,
        tls = config.listener.tls.is_some(),
        upstreams = config.upstreams.len(),
        shield_builtin = config.shield.builtin,
        custom_rules = config.shield.rules.len(),
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        let addr = config.observability.metrics_address.parse()?;
        init_metrics(addr)?;
    }

    let shutdown = Shutdown::new();
    // Subscribe before the signal task exists so an early signal is not lost.
    let server_shutdown = shutdown.subscribe();
    let signal_shutdown = shutdown.clone();
    tokio::spawn(async move {
        wait_for_shutdown_signal().await;
        signal_shutdown.trigger();
    });

    let tls = config.listener.tls.is_some();
    let bind_address = config.listener.bind_address.clone();
    let server = HttpServer::new(config)?;

    if tls {
        server.run_tls(server_shutdown).await?;
    } else {
        let listener = TcpListener::bind(&bind_address).await?;
        server.run(listener, server_shutdown).await?;
    }

    tracing::info!("Shutdown complete");
    Ok(())
}
