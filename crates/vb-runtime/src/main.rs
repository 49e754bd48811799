//! # Voteboard Runtime
//!
//! The `voteboardd` binary: opens the record store, wires the domain
//! services, and serves the HTTP gateway.
//!
//! ## Startup Sequence
//!
//! 1. Initialize tracing (env-filtered)
//! 2. Load configuration from the environment
//! 3. Open the record store (RocksDB, or in-memory for dev mode)
//! 4. Seed demo data when requested and the store is empty
//! 5. Serve the gateway until ctrl-c

mod config;
mod seed;

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use vb_core::{Clock, SystemClock};
use vb_gateway::{AppState, CorsConfig, GatewayConfig, GatewayService};
use vb_store::{MemoryStore, RecordStore, RocksConfig, RocksStore};

use crate::config::RuntimeConfig;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = RuntimeConfig::load();
    info!(
        http_addr = %config.http_addr,
        in_memory = config.in_memory,
        "starting voteboardd"
    );

    if config.in_memory {
        let store = Arc::new(MemoryStore::new());
        run(store, config).await
    } else {
        let store = RocksStore::open(RocksConfig {
            path: config.data_dir.clone(),
            ..RocksConfig::default()
        })
        .context("failed to open record store")?;
        run(Arc::new(store), config).await
    }
}

async fn run<S: RecordStore>(store: Arc<S>, config: RuntimeConfig) -> Result<()> {
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);

    if config.seed_demo_data {
        seed::seed_if_empty(store.as_ref(), clock.as_ref())
            .context("failed to seed demo data")?;
    }

    let state = AppState::new(store, clock);
    let gateway = GatewayService::new(
        GatewayConfig {
            http_addr: config.http_addr,
            cors: CorsConfig {
                allowed_origins: config.cors_origins,
            },
        },
        state,
    )
    .context("invalid gateway configuration")?;

    gateway
        .serve(shutdown_signal())
        .await
        .context("gateway server error")?;

    info!("voteboardd stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!(%err, "failed to listen for shutdown signal");
        return;
    }
    info!("shutdown signal received");
}
