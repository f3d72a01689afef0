//! Movie metadata gateway.
//!
//! Serves the `SearchMovie` gRPC service and its HTTP/JSON facade side by
//! side, both backed by OMDb, and appends every request to the audit log.

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

use audit_log::{AuditFile, AuditLog};
use omdb_client::OmdbClient;
use server::runtime::{self, AUDIT_DRAIN_GRACE};
use server::{GatewayConfig, MovieCatalog};

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                tracing_subscriber::EnvFilter::new(
                    "info,server=debug,omdb_client=debug,audit_log=debug",
                )
            }),
        )
        .init();

    let config = GatewayConfig::parse();

    info!("Starting movie gateway");

    let omdb = OmdbClient::new(config.omdb()).context("Invalid OMDb configuration")?;
    info!("Using OMDb at {}", omdb.base_url());

    let (audit, writer) = AuditLog::spawn(
        AuditFile::new(config.audit_log.clone()),
        config.audit_queue,
    );
    info!("Auditing requests to {}", config.audit_log.display());

    let shutdown = CancellationToken::new();
    tokio::spawn(wait_for_ctrl_c(shutdown.clone()));

    let catalog = MovieCatalog::new(Arc::new(omdb), Arc::new(audit));
    runtime::run(
        config.grpc_addr(),
        config.rest_addr(),
        Arc::new(catalog),
        writer,
        shutdown,
        AUDIT_DRAIN_GRACE,
    )
    .await?;

    info!("Movie gateway stopped");
    Ok(())
}

async fn wait_for_ctrl_c(shutdown: CancellationToken) {
    match tokio::signal::ctrl_c().await {
        Ok(()) => {
            info!("Shutdown signal received");
            shutdown.cancel();
        }
        Err(e) => error!("Failed to listen for shutdown signal: {}", e),
    }
}
