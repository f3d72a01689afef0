//! Listener lifecycle for the `movie-gateway` binary.
//!
//! [`run`] serves gRPC and HTTP side by side until `shutdown` is cancelled
//! or either listener fails, then drains the audit writer. The drain runs
//! on the error path too, so records queued before a failure still reach
//! the file.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tonic::transport::Server;
use tracing::{info, warn};

use audit_log::AuditWriter;
use movie_domain::MovieUsecase;
use movie_rpc::movie::search_movie_server::SearchMovieServer;

use crate::{movie_service, router, Interceptor, MovieServer};

/// How long queued audit records get to reach disk after the listeners stop
pub const AUDIT_DRAIN_GRACE: Duration = Duration::from_secs(5);

/// Serve both surfaces, then drain the audit log.
///
/// `usecase` must hold the last live audit handles besides the writer's
/// own queue, otherwise the drain waits out the full grace period.
pub async fn run(
    grpc_addr: SocketAddr,
    rest_addr: SocketAddr,
    usecase: Arc<dyn MovieUsecase>,
    writer: AuditWriter,
    shutdown: CancellationToken,
    grace: Duration,
) -> Result<()> {
    let served = {
        let service = movie_service(usecase);
        tokio::try_join!(
            serve_grpc(grpc_addr, service.clone(), shutdown.clone()),
            serve_rest(rest_addr, service, shutdown.clone()),
        )
    };

    // Every audit handle is gone now, so the writer drains and exits.
    match writer.finish(grace).await {
        Some(written) => info!("Audit log closed after {} records", written),
        None => warn!("Audit log did not drain within {:?}", grace),
    }

    served.map(|_| ())
}

async fn serve_grpc(
    addr: SocketAddr,
    service: Arc<Interceptor<MovieServer>>,
    shutdown: CancellationToken,
) -> Result<()> {
    info!("gRPC server listening on {}", addr);

    let result = Server::builder()
        .add_service(SearchMovieServer::from_arc(service))
        .serve_with_shutdown(addr, {
            let shutdown = shutdown.clone();
            async move { shutdown.cancelled().await }
        })
        .await
        .with_context(|| format!("gRPC server on {} failed", addr));

    // Bring the other listener down with us
    if result.is_err() {
        shutdown.cancel();
    }
    result
}

async fn serve_rest(
    addr: SocketAddr,
    service: Arc<Interceptor<MovieServer>>,
    shutdown: CancellationToken,
) -> Result<()> {
    let listener = match TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(e) => {
            shutdown.cancel();
            return Err(e).with_context(|| format!("Failed to bind HTTP gateway to {}", addr));
        }
    };
    info!("HTTP gateway listening on {}", addr);

    let result = axum::serve(listener, router(service))
        .with_graceful_shutdown({
            let shutdown = shutdown.clone();
            async move { shutdown.cancelled().await }
        })
        .await
        .with_context(|| format!("HTTP gateway on {} failed", addr));

    if result.is_err() {
        shutdown.cancel();
    }
    result
}
