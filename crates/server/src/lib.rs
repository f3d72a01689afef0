//! Server crate for the movie metadata gateway.
//!
//! ## Main Components
//!
//! - **usecase**: `MovieCatalog`, joins the OMDb repository and the audit sink
//! - **handler**: `MovieServer`, the gRPC `SearchMovie` implementation
//! - **interceptor**: `Interceptor`, records every request in the audit log
//! - **gateway**: axum router exposing the same service as HTTP/JSON
//! - **config**: command line / environment configuration
//! - **runtime**: runs both listeners and drains the audit log on exit

pub mod config;
pub mod gateway;
pub mod handler;
pub mod interceptor;
pub mod runtime;
pub mod usecase;

#[cfg(test)]
mod testing;

use std::sync::Arc;

use movie_domain::MovieUsecase;

pub use config::GatewayConfig;
pub use gateway::{router, SharedService};
pub use handler::MovieServer;
pub use interceptor::Interceptor;
pub use usecase::MovieCatalog;

/// Build the audited service shared by the gRPC server and the HTTP gateway
pub fn movie_service(usecase: Arc<dyn MovieUsecase>) -> Arc<Interceptor<MovieServer>> {
    Arc::new(Interceptor::new(MovieServer::new(usecase.clone()), usecase))
}
