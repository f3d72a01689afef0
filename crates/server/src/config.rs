//! Gateway configuration, from flags or the environment.
//!
//! Every flag has an environment variable counterpart so the binary can be
//! driven by a `.env` file (loaded by `main` through `dotenv`).

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

use clap::Parser;

use omdb_client::OmdbConfig;

/// Movie metadata gateway (gRPC + HTTP/JSON)
///
/// No `Debug` derive: the struct carries the OMDb API key.
#[derive(Parser, Clone)]
#[command(name = "movie-gateway")]
#[command(about = "gRPC and HTTP/JSON gateway for OMDb movie metadata", long_about = None)]
pub struct GatewayConfig {
    /// Address both listeners bind to
    #[arg(long, env = "HOST", default_value_t = IpAddr::V4(Ipv4Addr::UNSPECIFIED))]
    pub host: IpAddr,

    /// gRPC listener port
    #[arg(long, env = "GRPC_PORT", default_value_t = 50051)]
    pub grpc_port: u16,

    /// HTTP/JSON listener port
    #[arg(long, env = "REST_PORT", default_value_t = 8080)]
    pub rest_port: u16,

    /// OMDb API key
    #[arg(long, env = "API_KEY", hide_env_values = true)]
    pub api_key: String,

    /// OMDb base URL
    #[arg(long, env = "OMDB_BASE_URL", default_value = omdb_client::DEFAULT_BASE_URL)]
    pub omdb_url: String,

    /// Audit log file
    #[arg(long, env = "AUDIT_LOG_FILE", default_value = "search.log")]
    pub audit_log: PathBuf,

    /// Maximum number of audit records waiting to be written
    #[arg(long, env = "AUDIT_QUEUE_CAPACITY", default_value_t = audit_log::DEFAULT_CAPACITY)]
    pub audit_queue: usize,
}

impl GatewayConfig {
    pub fn grpc_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.grpc_port)
    }

    pub fn rest_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.rest_port)
    }

    pub fn omdb(&self) -> OmdbConfig {
        OmdbConfig::new(self.api_key.clone()).with_base_url(self.omdb_url.clone())
    }
}
