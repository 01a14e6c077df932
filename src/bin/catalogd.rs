//! catalogd: catalog daemon.
//!
//! Serves a [`CategoryStore`](catalog::CategoryStore) over gRPC.

use std::net::SocketAddr;

use clap::Parser;
use tonic::transport::Server;
use tracing::info;

use catalog::CatalogError;
use catalog::server::CategoryService;
use catalog::server::config::Config;
use catalog::server::proto::category_service_server::CategoryServiceServer;

/// Catalog daemon: category records over gRPC.
#[derive(Parser)]
#[command(name = "catalogd")]
#[command(version = catalog::PKG_VERSION)]
#[command(about = "Catalog category service daemon")]
struct Args {
    /// Path to configuration file.
    #[arg(short, long)]
    config: Option<std::path::PathBuf>,

    /// Address to bind to, overriding the configured one.
    #[arg(short, long, env = "CATALOGD_ADDRESS")]
    address: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialise tracing (default: info; override with RUST_LOG).
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    // Load configuration
    let mut config = Config::load(args.config.as_deref())?;
    if let Some(address) = args.address {
        config.server.address = address;
    }

    // Parse address
    let addr: SocketAddr = config
        .server
        .address
        .parse()
        .map_err(|e| CatalogError::Configuration(format!("Invalid address: {e}")))?;

    let store = config.store.open()?;

    info!(
        version = catalog::version_string(),
        %addr,
        backend = ?config.store.backend,
        "catalogd starting"
    );

    // Create gRPC service and start server
    let service = CategoryService::new(store);
    let server = CategoryServiceServer::new(service);

    Server::builder().add_service(server).serve(addr).await?;

    Ok(())
}
