use std::sync::Arc;
use tracing::info;

use eo_compute_gateway::{config::Config, kubernetes::KubeCluster, server::Server, Result};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    // Load configuration
    let config = Config::load()?;
    info!("Loaded configuration: {:?}", config);

    // Connect to the cluster control plane; a credential problem here is
    // logged and surfaces later as a per-request transport failure.
    let cluster = Arc::new(KubeCluster::connect().await);

    // Start server
    let server = Server::new(&config, cluster);
    info!("Starting server on {}", config.server.addr);
    server.start(&config.server.addr).await?;

    Ok(())
}
