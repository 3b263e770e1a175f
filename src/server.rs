use crate::core_network::network;
use crate::config::Config;
use anyhow::Result;
use log::{error, info};
use std::sync::Arc;

/// Runs the FTP server with the provided configuration.
///
/// Returns only if the control port cannot be bound.
pub async fn run(config: Config) -> Result<()> {
    info!("Starting server with config: {:?}", config);
    info!("Serving files from {}", config.server.root_dir);

    if let Err(e) = network::start_server(Arc::new(config.server)).await {
        error!("Failed to start server: {:#}", e);
        return Err(e);
    }

    Ok(())
}
