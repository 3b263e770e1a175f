mod config;
mod constants;
mod core_cli;
mod core_ftpcommand;
mod core_log;
mod core_network;
mod core_transfer;
mod helpers;
mod server;
mod session;

use crate::config::Config;
use crate::core_cli::Cli;
use anyhow::Result;
use clap::Parser;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments
    let args = Cli::parse();

    core_log::logger::init_logger(args.verbose);

    // Load configuration from the TOML file, or fall back to the defaults
    let mut config = match args.config.as_deref() {
        Some(path) => Config::load_from_file(path)?,
        None => Config::default(),
    };

    // CLI overrides
    if let Some(port) = args.port {
        config.server.listen_port = port;
    }
    if let Some(root) = args.root {
        config.server.root_dir = root;
    }
    config.validate()?;

    // Run the FTP server
    server::run(config).await?;

    Ok(())
}
