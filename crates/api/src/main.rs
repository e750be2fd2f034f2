//! Smart Energy Analysis Server - Main Entry Point

use api::{init_logging, run_server, ServerConfig};
use tracing::{debug, info};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = ServerConfig::load()?;
    init_logging(config.log_level()?, config.log_json)?;

    info!("=== Smart Energy Analysis Server v{} ===", env!("CARGO_PKG_VERSION"));
    debug!("Configuration: {:?}", config);

    run_server(config).await?;

    Ok(())
}
