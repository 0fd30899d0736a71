//! FoodFast backend with file/env configuration only.
//!
//! The `foodfast` binary in `cli/` adds flags and subcommands.

use tracing::{info, warn};

use foodfast::config::AppConfig;
use foodfast::default_config_path;
use foodfast::server::{init_tracing, ServerHandle, ServerOptions, StartError};

#[tokio::main]
async fn main() -> Result<(), StartError> {
    let path = default_config_path();
    let (config, load_error) = AppConfig::load_or_default(&path);
    init_tracing(&config);

    match load_error {
        None => info!(path = %path.display(), "Configuration loaded"),
        Some(e) => warn!(error = %e, "Using default configuration"),
    }

    let handle = ServerHandle::start(ServerOptions {
        config,
        ..ServerOptions::default()
    })
    .await?;
    handle.install_signal_handler();

    handle.shutdown_signal().wait().await;
    handle.wait().await;
    Ok(())
}
