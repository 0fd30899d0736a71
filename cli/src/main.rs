//! `foodfast` command-line entry point
//!
//! ```sh
//! foodfast                                  # serve with ~/.config/foodfast/config.toml
//! foodfast -c /etc/foodfast.toml serve --api-port 3000
//! foodfast check                            # print the effective settings
//! foodfast seed                             # migrate and insert demo data, then exit
//! ```

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use tracing::{info, warn};

use foodfast::config::AppConfig;
use foodfast::server::{
    init_tracing, open_store, seed_demo_data, ServerHandle, ServerOptions, StartError,
};

#[derive(Parser, Debug)]
#[command(
    name = "foodfast",
    version,
    about = "FoodFast drone food-delivery backend",
    long_about = "REST API, realtime WebSocket stream and VNPay payment links \
                  for the FoodFast storefronts and dashboards."
)]
struct Cli {
    /// TOML configuration file
    #[arg(short, long, global = true, env = "FOODFAST_CONFIG")]
    config: Option<PathBuf>,

    /// trace, debug, info, warn or error
    #[arg(short, long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the HTTP and WebSocket server (default)
    Serve(ServeArgs),
    /// Validate the configuration and print the effective settings
    Check,
    /// Apply migrations and insert demo data into empty tables
    Seed,
}

#[derive(Args, Debug, Default)]
struct ServeArgs {
    #[arg(long)]
    api_host: Option<String>,

    #[arg(long)]
    api_port: Option<u16>,

    /// Do not run migrations on startup
    #[arg(long)]
    no_migrate: bool,

    /// Do not create the configured admin account
    #[arg(long)]
    no_admin: bool,
}

#[tokio::main]
async fn main() -> Result<(), StartError> {
    let cli = Cli::parse();
    let path = cli.config.unwrap_or_else(foodfast::default_config_path);

    let (mut config, load_error) = AppConfig::load_or_default(&path);
    if let Some(level) = cli.log_level {
        config.logging.level = level;
    }

    match cli.command.unwrap_or(Command::Serve(ServeArgs::default())) {
        Command::Check => {
            if let Some(e) = load_error {
                eprintln!("❌ {}", e);
                std::process::exit(1);
            }
            print_summary(&path, &config);
            Ok(())
        }
        Command::Seed => {
            init_tracing(&config);
            report_load(&path, load_error);
            let (db, repos) = open_store(&config, true).await?;
            let inserted = seed_demo_data(repos.as_ref()).await?;
            info!(inserted, "Seeding finished");
            db.close().await?;
            Ok(())
        }
        Command::Serve(args) => {
            init_tracing(&config);
            report_load(&path, load_error);
            serve(config, args).await
        }
    }
}

fn report_load(path: &std::path::Path, load_error: Option<foodfast::shared::errors::AppError>) {
    match load_error {
        None => info!(path = %path.display(), "Configuration loaded"),
        Some(e) => warn!(error = %e, "Using default configuration"),
    }
}

async fn serve(mut config: AppConfig, args: ServeArgs) -> Result<(), StartError> {
    if let Some(host) = args.api_host {
        config.server.api_host = host;
    }
    if let Some(port) = args.api_port {
        config.server.api_port = port;
    }

    let handle = ServerHandle::start(ServerOptions {
        config,
        auto_migrate: !args.no_migrate,
        create_default_admin: !args.no_admin,
    })
    .await?;
    handle.install_signal_handler();
    info!("🚀 Press Ctrl+C to stop");

    handle.shutdown_signal().wait().await;
    handle.wait().await;
    Ok(())
}

fn print_summary(path: &std::path::Path, config: &AppConfig) {
    println!("✅ Configuration is valid");
    println!("   file      {}", path.display());
    println!("   listen    {}", config.server.address());
    println!("   database  {}", config.database.connection_url());
    println!("   logging   {} ({})", config.logging.level, config.logging.format);
    println!("   demo data {}", config.seed.demo_data);
    if config.vnpay.has_placeholder_credentials() {
        println!("   ⚠️  VNPay credentials are placeholders");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_invocation_serves() {
        let cli = Cli::try_parse_from(["foodfast"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn global_flags_work_after_subcommand() {
        let cli = Cli::try_parse_from(["foodfast", "serve", "--api-port", "3000", "-l", "debug"])
            .unwrap();
        assert_eq!(cli.log_level.as_deref(), Some("debug"));
        match cli.command {
            Some(Command::Serve(args)) => assert_eq!(args.api_port, Some(3000)),
            other => panic!("unexpected {:?}", other),
        }
    }
}
