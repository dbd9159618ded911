//! Main entry point for the Support System API

use clap::Parser;
use std::path::PathBuf;
use support_api::{config::Config, error::Result, server::Server};
use tracing::{error, info};

#[derive(Parser)]
#[command(
    name = "support-api",
    about = "Support System REST API",
    version,
    author
)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Generate example configuration file
    #[arg(long)]
    gen_config: bool,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let log_level = if args.debug { "debug" } else { "info" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();

    info!("Starting Support System API v{}", support_api::VERSION);

    // Handle config generation
    if args.gen_config {
        let example_config = Config::generate_example()?;
        println!("{example_config}");
        return Ok(());
    }

    // Load configuration
    let config = Config::load(args.config.as_deref())?;
    info!(
        "Configuration loaded, binding to {}",
        config.server.bind_address
    );

    // Create and run server
    let server = Server::new(config).await?;

    match server.run().await {
        Ok(()) => {
            info!("Support System API shut down gracefully");
            Ok(())
        }
        Err(e) => {
            error!("Support System API error: {}", e);
            Err(e)
        }
    }
}
