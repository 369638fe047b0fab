use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::info;

use review_normalizer::config::Config;
use review_normalizer::observability::{init_logging, init_metrics};
use review_normalizer::server;

#[derive(Parser)]
#[command(name = "review_normalizer")]
#[command(about = "Normalize Hostaway reviews and tag review text with issues")]
#[command(version)]
struct Cli {
    /// Path to a TOML config file (defaults to ./review_normalizer.toml when present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Address to bind, overrides config and environment
    #[arg(long)]
    host: Option<String>,

    /// Port to run the server on, overrides config and environment
    #[arg(short, long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env is optional
    dotenv::dotenv().ok();

    let cli = Cli::parse();

    let mut config = Config::load(cli.config.as_deref()).context("Failed to load configuration")?;
    if let Some(host) = cli.host {
        config.host = host;
    }
    if let Some(port) = cli.port {
        config.port = port;
    }

    let _guard = init_logging(config.log_dir.as_deref()).context("Failed to initialize logging")?;

    if config.metrics_enabled {
        init_metrics();
    }

    info!(host = %config.host, port = config.port, "Starting review normalizer");
    server::start_server(&config).await
}
