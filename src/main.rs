use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use czkk_bot::app;

#[derive(Parser, Debug)]
#[command(version, about = "Telegram bot reporting CZKK prices from DEX pools")]
struct Args {
    /// Path to config file (optional, built-in pairs are used otherwise)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Log filter used when RUST_LOG is not set
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // .env is optional; a real environment wins
    dotenv::dotenv().ok();

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let app_cfg = app::AppCfg::load(args.config)?;
    app::run(app_cfg).await
}
