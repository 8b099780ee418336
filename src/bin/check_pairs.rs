use anyhow::{bail, Result};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use czkk_bot::config::Config;
use czkk_bot::format_quote;
use czkk_bot::price::{HttpPoolDataSource, PriceFetcher};

#[derive(Parser, Debug)]
#[command(about = "Fetch every configured pair once and print what the bot would answer")]
struct Args {
    /// Path to config file (optional)
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = Config::load(args.config.as_deref())?;
    let fetcher = PriceFetcher::new(Arc::new(HttpPoolDataSource::new(&config.http)?));

    println!("🔍 Checking {} CZKK pairs...", config.pairs.len());

    let mut failed = 0;
    for pair in &config.pairs {
        println!("\n📊 /{} ({:?}, invert={})", pair.symbol, pair.pool.schema, pair.pool.invert);
        println!("   URL: {}", pair.pool.url());

        match fetcher.fetch_quote(&pair.pool).await {
            Ok(price) => println!(
                "✅ {} 1 {} = {} CZKK (raw {})",
                pair.emoji,
                pair.label,
                format_quote(Some(price)),
                price
            ),
            Err(e) => {
                failed += 1;
                println!("❌ {}", e);
            }
        }
    }

    println!("\n🔗 Contracts:");
    for contract in &config.contracts {
        println!("   {}: {}", contract.chain, contract.address);
    }

    if failed > 0 {
        bail!("{} of {} pairs failed", failed, config.pairs.len());
    }
    Ok(())
}
