// src/app.rs
use anyhow::{Context, Result};
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;
use teloxide::Bot;
use tracing::info;

use crate::bot::{runner, CommandResponder};
use crate::config::{self, Config};
use crate::price::{HttpPoolDataSource, PriceFetcher};

#[derive(Clone)]
pub struct AppCfg {
    pub bot_token: String,
    pub config: Config,
}

// The token is a credential and never goes to logs
impl fmt::Debug for AppCfg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppCfg")
            .field("bot_token", &"<redacted>")
            .field("config", &self.config)
            .finish()
    }
}

impl AppCfg {
    /// Config file (or built-in defaults) plus the token from the environment
    pub fn load(config_path: Option<PathBuf>) -> Result<Self> {
        let config = Config::load(config_path.as_deref()).context("load configuration")?;
        let bot_token = config::bot_token_from_env()?;
        Ok(Self { bot_token, config })
    }
}

/// Build the shared responder from a configuration
pub fn build_responder(config: Config) -> Result<CommandResponder> {
    let source = HttpPoolDataSource::new(&config.http).context("build HTTP client")?;
    let fetcher = PriceFetcher::new(Arc::new(source));
    Ok(CommandResponder::new(Arc::new(config), fetcher))
}

pub async fn run(app_cfg: AppCfg) -> Result<()> {
    info!("Starting CZKK price bot");
    for pair in &app_cfg.config.pairs {
        info!("✅ /{} → {} ({:?})", pair.symbol, pair.pool.url(), pair.pool.schema);
    }

    let responder = Arc::new(build_responder(app_cfg.config)?);
    let bot = Bot::new(app_cfg.bot_token);

    runner::run(bot, responder).await
}
