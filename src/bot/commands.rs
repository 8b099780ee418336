//! Command parsing
//!
//! Command names are matched case-insensitively, so `/btc` and `/BTC` are the
//! same command, and a `@botname` suffix is accepted when it names this bot.

use crate::config::Config;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `/start` or `/help`
    Start,
    /// `/czkk`: contract addresses
    Czkk,
    /// `/price`: every configured pair at once
    Price,
    /// `/<symbol>` for a configured pair
    Pair(String),
}

impl Command {
    /// Parse a message text. `None` for anything that is not one of our commands.
    pub fn parse(text: &str, config: &Config, bot_username: Option<&str>) -> Option<Self> {
        let token = text.trim_start().split_whitespace().next()?;
        let token = token.strip_prefix('/')?;

        let (name, mention) = match token.split_once('@') {
            Some((name, mention)) => (name, Some(mention)),
            None => (token, None),
        };
        if let (Some(mention), Some(username)) = (mention, bot_username) {
            if !mention.eq_ignore_ascii_case(username) {
                return None;
            }
        }

        let name = name.to_lowercase();
        match name.as_str() {
            "start" | "help" => Some(Command::Start),
            "czkk" => Some(Command::Czkk),
            "price" => Some(Command::Price),
            symbol => config.pair(symbol).map(|pair| Command::Pair(pair.symbol.clone())),
        }
    }
}

/// (command, description) pairs for the Telegram command menu
pub fn command_menu(config: &Config) -> Vec<(String, String)> {
    let mut menu = vec![("start".to_string(), "Show available commands".to_string())];
    for pair in &config.pairs {
        menu.push((pair.symbol.clone(), format!("CZKK per {}", pair.label)));
    }
    menu.push(("price".to_string(), "All CZKK prices".to_string()));
    menu.push(("czkk".to_string(), "CZKK contract addresses".to_string()));
    menu
}
