//! Command responder: command in, reply text out
//!
//! Holds no mutable state, so one instance is shared by every handler.

use futures::future::join_all;
use std::sync::Arc;
use teloxide::types::ParseMode;
use teloxide::utils::html;

use super::commands::{command_menu, Command};
use crate::config::Config;
use crate::format::format_quote;
use crate::price::PriceFetcher;
use crate::shared::types::Pair;

/// Reply text plus the markup it is written in
#[derive(Debug, Clone, PartialEq)]
pub struct Reply {
    pub text: String,
    pub parse_mode: Option<ParseMode>,
}

impl Reply {
    fn plain(text: String) -> Self {
        Self { text, parse_mode: None }
    }

    fn html(text: String) -> Self {
        Self {
            text,
            parse_mode: Some(ParseMode::Html),
        }
    }
}

pub struct CommandResponder {
    config: Arc<Config>,
    fetcher: PriceFetcher,
}

impl CommandResponder {
    pub fn new(config: Arc<Config>, fetcher: PriceFetcher) -> Self {
        Self { config, fetcher }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub async fn respond(&self, command: &Command) -> Reply {
        match command {
            Command::Start => Reply::plain(self.help_text()),
            Command::Czkk => Reply::html(self.contracts_text()),
            Command::Price => Reply::plain(self.price_summary().await),
            Command::Pair(symbol) => match self.config.pair(symbol) {
                Some(pair) => Reply::plain(self.pair_reply(pair).await),
                // parse() only yields configured symbols
                None => Reply::plain(self.help_text()),
            },
        }
    }

    /// `₿ 1 BTCB = 2.50M CZKK`, or the fixed failure line
    pub async fn pair_reply(&self, pair: &Pair) -> String {
        match self.fetcher.quote(&pair.pool).await {
            Some(price) => format!(
                "{} 1 {} = {} CZKK",
                pair.emoji,
                pair.label,
                format_quote(Some(price))
            ),
            None => format!("Unable to fetch {}/CZKK rate.", pair.label),
        }
    }

    /// One line per pair, fetched concurrently; `N/A` for failed pairs
    pub async fn price_summary(&self) -> String {
        let quotes = join_all(
            self.config
                .pairs
                .iter()
                .map(|pair| self.fetcher.quote(&pair.pool)),
        )
        .await;

        let mut text = String::from("📊 CZKK prices\n");
        for (pair, quote) in self.config.pairs.iter().zip(quotes) {
            text.push_str(&format!(
                "\n{} 1 {} = {} CZKK",
                pair.emoji,
                pair.label,
                format_quote(quote)
            ));
        }
        text
    }

    pub fn contracts_text(&self) -> String {
        let mut text = String::from("<b>CZKK Contract Addresses:</b>\n");
        for contract in &self.config.contracts {
            text.push_str(&format!(
                "\n🔗 {}: <code>{}</code>",
                html::escape(&contract.chain),
                html::escape(&contract.address)
            ));
        }
        text
    }

    pub fn help_text(&self) -> String {
        let mut text = String::from("👋 Welcome to the CZKK price bot!\n\nCommands:");
        for (name, description) in command_menu(&self.config).into_iter().skip(1) {
            text.push_str(&format!("\n/{} - {}", name, description));
        }
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{CZKK_CONTRACT_BSC, CZKK_CONTRACT_ETH};
    use crate::price::fetcher::tests::StaticSource;
    use crate::shared::errors::FetchError;
    use std::sync::atomic::Ordering;

    fn gecko_body(base: &str, quote: &str) -> String {
        format!(
            r#"{{"data":{{"attributes":{{"base_token_price_usd":"{}","quote_token_price_usd":"{}"}}}}}}"#,
            base, quote
        )
    }

    fn responder(source: StaticSource) -> (CommandResponder, Arc<StaticSource>) {
        let source = Arc::new(source);
        let responder = CommandResponder::new(
            Arc::new(Config::default()),
            PriceFetcher::new(source.clone()),
        );
        (responder, source)
    }

    fn url(symbol: &str) -> String {
        Config::default().pair(symbol).unwrap().pool.url()
    }

    #[tokio::test]
    async fn test_pair_reply() {
        // 1 BTCB = 100,000 USD / 0.04 USD = 2.5M CZKK
        let body = gecko_body("0.04", "100000");
        let (responder, _) = responder(StaticSource::new().with(&url("btc"), Ok(body.as_str())));

        let reply = responder.respond(&Command::Pair("btc".to_string())).await;
        assert_eq!(reply.text, "₿ 1 BTCB = 2.50M CZKK");
        assert_eq!(reply.parse_mode, None);
    }

    #[tokio::test]
    async fn test_pair_reply_failure() {
        let (responder, source) =
            responder(StaticSource::new().with(&url("usdt"), Err(FetchError::Status(500))));

        let reply = responder.respond(&Command::Pair("usdt".to_string())).await;
        assert_eq!(reply.text, "Unable to fetch USDT/CZKK rate.");
        assert_eq!(source.requests.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_czkk_reply_needs_no_network() {
        let (responder, source) = responder(StaticSource::new());

        let reply = responder.respond(&Command::Czkk).await;
        assert!(reply.text.contains(CZKK_CONTRACT_BSC));
        assert!(reply.text.contains(CZKK_CONTRACT_ETH));
        assert!(reply.text.contains("<code>"));
        assert_eq!(reply.parse_mode, Some(ParseMode::Html));
        assert_eq!(source.requests.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_start_lists_commands() {
        let (responder, _) = responder(StaticSource::new());

        let reply = responder.respond(&Command::Start).await;
        for command in ["/btc", "/usdt", "/bnb", "/price", "/czkk"] {
            assert!(reply.text.contains(command), "missing {}", command);
        }
        assert!(!reply.text.contains("/start"));
    }

    #[tokio::test]
    async fn test_price_summary_marks_failures() {
        let btc = gecko_body("0.04", "100000");
        let usdt = gecko_body("0.0004", "1.0");
        let (responder, _) = responder(
            StaticSource::new()
                .with(&url("btc"), Ok(btc.as_str()))
                .with(&url("usdt"), Ok(usdt.as_str())),
        );

        let reply = responder.respond(&Command::Price).await;
        assert!(reply.text.contains("₿ 1 BTCB = 2.50M CZKK"));
        assert!(reply.text.contains("💵 1 USDT = 2,500 CZKK"));
        assert!(reply.text.contains("🟡 1 WBNB = N/A CZKK"));
    }

    #[tokio::test]
    async fn test_concurrent_commands_are_independent() {
        let btc = gecko_body("0.04", "100000");
        let bnb = gecko_body("0.5", "0.25");
        let (responder, _) = responder(
            StaticSource::new()
                .with(&url("btc"), Ok(btc.as_str()))
                .with(&url("bnb"), Ok(bnb.as_str())),
        );
        let responder = Arc::new(responder);

        let btc_cmd = Command::Pair("btc".to_string());
        let bnb_cmd = Command::Pair("bnb".to_string());
        let czkk_cmd = Command::Czkk;
        let (btc_reply, bnb_reply, czkk_reply) = tokio::join!(
            responder.respond(&btc_cmd),
            responder.respond(&bnb_cmd),
            responder.respond(&czkk_cmd),
        );

        assert_eq!(btc_reply.text, "₿ 1 BTCB = 2.50M CZKK");
        assert_eq!(bnb_reply.text, "🟡 1 WBNB = 0.5000 CZKK");
        assert!(czkk_reply.text.contains(CZKK_CONTRACT_BSC));
    }
}
