use serde::Deserialize;
use std::collections::HashSet;
use std::{fs, path::Path};

use crate::price::PriceSchema;
use crate::shared::errors::ConfigError;
use crate::shared::types::{ContractAddress, Pair, PoolRef};

/// Env var holding the Telegram bot token
pub const BOT_TOKEN_ENV: &str = "BOT_TOKEN";

pub const CZKK_CONTRACT_BSC: &str = "0xd5defcb306d93d4cd5dd59e66c8d4dc3b74ef096";
pub const CZKK_CONTRACT_ETH: &str = "0x5dBbD676f70cF9Aac23b25A28e841239fa8d2685";

/// Commands handled by the bot itself; pair symbols may not reuse them
pub const RESERVED_COMMANDS: &[&str] = &["start", "help", "czkk", "price"];

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct HttpCfg {
    pub timeout_secs: u64,
    pub user_agent: String,
}

impl Default for HttpCfg {
    fn default() -> Self {
        Self {
            timeout_secs: 10,
            user_agent: concat!("czkk-bot/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub http: HttpCfg,
    pub pairs: Vec<Pair>,
    pub contracts: Vec<ContractAddress>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            http: HttpCfg::default(),
            pairs: vec![
                default_pair("btc", "BTCB", "₿", "0x3458ae2d9409f138a879fca6ff59cb0d397769bb"),
                default_pair("usdt", "USDT", "💵", "0x06313b57eac23e0c005a76f81972175c7e8f42ef"),
                default_pair("bnb", "WBNB", "🟡", "0x862c173c27cbe6a29ec495f4a2cba4fe21da9689"),
            ],
            contracts: vec![
                ContractAddress::new("BSC", CZKK_CONTRACT_BSC),
                ContractAddress::new("Ethereum", CZKK_CONTRACT_ETH),
            ],
        }
    }
}

// CZKK is the base token of every default pool, so the inverted ratio is CZKK per asset
fn default_pair(symbol: &str, label: &str, emoji: &str, pool_address: &str) -> Pair {
    Pair {
        symbol: symbol.to_string(),
        label: label.to_string(),
        emoji: emoji.to_string(),
        pool: PoolRef::new("bsc", pool_address, PriceSchema::GeckoTerminal, true),
    }
}

impl Config {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let s = fs::read_to_string(path.as_ref()).map_err(|source| ConfigError::Read {
            path: path.as_ref().display().to_string(),
            source,
        })?;
        Self::from_toml(&s)
    }

    pub fn from_toml(s: &str) -> Result<Self, ConfigError> {
        let mut cfg: Self = toml::from_str(s)?;
        for pair in &mut cfg.pairs {
            pair.symbol = pair.symbol.trim_start_matches('/').to_lowercase();
        }
        cfg.validate()?;
        Ok(cfg)
    }

    /// Config file when given, compiled-in defaults otherwise
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.pairs.is_empty() {
            return Err(invalid("at least one pair is required".to_string()));
        }
        if self.http.timeout_secs == 0 {
            return Err(invalid("http.timeout_secs must be positive".to_string()));
        }

        let mut seen = HashSet::new();
        for pair in &self.pairs {
            let symbol = pair.symbol.as_str();
            let well_formed = symbol.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');
            if symbol.is_empty() || !well_formed {
                return Err(invalid(format!("invalid pair symbol {:?}", symbol)));
            }
            if RESERVED_COMMANDS.contains(&symbol) {
                return Err(invalid(format!("pair symbol {:?} is a built-in command", symbol)));
            }
            if !seen.insert(symbol) {
                return Err(invalid(format!("duplicate pair symbol {:?}", symbol)));
            }
            validate_pool(symbol, &pair.pool)?;
        }

        for contract in &self.contracts {
            if contract.address.trim().is_empty() {
                return Err(invalid(format!("contract on {} has no address", contract.chain)));
            }
        }
        Ok(())
    }

    pub fn pair(&self, symbol: &str) -> Option<&Pair> {
        self.pairs.iter().find(|pair| pair.symbol == symbol)
    }
}

// A derived URL needs both network and address; an explicit endpoint replaces them
fn validate_pool(symbol: &str, pool: &PoolRef) -> Result<(), ConfigError> {
    if pool.address.trim().is_empty() {
        return Err(invalid(format!("pair {:?} has no pool address", symbol)));
    }
    match &pool.endpoint {
        Some(endpoint) if endpoint.trim().is_empty() => {
            Err(invalid(format!("pair {:?} has an empty endpoint", symbol)))
        }
        None if pool.network.trim().is_empty() => {
            Err(invalid(format!("pair {:?} has no network", symbol)))
        }
        _ => Ok(()),
    }
}

fn invalid(message: String) -> ConfigError {
    ConfigError::Invalid(message)
}

/// Read the bot token from the environment
pub fn bot_token_from_env() -> Result<String, ConfigError> {
    match std::env::var(BOT_TOKEN_ENV) {
        Ok(token) if !token.trim().is_empty() => Ok(token.trim().to_string()),
        _ => Err(ConfigError::MissingEnv(BOT_TOKEN_ENV)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let cfg = Config::default();
        cfg.validate().unwrap();
        assert_eq!(cfg.pairs.len(), 3);
        assert_eq!(cfg.pair("btc").unwrap().label, "BTCB");
        assert!(cfg.pair("eth").is_none());
        assert_eq!(cfg.contracts[0].address, CZKK_CONTRACT_BSC);
        assert_eq!(cfg.contracts[1].address, CZKK_CONTRACT_ETH);
    }

    #[test]
    fn test_parse_config_file() {
        let toml = r#"
            [http]
            timeout_secs = 3

            [[pairs]]
            symbol = "/USDT"
            label = "USDT"
            emoji = "💵"
            pool = { network = "bsc", address = "0x0631", schema = "dexscreener" }

            [[contracts]]
            chain = "BSC"
            address = "0xd5de"
        "#;

        let cfg = Config::from_toml(toml).unwrap();
        assert_eq!(cfg.http.timeout_secs, 3);
        assert_eq!(cfg.http.user_agent, HttpCfg::default().user_agent);
        assert_eq!(cfg.pairs.len(), 1);
        assert_eq!(cfg.pairs[0].symbol, "usdt");
        assert_eq!(cfg.pairs[0].pool.schema, PriceSchema::DexScreener);
        assert!(!cfg.pairs[0].pool.invert);
        assert_eq!(cfg.contracts.len(), 1);
    }

    #[test]
    fn test_missing_sections_use_defaults() {
        let cfg = Config::from_toml("[http]\ntimeout_secs = 20\n").unwrap();
        assert_eq!(cfg.http.timeout_secs, 20);
        assert_eq!(cfg.pairs, Config::default().pairs);
        assert_eq!(cfg.contracts, Config::default().contracts);
    }

    #[test]
    fn test_rejects_invalid_pairs() {
        let mut cfg = Config::default();
        cfg.pairs[1].symbol = "btc".to_string();
        assert!(matches!(cfg.validate(), Err(ConfigError::Invalid(_))));

        let mut cfg = Config::default();
        cfg.pairs[0].symbol = "czkk".to_string();
        assert!(matches!(cfg.validate(), Err(ConfigError::Invalid(_))));

        let mut cfg = Config::default();
        cfg.pairs.clear();
        assert!(matches!(cfg.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_parse_pool_table_with_endpoint() {
        let toml = r#"
            [[pairs]]
            symbol = "btc"
            label = "BTCB"
            emoji = "₿"

            [pairs.pool]
            network = "bsc"
            address = "0x3458"
            schema = "geckoterminal"
            invert = true
            endpoint = "https://api.geckoterminal.com/api/v2/networks/bsc/pools/0x3458"
        "#;

        let cfg = Config::from_toml(toml).unwrap();
        let pool = &cfg.pair("btc").unwrap().pool;
        assert_eq!(pool.schema, PriceSchema::GeckoTerminal);
        assert!(pool.invert);
        assert_eq!(
            pool.url(),
            "https://api.geckoterminal.com/api/v2/networks/bsc/pools/0x3458"
        );
    }

    #[test]
    fn test_parse_example_config() {
        let cfg = Config::from_toml(include_str!("../Config.example.toml")).unwrap();
        assert_eq!(cfg.pairs.len(), 3);
        assert_eq!(cfg.pair("usdt").unwrap().pool.schema, PriceSchema::DexScreener);
        assert_eq!(cfg.contracts.len(), 2);
    }

    #[test]
    fn test_rejects_missing_network() {
        let mut cfg = Config::default();
        cfg.pairs[0].pool.network = String::new();
        assert!(matches!(cfg.validate(), Err(ConfigError::Invalid(_))));

        // an explicit endpoint does not need a network
        cfg.pairs[0].pool.endpoint = Some("http://127.0.0.1:8080/pool".to_string());
        cfg.validate().unwrap();

        cfg.pairs[0].pool.endpoint = Some("  ".to_string());
        assert!(matches!(cfg.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_rejects_unknown_schema() {
        let toml = r#"
            [[pairs]]
            symbol = "btc"
            label = "BTCB"
            emoji = "₿"
            pool = { network = "bsc", address = "0x1", schema = "coingecko" }
        "#;
        assert!(matches!(Config::from_toml(toml), Err(ConfigError::Parse(_))));
    }
}
