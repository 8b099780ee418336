//! Common types used across the application

use serde::Deserialize;

use crate::price::PriceSchema;

const DEXSCREENER_API: &str = "https://api.dexscreener.com/latest/dex/pairs";
const GECKOTERMINAL_API: &str = "https://api.geckoterminal.com/api/v2/networks";

/// A DEX pool whose price is read from an indexing API
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PoolRef {
    pub network: String,
    pub address: String,
    pub schema: PriceSchema,
    /// Report `1 / price` instead of the API price
    #[serde(default)]
    pub invert: bool,
    /// Full endpoint URL; derived from schema, network and address when absent
    #[serde(default)]
    pub endpoint: Option<String>,
}

impl PoolRef {
    pub fn new(network: &str, address: &str, schema: PriceSchema, invert: bool) -> Self {
        Self {
            network: network.to_string(),
            address: address.to_string(),
            schema,
            invert,
            endpoint: None,
        }
    }

    /// Endpoint the fetcher GETs for this pool
    pub fn url(&self) -> String {
        if let Some(endpoint) = &self.endpoint {
            return endpoint.clone();
        }
        match self.schema {
            PriceSchema::DexScreener => {
                format!("{}/{}/{}", DEXSCREENER_API, self.network, self.address)
            }
            PriceSchema::GeckoTerminal => {
                format!("{}/{}/pools/{}", GECKOTERMINAL_API, self.network, self.address)
            }
        }
    }
}

/// One price command: `/btc` answers with the BTCB pool, and so on
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Pair {
    /// Command name without the slash, lowercase
    pub symbol: String,
    /// Asset name shown in replies
    pub label: String,
    pub emoji: String,
    pub pool: PoolRef,
}

/// Where the CZKK contract lives on one chain
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ContractAddress {
    pub chain: String,
    pub address: String,
}

impl ContractAddress {
    pub fn new(chain: &str, address: &str) -> Self {
        Self {
            chain: chain.to_string(),
            address: address.to_string(),
        }
    }
}
