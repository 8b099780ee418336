//! Response shapes of the supported pool-data APIs

use serde::Deserialize;

use crate::shared::errors::FetchError;

/// Which API response layout an endpoint returns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PriceSchema {
    /// `{"pair": {"priceUsd": "..."}}`
    DexScreener,
    /// `{"data": {"attributes": {"base_token_price_usd": "...", "quote_token_price_usd": "..."}}}`
    GeckoTerminal,
}

/// Both APIs send prices as decimal strings, but plain numbers are accepted too.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Decimal {
    Number(f64),
    Text(String),
}

impl Decimal {
    fn to_f64(&self, field: &'static str) -> Result<f64, FetchError> {
        match self {
            Decimal::Number(value) => Ok(*value),
            Decimal::Text(text) => text
                .trim()
                .parse::<f64>()
                .map_err(|e| FetchError::Parse(format!("{}: {:?} ({})", field, text, e))),
        }
    }
}

#[derive(Debug, Deserialize)]
struct DexScreenerResponse {
    pair: Option<DexScreenerPair>,
}

#[derive(Debug, Deserialize)]
struct DexScreenerPair {
    #[serde(rename = "priceUsd")]
    price_usd: Option<Decimal>,
}

#[derive(Debug, Deserialize)]
struct GeckoTerminalResponse {
    data: Option<GeckoTerminalPool>,
}

#[derive(Debug, Deserialize)]
struct GeckoTerminalPool {
    attributes: Option<GeckoTerminalAttributes>,
}

#[derive(Debug, Deserialize)]
struct GeckoTerminalAttributes {
    base_token_price_usd: Option<Decimal>,
    quote_token_price_usd: Option<Decimal>,
}

impl PriceSchema {
    /// Pull the raw price out of a response body.
    ///
    /// DexScreener reports the pair price directly; GeckoTerminal gives both
    /// legs in USD and the price is `base_usd / quote_usd`.
    pub fn extract(self, body: &str) -> Result<f64, FetchError> {
        match self {
            PriceSchema::DexScreener => {
                let response: DexScreenerResponse = serde_json::from_str(body)?;
                response
                    .pair
                    .and_then(|pair| pair.price_usd)
                    .ok_or(FetchError::MissingField("pair.priceUsd"))?
                    .to_f64("pair.priceUsd")
            }
            PriceSchema::GeckoTerminal => {
                let response: GeckoTerminalResponse = serde_json::from_str(body)?;
                let attributes = response
                    .data
                    .and_then(|data| data.attributes)
                    .ok_or(FetchError::MissingField("data.attributes"))?;

                let base_usd = attributes
                    .base_token_price_usd
                    .ok_or(FetchError::MissingField("base_token_price_usd"))?
                    .to_f64("base_token_price_usd")?;
                let quote_usd = attributes
                    .quote_token_price_usd
                    .ok_or(FetchError::MissingField("quote_token_price_usd"))?
                    .to_f64("quote_token_price_usd")?;

                divide(base_usd, quote_usd)
            }
        }
    }
}

/// Apply the optional inversion and reject anything that is not a usable price.
pub fn normalize(raw: f64, invert: bool) -> Result<f64, FetchError> {
    let price = if invert { divide(1.0, raw)? } else { raw };

    if !price.is_finite() || price <= 0.0 {
        return Err(FetchError::Degenerate(format!("price {} is not positive", price)));
    }
    Ok(price)
}

fn divide(numerator: f64, denominator: f64) -> Result<f64, FetchError> {
    if denominator == 0.0 {
        return Err(FetchError::Degenerate("zero denominator".to_string()));
    }
    Ok(numerator / denominator)
}
