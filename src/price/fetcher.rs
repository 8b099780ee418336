use std::sync::Arc;
use tracing::{debug, warn};

use super::schema::normalize;
use super::source::PoolDataSource;
use crate::shared::errors::FetchError;
use crate::shared::types::PoolRef;

/// Turns a pool reference into a price
#[derive(Clone)]
pub struct PriceFetcher {
    source: Arc<dyn PoolDataSource>,
}

impl PriceFetcher {
    pub fn new(source: Arc<dyn PoolDataSource>) -> Self {
        Self { source }
    }

    /// One GET, parse, normalize. No retries.
    pub async fn fetch_quote(&self, pool: &PoolRef) -> Result<f64, FetchError> {
        let url = pool.url();
        let body = self.source.fetch_body(&url).await?;
        let raw = pool.schema.extract(&body)?;
        normalize(raw, pool.invert)
    }

    /// Same as [`fetch_quote`](Self::fetch_quote) but collapses every failure
    /// to `None` after logging it once.
    pub async fn quote(&self, pool: &PoolRef) -> Option<f64> {
        match self.fetch_quote(pool).await {
            Ok(price) => {
                debug!(pool = %pool.address, price, "Fetched pool price");
                Some(price)
            }
            Err(e) => {
                warn!(url = %pool.url(), error = %e, "Error fetching pool price");
                None
            }
        }
    }
}
