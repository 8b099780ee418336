//! Pool price fetching: HTTP source, response schemas, normalization

pub mod fetcher;
pub mod schema;
pub mod source;

pub use fetcher::PriceFetcher;
pub use schema::PriceSchema;
pub use source::{HttpPoolDataSource, PoolDataSource};
