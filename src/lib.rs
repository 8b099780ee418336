//! CZKK price bot
//! Answers Telegram commands with CZKK prices read from DEX pool APIs

pub mod app;
pub mod bot;
pub mod config;
pub mod format;
pub mod price;
pub mod shared;

// Re-export main types for convenience
pub use bot::{Command, CommandResponder};
pub use config::Config;
pub use format::format_quote;
pub use price::{PriceFetcher, PriceSchema};
