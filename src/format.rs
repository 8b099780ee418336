// src/format.rs
use num_format::{Locale, ToFormattedString};

/// Placeholder shown when no price could be fetched
pub const NOT_AVAILABLE: &str = "N/A";

const MILLION: f64 = 1_000_000.0;
const THOUSAND: f64 = 1_000.0;

/// Render a quote for a chat reply.
///
/// Three tiers keep both sub-dollar prices and large per-token counts readable
/// without exponent notation:
/// - `>= 1,000,000` → millions with 2 decimals and an `M` suffix
/// - `>= 1,000` → rounded to an integer with thousands separators
/// - below that → 4 decimals
///
/// The tier is picked on the unrounded value, so 999,999.6 renders as
/// `1,000,000` rather than `1.00M`.
pub fn format_quote(quote: Option<f64>) -> String {
    match quote {
        None => NOT_AVAILABLE.to_string(),
        Some(value) if !value.is_finite() => NOT_AVAILABLE.to_string(),
        Some(value) if value >= MILLION => format!("{:.2}M", value / MILLION),
        Some(value) if value >= THOUSAND => (value.round() as u64).to_formatted_string(&Locale::en),
        Some(value) => format!("{:.4}", value),
    }
}
