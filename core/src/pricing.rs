//! Price parsing and USD estimates.
//!
//! Prices are ETH amounts kept as decimal strings. The USD figure shown next
//! to them uses the fixed [`USD_PER_ETH`] rate.

use crate::config::{PLATFORM_FEE_PERCENT, USD_PER_ETH};

/// Parse a user- or server-supplied ETH amount.
///
/// Surrounding whitespace is ignored; NaN and infinities are rejected.
pub fn parse_price(raw: &str) -> Option<f64> {
    let value = raw.trim().parse::<f64>().ok()?;
    value.is_finite().then_some(value)
}

/// True when the price is a number strictly greater than zero.
pub fn is_positive_price(raw: &str) -> bool {
    parse_price(raw).is_some_and(|p| p > 0.0)
}

/// USD value of an ETH amount.
pub fn usd_estimate(eth: f64) -> f64 {
    eth * USD_PER_ETH
}

/// `$110.00`-style estimate with the given number of decimals, in the same
/// plain fixed-point form the web app has always shown (no separators).
///
/// Returns `None` when the price does not parse or the estimate overflows.
pub fn format_usd(raw_price: &str, decimals: usize) -> Option<String> {
    let usd = usd_estimate(parse_price(raw_price)?);
    usd.is_finite().then(|| format!("${:.*}", decimals, usd))
}

/// Estimate line used on the detail page and in the wizard.
pub fn usd_hint(raw_price: &str) -> Option<String> {
    format_usd(raw_price, 2).map(|usd| format!("≈ {} USD", usd))
}

/// Rounded estimate used on catalog cards.
pub fn usd_card(raw_price: &str) -> Option<String> {
    format_usd(raw_price, 0).map(|usd| format!("~{}", usd))
}

/// Platform fee on one sale, in ETH.
pub fn platform_fee(eth: f64) -> f64 {
    eth * PLATFORM_FEE_PERCENT / 100.0
}

/// What the creator receives for one sale, in ETH.
pub fn creator_proceeds(eth: f64) -> f64 {
    eth - platform_fee(eth)
}

/// Smallest amount [`format_eth`] prints digits for.
const ETH_DISPLAY_FLOOR: f64 = 0.000001;

/// Trim an ETH float for display (`0.0475` stays, `1.50000` → `1.5`).
///
/// Positive amounts below six decimals read `< 0.000001 ETH` rather than
/// rounding to zero.
pub fn format_eth(eth: f64) -> String {
    if eth > 0.0 && eth < ETH_DISPLAY_FLOOR {
        return format!("< {} ETH", ETH_DISPLAY_FLOOR);
    }
    let text = format!("{:.6}", eth);
    let text = text.trim_end_matches('0').trim_end_matches('.');
    format!("{} ETH", text)
}
