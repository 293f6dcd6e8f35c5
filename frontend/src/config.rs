//! Application configuration.
//!
//! The browser has no environment, so deployment settings are baked in at
//! build time (`DIMENSION_API_BASE=... trunk build`). Anything not set falls
//! back to the defaults in [`dimension_core::config`], which expect the dev
//! server to proxy `/api` to the marketplace backend.

use dimension_core::config::{ENV_API_BASE, ENV_MEDIA_ORIGIN, ENV_TX_DELAY_MS};
use dimension_core::MarketConfig;

pub use dimension_core::config::{APP_NAME, SEARCH_DEBOUNCE_MS};

/// Settings captured from the build environment.
const BUILD_API_BASE: Option<&str> = option_env!("DIMENSION_API_BASE");
const BUILD_MEDIA_ORIGIN: Option<&str> = option_env!("DIMENSION_MEDIA_ORIGIN");
const BUILD_TX_DELAY_MS: Option<&str> = option_env!("DIMENSION_TX_DELAY_MS");

/// Configuration for this build.
pub fn market_config() -> MarketConfig {
    MarketConfig::from_lookup(|key| {
        let value = match key {
            k if k == ENV_API_BASE => BUILD_API_BASE,
            k if k == ENV_MEDIA_ORIGIN => BUILD_MEDIA_ORIGIN,
            k if k == ENV_TX_DELAY_MS => BUILD_TX_DELAY_MS,
            _ => None,
        };
        value.map(str::to_string)
    })
}
