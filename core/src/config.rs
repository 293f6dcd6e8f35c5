//! Marketplace configuration.
//!
//! Constants shared by every client, plus [`MarketConfig`] for the values
//! that differ per deployment (API base, media host, simulated tx delay).
//! The media origin used to be baked into the rendering code; it now lives
//! here so a deployment can point at its own asset host.

use std::time::Duration;

/// Relative API base used by the browser build (proxied by the dev server).
pub const DEFAULT_API_BASE: &str = "/api";

/// Absolute API base for clients that cannot rely on a dev proxy (CLI).
pub const DEFAULT_REMOTE_API_BASE: &str = "https://dimension-server-bckr.onrender.com/api";

/// Host serving `thumbnailUrl` / `modelUrl` paths.
pub const DEFAULT_MEDIA_ORIGIN: &str = "https://dimension-server-bckr.onrender.com";

/// Application name shown in wallet prompts.
pub const APP_NAME: &str = "Dimension Market";

/// Fixed ETH → USD conversion rate for price estimates.
pub const USD_PER_ETH: f64 = 2200.0;

/// Platform fee taken on each sale, in percent.
pub const PLATFORM_FEE_PERCENT: f64 = 2.5;

/// Maximum model file size (50 MB).
pub const MAX_MODEL_SIZE: u64 = 50 * 1024 * 1024;

/// Maximum thumbnail size (5 MB).
pub const MAX_THUMBNAIL_SIZE: u64 = 5 * 1024 * 1024;

/// Simulated blockchain confirmation time.
pub const DEFAULT_TX_DELAY_MS: u64 = 2000;

/// Quiet period before a search keystroke burst issues a request.
pub const SEARCH_DEBOUNCE_MS: u64 = 300;

/// Environment keys read by [`MarketConfig::from_lookup`].
pub const ENV_API_BASE: &str = "DIMENSION_API_BASE";
pub const ENV_MEDIA_ORIGIN: &str = "DIMENSION_MEDIA_ORIGIN";
pub const ENV_TX_DELAY_MS: &str = "DIMENSION_TX_DELAY_MS";

/// Deployment-specific settings.
#[derive(Clone, Debug, PartialEq)]
pub struct MarketConfig {
    /// Base URL of the catalog API, without trailing slash.
    pub api_base: String,
    /// Origin that relative media paths are resolved against.
    pub media_origin: String,
    /// How long the simulated purchase transaction takes.
    pub simulated_tx_delay: Duration,
}

impl Default for MarketConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            media_origin: DEFAULT_MEDIA_ORIGIN.to_string(),
            simulated_tx_delay: Duration::from_millis(DEFAULT_TX_DELAY_MS),
        }
    }
}

impl MarketConfig {
    /// Build a config from a key lookup, falling back to defaults.
    ///
    /// The CLI passes `std::env::var`; tests pass a closure over a map.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(base) = lookup(ENV_API_BASE).filter(|v| !v.trim().is_empty()) {
            config.api_base = base;
        }
        if let Some(origin) = lookup(ENV_MEDIA_ORIGIN).filter(|v| !v.trim().is_empty()) {
            config.media_origin = origin;
        }
        if let Some(raw) = lookup(ENV_TX_DELAY_MS) {
            match raw.trim().parse::<u64>() {
                Ok(ms) => config.simulated_tx_delay = Duration::from_millis(ms),
                Err(_) => log::warn!("⚠️ Ignoring invalid {}={:?}", ENV_TX_DELAY_MS, raw),
            }
        }

        let base = config.api_base.clone();
        let origin = config.media_origin.clone();
        config.with_api_base(base).with_media_origin(origin)
    }

    /// Replace the API base, normalizing away trailing slashes.
    pub fn with_api_base(mut self, base: impl Into<String>) -> Self {
        self.api_base = base.into().trim_end_matches('/').to_string();
        self
    }

    /// Replace the media origin, normalizing away trailing slashes.
    pub fn with_media_origin(mut self, origin: impl Into<String>) -> Self {
        self.media_origin = origin.into().trim_end_matches('/').to_string();
        self
    }

    /// Full URL for an API path such as `/objects/42`.
    pub fn api_url(&self, path: &str) -> String {
        join(&self.api_base, path)
    }

    /// Resolve a media reference returned by the API.
    ///
    /// Absolute URLs pass through untouched.
    pub fn media_url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            return path.to_string();
        }
        join(&self.media_origin, path)
    }
}

fn join(base: &str, path: &str) -> String {
    let base = base.trim_end_matches('/');
    if path.is_empty() {
        base.to_string()
    } else if path.starts_with('/') {
        format!("{}{}", base, path)
    } else {
        format!("{}/{}", base, path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let config = MarketConfig::default();
        assert_eq!(config.api_base, "/api");
        assert_eq!(config.api_url("/objects"), "/api/objects");
        assert_eq!(config.simulated_tx_delay, Duration::from_millis(2000));
    }

    #[test]
    fn test_media_url_resolution() {
        let config = MarketConfig::default().with_media_origin("https://cdn.example.com/");
        assert_eq!(
            config.media_url("/uploads/thumb.png"),
            "https://cdn.example.com/uploads/thumb.png"
        );
        assert_eq!(
            config.media_url("uploads/model.glb"),
            "https://cdn.example.com/uploads/model.glb"
        );
        assert_eq!(
            config.media_url("https://elsewhere.io/a.png"),
            "https://elsewhere.io/a.png"
        );
    }

    #[test]
    fn test_from_lookup() {
        let env: HashMap<&str, &str> = [
            (ENV_API_BASE, "https://market.example.com/api/"),
            (ENV_MEDIA_ORIGIN, "https://media.example.com//"),
            (ENV_TX_DELAY_MS, "10"),
        ]
        .into_iter()
        .collect();

        let config = MarketConfig::from_lookup(|k| env.get(k).map(|v| v.to_string()));
        assert_eq!(config.api_base, "https://market.example.com/api");
        assert_eq!(config.media_origin, "https://media.example.com");
        assert_eq!(config.simulated_tx_delay, Duration::from_millis(10));
    }

    #[test]
    fn test_from_lookup_ignores_garbage_delay() {
        let config = MarketConfig::from_lookup(|k| {
            (k == ENV_TX_DELAY_MS).then(|| "soon".to_string())
        });
        assert_eq!(config, MarketConfig::default());
    }
}
