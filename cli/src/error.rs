//! Error types for the `dimension` CLI.

use thiserror::Error;

use dimension_core::{ApiError, MarketError, StagingError, WalletError};

/// Everything a CLI command can fail with.
#[derive(Debug, Error)]
pub enum CliError {
    /// Marketplace domain error (API, gates, wallet).
    #[error("{0}")]
    Market(#[from] MarketError),

    /// The catalog could not be listed; carries the underlying API message.
    #[error("Catalog unavailable: {0}")]
    CatalogUnavailable(String),

    /// Local file problem.
    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Bad configuration (e.g. relative API base).
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// HTTP client could not be built.
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON output failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<ApiError> for CliError {
    fn from(e: ApiError) -> Self {
        CliError::Market(e.into())
    }
}

impl From<WalletError> for CliError {
    fn from(e: WalletError) -> Self {
        CliError::Market(e.into())
    }
}

impl From<StagingError> for CliError {
    fn from(e: StagingError) -> Self {
        CliError::Market(e.into())
    }
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;
