//! Error types for the marketplace clients.
//!
//! One enum per concern, joined under [`MarketError`]:
//!
//! - [`ApiError`] - HTTP calls against the catalog API
//! - [`StagingError`] - files rejected when staged into the upload wizard
//! - [`GateFailure`] - a wizard step whose precondition does not hold
//! - [`SubmitBlocked`] - why an upload could not be submitted
//! - [`WalletError`] - wallet connection problems
//!
//! Conversion is automatic via `From`, so `?` works across boundaries.

use thiserror::Error;

use crate::wizard::Step;

// =============================================================================
// API Errors
// =============================================================================

/// Errors from the remote catalog API.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum ApiError {
    /// Request could not be sent or no response arrived.
    #[error("Network error: {0}")]
    Network(String),

    /// Request could not be built (bad URL, bad form part).
    #[error("Invalid request: {0}")]
    Request(String),

    /// Server answered with a non-success status.
    #[error("Server error ({status}): {body}")]
    Status { status: u16, body: String },

    /// The requested asset does not exist.
    #[error("Asset not found: {0}")]
    NotFound(String),

    /// Response body did not match the expected shape.
    #[error("Failed to parse response: {0}")]
    Decode(String),
}

impl ApiError {
    /// Map a non-success status to the matching variant.
    pub fn from_status(status: u16, body: impl Into<String>, resource: &str) -> Self {
        if status == 404 {
            ApiError::NotFound(resource.to_string())
        } else {
            ApiError::Status {
                status,
                body: body.into(),
            }
        }
    }
}

// =============================================================================
// Staging Errors
// =============================================================================

/// A file refused by a wizard file slot.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum StagingError {
    /// Extension / MIME type not on the slot's allow-list.
    #[error("Unsupported file type for {slot}: {file_name} (accepted: {accepted})")]
    UnsupportedType {
        slot: &'static str,
        file_name: String,
        accepted: String,
    },

    /// File exceeds the slot's size ceiling.
    #[error("{file_name} is too large: {size} bytes (max {max} bytes)")]
    TooLarge { file_name: String, size: u64, max: u64 },

    /// Zero-byte file.
    #[error("{0} is empty")]
    EmptyFile(String),
}

// =============================================================================
// Wizard Gates
// =============================================================================

/// The first reason a wizard step's gate is closed.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum GateFailure {
    #[error("Upload a 3D model file")]
    MissingModel,

    #[error("Upload a thumbnail image")]
    MissingThumbnail,

    #[error("Enter an asset name")]
    MissingName,

    #[error("Enter a description")]
    MissingDescription,

    #[error("Pick a category")]
    MissingCategory,

    #[error("Price must be a number")]
    InvalidPrice,

    #[error("Price must be greater than zero")]
    NonPositivePrice,
}

/// Why [`crate::wizard::UploadWizard::begin_submission`] refused.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum SubmitBlocked {
    /// Caller should open the wallet modal.
    #[error("Connect your wallet before publishing")]
    WalletNotConnected,

    /// Submission is only reachable from the pricing step.
    #[error("Finish step {0} first")]
    NotOnFinalStep(Step),

    /// A gate is closed; carries the step and reason.
    #[error("Step {step}: {failure}")]
    Gate { step: Step, failure: GateFailure },

    /// A submission is already running.
    #[error("Upload already in progress")]
    AlreadySubmitting,
}

// =============================================================================
// Wallet Errors
// =============================================================================

/// Wallet connection errors.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum WalletError {
    /// No injected provider (MetaMask or similar).
    #[error("No Ethereum wallet found. Please install MetaMask.")]
    Unavailable,

    /// The user dismissed the prompt or the provider failed.
    #[error("Wallet connection rejected: {0}")]
    Rejected(String),

    /// Provider answered without any account.
    #[error("Wallet returned no account")]
    NoAccount,

    /// Address is not a 0x-prefixed 20-byte hex string.
    #[error("Invalid wallet address: {0}")]
    InvalidAddress(String),
}

// =============================================================================
// Top-level
// =============================================================================

/// Umbrella error for client operations.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum MarketError {
    #[error("{0}")]
    Api(#[from] ApiError),

    #[error("{0}")]
    Staging(#[from] StagingError),

    #[error("{0}")]
    Gate(#[from] GateFailure),

    #[error("{0}")]
    Submit(#[from] SubmitBlocked),

    #[error("{0}")]
    Wallet(#[from] WalletError),
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for API calls.
pub type ApiResult<T> = Result<T, ApiError>;

/// Result type for wallet operations.
pub type WalletResult<T> = Result<T, WalletError>;

/// Result type for general client operations.
pub type MarketResult<T> = Result<T, MarketError>;
