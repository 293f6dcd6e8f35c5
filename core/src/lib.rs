//! # Dimension Core - marketplace client domain
//!
//! Everything the browser app and the CLI share: catalog queries, the upload
//! wizard, the purchase flow and the wallet session. Nothing in here talks to
//! the network directly; the clients implement [`MarketApi`] with their own
//! HTTP stack and hand it to the async drivers below.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐    ┌──────────────────┐    ┌──────────────┐
//! │   Catalog    │───▶│ Detail/Purchase  │───▶│ Upload Wizard│
//! │ (query, URL) │    │ (simulated tx)   │    │ (3 gates)    │
//! └──────┬───────┘    └────────┬─────────┘    └──────┬───────┘
//!        │                     │                     │
//!        └─────────────┬───────┴─────────────────────┘
//!                      ▼
//!        ┌──────────────────────────┐   ┌──────────────────┐
//!        │  MarketApi (gloo/reqwest) │   │  WalletSession   │
//!        └──────────────────────────┘   └──────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`config`] - Constants and per-deployment settings
//! - [`error`] - Error types
//! - [`models`] - Assets, categories, purchases
//! - [`pricing`] - Price parsing and USD estimates
//! - [`catalog`] - Catalog query, URL mirroring, result state
//! - [`detail`] - Single asset loading
//! - [`purchase`] - Purchase state machine
//! - [`wizard`] - Upload wizard state machine
//! - [`wallet`] - Wallet session handle
//! - [`cancel`] - Late-response guards
//! - [`api`] - HTTP contract
//! - [`routes`] - Client routes

pub mod config;
pub mod error;
pub mod models;
pub mod pricing;

pub mod catalog;
pub mod detail;
pub mod purchase;
pub mod wizard;

pub mod api;
pub mod cancel;
pub mod routes;
pub mod wallet;

// =============================================================================
// Re-exports
// =============================================================================

pub use config::MarketConfig;

pub use error::{
    ApiError, ApiResult, GateFailure, MarketError, MarketResult, StagingError, SubmitBlocked,
    WalletError, WalletResult,
};

pub use models::{Asset, Category, Creator, PurchaseRecord, PurchaseRequest, SortOrder};

pub use catalog::{fetch_catalog, CatalogBrowser, CatalogQuery, CatalogView};
pub use detail::{load_asset, DetailView};
pub use purchase::{execute_purchase, purchase, PurchaseFlow, PurchaseState, PurchaseStep, PurchaseTicket};
pub use wizard::{
    publish, submit_upload, AssetSubmission, DraftSummary, FileMeta, FileSlot, StagedFile, Step,
    UploadDraft, UploadWizard,
};

pub use api::{Delay, MarketApi, NoDelay};
pub use cancel::{CancelToken, Debouncer, RequestSequencer, RequestTicket};
pub use routes::Route;
pub use wallet::{SessionStore, WalletConnector, WalletSession};
