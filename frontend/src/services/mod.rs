//! Browser-side services.
//!
//! # Services
//!
//! - [`api`] - Catalog API over `fetch` (gloo-net) and the `setTimeout` timer
//! - [`wallet`] - Injected Ethereum provider (MetaMask, etc.)

pub mod api;
pub mod wallet;

pub use api::*;
pub use wallet::*;
