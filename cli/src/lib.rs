//! # Dimension CLI - marketplace client for the terminal
//!
//! Talks to the same catalog API as the browser app, through `reqwest`,
//! and runs the same catalog / purchase / upload logic from
//! `dimension-core`.
//!
//! ## Modules
//!
//! - [`client`] - `reqwest` implementation of `MarketApi`
//! - [`commands`] - browse, show, buy, upload
//! - [`files`] - staging upload files from disk
//! - [`error`] - CLI error type

pub mod client;
pub mod commands;
pub mod error;
pub mod files;

pub use client::{MarketClient, TokioDelay};
pub use commands::{browse, buy, listing, show, upload, UploadArgs};
pub use error::{CliError, CliResult};
