//! Wallet session handle.
//!
//! [`WalletSession`] is plain state handed to every view that needs the
//! connected account. It changes only through its own transitions
//! (`begin_connect`, `finish_connect`, `disconnect`, `clear_error`);
//! consumers read it and never poke fields directly.

use std::cell::RefCell;

use rand::Rng;

use crate::error::{WalletError, WalletResult};

/// Connection state shared by the catalog, detail and upload views.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct WalletSession {
    account: Option<String>,
    error: Option<String>,
    busy: bool,
}

impl WalletSession {
    /// Disconnected session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Session already bound to an account (CLI `--buyer`, tests).
    pub fn with_account(address: impl Into<String>) -> WalletResult<Self> {
        let address = validate_address(&address.into())?;
        Ok(Self {
            account: Some(address),
            ..Self::default()
        })
    }

    pub fn is_connected(&self) -> bool {
        self.account.is_some()
    }

    pub fn account(&self) -> Option<&str> {
        self.account.as_deref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    /// Mark a connection attempt as started.
    ///
    /// Returns `false` when one is already running.
    pub fn begin_connect(&mut self) -> bool {
        if self.busy {
            return false;
        }
        self.busy = true;
        self.error = None;
        true
    }

    /// Finish a connection attempt with its outcome.
    pub fn finish_connect(&mut self, outcome: WalletResult<String>) {
        self.busy = false;
        match outcome.and_then(|addr| validate_address(&addr)) {
            Ok(address) => {
                log::info!("✅ Wallet connected: {}", address);
                self.account = Some(address);
                self.error = None;
            }
            Err(e) => {
                log::error!("❌ Wallet connection failed: {}", e);
                self.error = Some(e.to_string());
            }
        }
    }

    pub fn disconnect(&mut self) {
        log::info!("🔌 Wallet disconnected");
        self.account = None;
        self.busy = false;
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    /// Header label: shortened address or a call to action.
    pub fn display_label(&self) -> String {
        match &self.account {
            Some(addr) => short_address(addr),
            None => "Connect Wallet".to_string(),
        }
    }
}

/// Something that can produce an account address.
///
/// The browser asks the injected provider; tests use a canned answer.
#[allow(async_fn_in_trait)]
pub trait WalletConnector {
    async fn request_account(&self) -> WalletResult<String>;
}

/// Shared cell holding the session (a reactive signal in the browser).
///
/// `modify` returns `None` when the cell is gone, e.g. after the view that
/// owned it was torn down.
pub trait SessionStore {
    fn modify<R>(&self, f: impl FnOnce(&mut WalletSession) -> R) -> Option<R>;
}

impl SessionStore for RefCell<WalletSession> {
    fn modify<R>(&self, f: impl FnOnce(&mut WalletSession) -> R) -> Option<R> {
        Some(f(&mut self.borrow_mut()))
    }
}

/// Run a full connect cycle against `session`.
///
/// The store is only touched before and after the provider round trip,
/// never across it.
pub async fn connect<S, C>(session: &S, connector: &C)
where
    S: SessionStore,
    C: WalletConnector,
{
    if !session.modify(|s| s.begin_connect()).unwrap_or(false) {
        log::warn!("⚠️ Wallet connection already in progress");
        return;
    }
    log::info!("🔑 Attempting to connect wallet...");
    let outcome = connector.request_account().await;
    if session.modify(|s| s.finish_connect(outcome)).is_none() {
        log::debug!("🚫 Wallet session dropped before the provider answered");
    }
}

/// `0x1234...abcd` form used in headers and cards.
pub fn short_address(address: &str) -> String {
    if address.len() <= 10 || !address.is_ascii() {
        return address.to_string();
    }
    format!("{}...{}", &address[..6], &address[address.len() - 4..])
}

/// Check for a `0x`-prefixed 40-hex-digit address and lowercase it.
pub fn validate_address(address: &str) -> WalletResult<String> {
    let trimmed = address.trim();
    let hex_part = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .ok_or_else(|| WalletError::InvalidAddress(trimmed.to_string()))?;

    if hex_part.len() != 40 || hex::decode(hex_part).is_err() {
        return Err(WalletError::InvalidAddress(trimmed.to_string()));
    }
    Ok(format!("0x{}", hex_part.to_ascii_lowercase()))
}

/// Placeholder transaction hash for the simulated purchase.
///
/// Not derived from anything; only used so the purchase record has a value.
pub fn placeholder_tx_hash() -> String {
    let bytes: [u8; 8] = rand::thread_rng().gen();
    format!("0x{}", hex::encode(bytes))
}
