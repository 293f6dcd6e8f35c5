//! Injected Ethereum provider (MetaMask and compatible extensions).
//!
//! Talks to `window.ethereum` through the EIP-1193 `request` method.

use dimension_core::wallet::{self, SessionStore, WalletConnector};
use dimension_core::{WalletError, WalletResult, WalletSession};
use js_sys::{Array, Function, Object, Reflect};
use leptos::*;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;

/// Connector for the provider injected into the page.
#[derive(Clone, Copy, Debug, Default)]
pub struct InjectedWallet;

impl InjectedWallet {
    fn provider() -> Option<JsValue> {
        let window = web_sys::window()?;
        Reflect::get(&window, &JsValue::from_str("ethereum"))
            .ok()
            .filter(|v| !v.is_null() && !v.is_undefined())
    }

    /// Whether an extension is installed.
    pub fn is_available() -> bool {
        let available = Self::provider().is_some();
        if !available {
            log::warn!("⚠️  No Ethereum provider found");
        }
        available
    }
}

/// Best-effort message out of a rejected provider promise.
fn rejection_message(error: &JsValue) -> String {
    Reflect::get(error, &JsValue::from_str("message"))
        .ok()
        .and_then(|m| m.as_string())
        .unwrap_or_else(|| format!("{:?}", error))
}

impl WalletConnector for InjectedWallet {
    async fn request_account(&self) -> WalletResult<String> {
        let provider = Self::provider().ok_or(WalletError::Unavailable)?;

        let request = Reflect::get(&provider, &JsValue::from_str("request"))
            .ok()
            .and_then(|f| f.dyn_into::<Function>().ok())
            .ok_or(WalletError::Unavailable)?;

        let args = Object::new();
        Reflect::set(
            &args,
            &JsValue::from_str("method"),
            &JsValue::from_str("eth_requestAccounts"),
        )
        .map_err(|e| WalletError::Rejected(rejection_message(&e)))?;

        log::info!("🔌 Requesting wallet accounts...");
        let promise = request
            .call1(&provider, &args)
            .map_err(|e| WalletError::Rejected(rejection_message(&e)))?;
        let accounts = JsFuture::from(js_sys::Promise::resolve(&promise))
            .await
            .map_err(|e| WalletError::Rejected(rejection_message(&e)))?;

        let first = Array::from(&accounts)
            .get(0)
            .as_string()
            .ok_or(WalletError::NoAccount)?;
        wallet::validate_address(&first)
    }
}

/// The app-wide session signal, seen as a [`SessionStore`].
#[derive(Clone, Copy)]
struct SessionSignal(RwSignal<WalletSession>);

impl SessionStore for SessionSignal {
    fn modify<R>(&self, f: impl FnOnce(&mut WalletSession) -> R) -> Option<R> {
        self.0.try_update(f)
    }
}

/// Connect `session` through the injected provider.
pub async fn connect_wallet(session: RwSignal<WalletSession>) {
    wallet::connect(&SessionSignal(session), &InjectedWallet).await;
}
