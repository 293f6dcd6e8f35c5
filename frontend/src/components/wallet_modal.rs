//! Wallet connection dialog.
//!
//! Mounted once at the app root. Pages open it by setting `open`; the
//! purchase flow and the upload wizard both route here when no account is
//! connected.

use dimension_core::WalletSession;
use leptos::*;

use crate::services::wallet::{connect_wallet, InjectedWallet};

#[component]
pub fn WalletModal(
    wallet: RwSignal<WalletSession>,
    open: RwSignal<bool>,
) -> impl IntoView {
    let close = move |_| {
        wallet.update(|s| s.clear_error());
        open.set(false);
    };

    let on_connect = move |_| {
        spawn_local(async move {
            connect_wallet(wallet).await;
            if wallet.with_untracked(|s| s.is_connected()) {
                open.set(false);
            }
        });
    };

    view! {
        <Show when=move || open.get() fallback=|| view! {}>
            <div class="modal-backdrop" on:click=close>
                <div class="modal" on:click=|ev| ev.stop_propagation()>
                    <div class="modal-header">
                        <h2>"Connect Wallet"</h2>
                        <button class="modal-close" on:click=close>"✕"</button>
                    </div>

                    <p class="modal-text">
                        "Connect an Ethereum wallet to buy and publish 3D assets."
                    </p>

                    <Show
                        when=InjectedWallet::is_available
                        fallback=|| view! {
                            <div class="error-message">
                                "No Ethereum wallet found. "
                                <a href="https://metamask.io/download/" target="_blank">"Install MetaMask"</a>
                            </div>
                        }
                    >
                        <button
                            class="wallet-option"
                            disabled=move || wallet.with(|s| s.is_busy())
                            on:click=on_connect
                        >
                            <span class="wallet-option-icon">"🦊"</span>
                            {move || if wallet.with(|s| s.is_busy()) {
                                "Waiting for wallet..."
                            } else {
                                "MetaMask"
                            }}
                        </button>
                    </Show>

                    {move || wallet.with(|s| s.error().map(str::to_string)).map(|msg| view! {
                        <div class="error-message">
                            {msg}
                            <button class="error-dismiss" on:click=move |_| wallet.update(|s| s.clear_error())>
                                "Dismiss"
                            </button>
                        </div>
                    })}
                </div>
            </div>
        </Show>
    }
}
