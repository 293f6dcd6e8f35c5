use dimension_core::routes::{EXPLORE_PATH, UPLOAD_PATH};
use dimension_core::WalletSession;
use leptos::*;
use leptos_router::*;

#[component]
pub fn Header(
    wallet: RwSignal<WalletSession>,
    wallet_modal: RwSignal<bool>,
) -> impl IntoView {
    let connected = move || wallet.with(|s| s.is_connected());

    let on_wallet_click = move |_| {
        if connected() {
            return;
        }
        log::info!("🔑 Opening wallet modal");
        wallet_modal.set(true);
    };

    let on_disconnect = move |_| wallet.update(|s| s.disconnect());

    view! {
        <header>
            <div class="header-left">
                <A href="/" class="logo">"DIMENSION"</A>
                <nav class="header-nav">
                    <A href=EXPLORE_PATH class="nav-link">"Explore"</A>
                    <A href=UPLOAD_PATH class="nav-link">"Create"</A>
                </nav>
            </div>
            <div class="header-right">
                <div
                    class="wallet-status"
                    class:connected=connected
                    on:click=on_wallet_click
                    style="cursor: pointer;"
                >
                    <span class="wallet-dot" class:connected=connected></span>
                    <span id="walletText">
                        {move || wallet.with(|s| {
                            if s.is_busy() {
                                "Connecting...".to_string()
                            } else {
                                s.display_label()
                            }
                        })}
                    </span>
                </div>
                <Show when=connected fallback=|| view! {}>
                    <button class="wallet-disconnect" on:click=on_disconnect>
                        "Disconnect"
                    </button>
                </Show>
            </div>
        </header>
    }
}
