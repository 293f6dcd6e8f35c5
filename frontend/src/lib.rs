//! Dimension Market - Frontend Rust/Leptos Application
//!
//! A WebAssembly frontend for browsing, buying and publishing 3D assets.
//! Domain logic (queries, wizard gates, purchase flow) lives in
//! `dimension-core`; this crate renders it and supplies the browser
//! implementations of its API and wallet traits.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        App                                   │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Header (nav, wallet status)                                 │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Routes                                                      │
//! │  ├── /, /explore       ExplorePage                          │
//! │  ├── /object/:id       AssetDetailPage                      │
//! │  ├── /upload           UploadPage                           │
//! │  └── /profile/:address ProfilePage                          │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Footer                                                      │
//! │  WalletModal (shared, opened by any page)                    │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`config`] - Build-time configuration
//! - [`components`] - UI components (Header, pages, WalletModal, etc.)
//! - [`services`] - Browser services (HTTP API, wallet)

use dimension_core::WalletSession;
use leptos::*;
use leptos_meta::*;
use leptos_router::*;

// =============================================================================
// Module declarations
// =============================================================================

pub mod config;
pub mod components;
pub mod services;

// =============================================================================
// Re-exports
// =============================================================================

pub use config::market_config;
pub use components::*;
pub use services::*;

// =============================================================================
// Application Entry Point
// =============================================================================

/// Install logging and mount the app. Called from `main.rs`.
pub fn start() {
    // Setup panic hook for better error messages
    console_error_panic_hook::set_once();

    // Setup console logging
    _ = console_log::init_with_level(log::Level::Debug);

    log::info!("🦀 Dimension Market - Starting Leptos App");

    mount_to_body(|| view! { <App/> });
}

#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let api = HttpMarketApi::new(market_config());
    log::debug!("📡 API base: {}", api.config().api_base);

    // Shared wallet session, handed to every page that needs it.
    let wallet = create_rw_signal(WalletSession::new());
    let wallet_modal = create_rw_signal(false);

    let explore = {
        let api = api.clone();
        move || view! { <ExplorePage api=api.clone()/> }
    };
    let detail = {
        let api = api.clone();
        move || view! { <AssetDetailPage api=api.clone() wallet=wallet wallet_modal=wallet_modal/> }
    };
    let upload = move || view! { <UploadPage api=api.clone() wallet=wallet wallet_modal=wallet_modal/> };

    view! {
        <Title text=config::APP_NAME/>
        <Router>
            <Header wallet=wallet wallet_modal=wallet_modal/>
            <main class="container">
                <Routes>
                    <Route path="/" view=explore.clone()/>
                    <Route path="/explore" view=explore/>
                    <Route path="/object/:id" view=detail/>
                    <Route path="/upload" view=upload/>
                    <Route path="/profile/:address" view=ProfilePage/>
                    <Route path="/*any" view=NotFoundPage/>
                </Routes>
            </main>
            <Footer/>
            <WalletModal wallet=wallet open=wallet_modal/>
        </Router>
    }
}
