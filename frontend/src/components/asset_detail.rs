//! Asset detail page with the simulated purchase.

use dimension_core::purchase::execute_purchase;
use dimension_core::routes::EXPLORE_PATH;
use dimension_core::{
    load_asset, pricing, Asset, CancelToken, DetailView, PurchaseFlow, PurchaseState, PurchaseStep,
    RequestSequencer, Route, WalletSession,
};
use leptos::*;
use leptos_meta::Title;
use leptos_router::*;

use crate::services::{GlooDelay, HttpMarketApi};

/// Absolute link to this asset for the share box.
fn share_link(asset: &Asset) -> String {
    let origin = web_sys::window()
        .and_then(|w| w.location().origin().ok())
        .unwrap_or_default();
    Route::Asset(asset.id.clone()).share_url(&origin)
}

fn open_in_new_tab(url: &str) {
    let opened = web_sys::window().and_then(|w| w.open_with_url_and_target(url, "_blank").ok());
    if opened.is_none() {
        log::warn!("⚠️ Could not open {}", url);
    }
}

/// Interactive 3D preview through the `<model-viewer>` web component
/// (loaded by `index.html`). Without a model file the thumbnail stands in.
#[component]
fn ModelStage(model: Option<String>, poster: Option<String>, alt: String) -> impl IntoView {
    match (model, poster) {
        (Some(src), poster) => view! {
            <model-viewer
                class="model-stage"
                src=src
                poster=poster.unwrap_or_default()
                alt=alt
                camera-controls=true
                auto-rotate=true
                shadow-intensity="1"
            ></model-viewer>
        }
        .into_view(),
        (None, Some(src)) => view! { <img class="model-stage" src=src alt=alt/> }.into_view(),
        (None, None) => view! {
            <div class="model-stage placeholder">
                <span class="format-badge">"3D"</span>
            </div>
        }
        .into_view(),
    }
}

#[component]
pub fn AssetDetailPage(
    api: HttpMarketApi,
    wallet: RwSignal<WalletSession>,
    wallet_modal: RwSignal<bool>,
) -> impl IntoView {
    let params = use_params_map();
    let id = create_memo(move |_| params.with(|p| p.get("id").cloned().unwrap_or_default()));

    let detail = create_rw_signal(DetailView::Loading);
    let flow = create_rw_signal(PurchaseFlow::new());
    let show_share = create_rw_signal(false);

    let alive = CancelToken::new();
    on_cleanup({
        let alive = alive.clone();
        move || alive.cancel()
    });

    // Load on every id change; only the newest load lands.
    {
        let api = api.clone();
        let alive = alive.clone();
        let loads = RequestSequencer::new();
        create_effect(move |_| {
            let id = id.get();
            let ticket = loads.issue();
            detail.set(DetailView::Loading);
            flow.set(PurchaseFlow::new());
            show_share.set(false);

            let api = api.clone();
            let alive = alive.clone();
            let loads = loads.clone();
            spawn_local(async move {
                let loaded = load_asset(&api, &id).await;
                if loads.is_current(ticket) {
                    alive.commit(|| detail.set(loaded));
                }
            });
        });
    }

    // Wallet modal closed while a purchase was waiting on it.
    create_effect(move |_| {
        if wallet_modal.get() {
            return;
        }
        if flow.with_untracked(|f| f.state() == PurchaseState::AwaitingConnection) {
            let session = wallet.get_untracked();
            flow.update(|f| f.connection_resolved(&session));
        }
    });

    let tx_delay = api.config().simulated_tx_delay;
    let media = api.config().clone();

    let on_purchase = Callback::new(move |asset: Asset| {
        let session = wallet.get_untracked();
        match flow.try_update(|f| f.request(&asset, &session)) {
            Some(PurchaseStep::AwaitingConnection) => {
                log::info!("🔑 Wallet required for purchase");
                wallet_modal.set(true);
            }
            Some(PurchaseStep::Submit(ticket)) => {
                let api = api.clone();
                let alive = alive.clone();
                spawn_local(async move {
                    let result = execute_purchase(&api, &GlooDelay, tx_delay, &ticket).await;
                    alive.commit(|| {
                        flow.update(|f| {
                            f.complete(&ticket, result);
                        })
                    });
                });
            }
            Some(PurchaseStep::AlreadyPurchased) => match asset.model_url.as_deref() {
                Some(path) => open_in_new_tab(&api.media_url(path)),
                None => log::warn!("⚠️ {} has no model file", asset.id),
            },
            Some(PurchaseStep::AlreadyInFlight) | None => {}
        }
    });

    view! {
        {move || match detail.get() {
            DetailView::Loading => view! {
                <div class="detail skeleton">
                    <div class="detail-media skeleton-block"></div>
                    <div class="detail-info">
                        <div class="skeleton-line wide"></div>
                        <div class="skeleton-line"></div>
                        <div class="skeleton-block short"></div>
                    </div>
                </div>
            }
            .into_view(),
            DetailView::NotFound => view! {
                <Title text="Not found | Dimension Market"/>
                <div class="not-found">
                    <h2>"Object Not Found"</h2>
                    <A href=EXPLORE_PATH>"Back to Explore"</A>
                </div>
            }
            .into_view(),
            DetailView::Loaded(asset) => {
                let thumbnail = asset.thumbnail_url.as_deref().map(|p| media.media_url(p));
                let model = asset.model_url.as_deref().map(|p| media.media_url(p));
                let profile = Route::Profile(asset.creator_address.clone()).path();
                let usd = pricing::usd_hint(&asset.price).unwrap_or_default();
                let link = share_link(&asset);
                let initial = asset.creator_initial().to_string();
                let creator_name = asset.creator_name();
                let file_format = asset.model_format().unwrap_or("Unknown");
                let published = asset.created_at.clone().unwrap_or_else(|| "-".to_string());
                let for_click = asset.clone();

                view! {
                    <Title text=format!("{} | Dimension Market", asset.name)/>
                    <A href=EXPLORE_PATH class="back-link">"← Back to Explore"</A>
                    <div class="detail">
                        <div class="detail-media">
                            <ModelStage model=model poster=thumbnail.clone() alt=asset.name.clone()/>
                            {thumbnail.map(|src| view! {
                                <div class="detail-gallery">
                                    <img class="gallery-thumb active" src=src alt=asset.name.clone()/>
                                </div>
                            })}
                        </div>

                        <div class="detail-info">
                            <span class="category-badge">{asset.category.label()}</span>
                            <h1>{asset.name.clone()}</h1>

                            <A href=profile class="creator">
                                <span class="creator-avatar">{initial}</span>
                                <span class="creator-meta">
                                    <span class="creator-label">"Creator"</span>
                                    <span class="creator-name">{creator_name}</span>
                                </span>
                            </A>

                            <div class="detail-stats">
                                <span>"👁 " {asset.views} " views"</span>
                                <span>"🛒 " {asset.purchases} " sold"</span>
                            </div>

                            <div class="detail-description">
                                <h3>"Description"</h3>
                                <p>{asset.description.clone()}</p>
                            </div>

                            <div class="price-box">
                                <div class="price-row">
                                    <span class="price-label">"Current Price"</span>
                                    <span class="price-value">"Ξ " {asset.price.clone()} " ETH"</span>
                                </div>
                                <p class="price-usd">{usd}</p>

                                <button
                                    class="buy-button"
                                    class:purchased={move || flow.with(|f| f.state() == PurchaseState::Purchased)}
                                    disabled=move || flow.with(|f| f.is_submitting())
                                    on:click=move |_| on_purchase.call(for_click.clone())
                                >
                                    {move || {
                                        let session = wallet.get();
                                        flow.with(|f| f.button_label(&session))
                                    }}
                                </button>

                                {move || flow.with(|f| f.last_error().map(str::to_string)).map(|msg| view! {
                                    <div class="error-message">
                                        {msg}
                                        <button class="error-dismiss" on:click=move |_| flow.update(|f| f.dismiss_error())>
                                            "Dismiss"
                                        </button>
                                    </div>
                                })}

                                <button class="secondary-button" on:click=move |_| show_share.update(|s| *s = !*s)>
                                    "Share"
                                </button>
                                <Show when=move || show_share.get() fallback=|| view! {}>
                                    <input class="share-link" type="text" readonly=true value=link.clone()/>
                                </Show>
                            </div>

                            <details class="detail-accordion">
                                <summary>"File Details"</summary>
                                <dl class="file-details">
                                    <dt>"Format"</dt>
                                    <dd>{file_format}</dd>
                                    <dt>"Category"</dt>
                                    <dd>{asset.category.label()}</dd>
                                    <dt>"Published"</dt>
                                    <dd>{published}</dd>
                                </dl>
                            </details>

                            <details class="detail-accordion">
                                <summary>"License"</summary>
                                <p>"Commercial use allowed. Attribution appreciated but not required."</p>
                            </details>
                        </div>
                    </div>
                }
                .into_view()
            }
        }}
    }
}

