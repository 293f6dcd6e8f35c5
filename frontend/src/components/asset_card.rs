use dimension_core::{pricing, Asset, Route};
use leptos::*;
use leptos_router::*;

/// Catalog tile linking to the asset's detail page.
#[component]
pub fn AssetCard(
    asset: Asset,
    /// Resolved thumbnail URL, if the asset has one.
    thumbnail: Option<String>,
) -> impl IntoView {
    let href = Route::Asset(asset.id.clone()).path();
    let usd = pricing::usd_card(&asset.price).unwrap_or_default();

    view! {
        <A href=href class="asset-card">
            <div class="asset-thumb">
                {match thumbnail {
                    Some(src) => view! { <img src=src alt=asset.name.clone() loading="lazy"/> }.into_view(),
                    None => view! { <div class="asset-thumb-placeholder">{asset.category.icon()}</div> }.into_view(),
                }}
                <span class="category-badge">{asset.category.label()}</span>
                <div class="asset-stats">
                    <span>"👁 " {asset.views}</span>
                    <span>"🛒 " {asset.purchases} " sold"</span>
                </div>
            </div>
            <div class="asset-info">
                <h3 class="asset-name">{asset.name.clone()}</h3>
                <p class="asset-description">{asset.description.clone()}</p>
                <div class="asset-price">
                    <span class="eth">"Ξ " {asset.price.clone()} " ETH"</span>
                    <span class="usd">{usd}</span>
                </div>
            </div>
        </A>
    }
}
