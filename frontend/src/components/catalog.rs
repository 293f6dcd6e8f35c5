//! Catalog page.
//!
//! The URL query string is the source of truth: filter, sort and search
//! controls navigate, and the page fetches whenever the parsed query
//! changes. A saved link therefore reproduces the same listing.

use std::time::Duration;

use dimension_core::{
    CancelToken, CatalogBrowser, CatalogQuery, CatalogView, Category, Debouncer, MarketApi,
    SortOrder,
};
use leptos::*;
use leptos_meta::Title;
use leptos_router::*;

use crate::components::AssetCard;
use crate::config::SEARCH_DEBOUNCE_MS;
use crate::services::{GlooDelay, HttpMarketApi};

#[component]
pub fn ExplorePage(api: HttpMarketApi) -> impl IntoView {
    let location = use_location();
    let navigate = use_navigate();
    let media = api.config().clone();

    let browser = create_rw_signal(CatalogBrowser::new());
    let view_state = create_memo(move |_| browser.with(|b| b.view().clone()));
    let query = create_memo(move |_| CatalogQuery::from_location_query(&location.search.get()));

    let alive = CancelToken::new();
    on_cleanup({
        let alive = alive.clone();
        move || alive.cancel()
    });

    // Query -> fetch. Identical queries do not refetch.
    {
        let alive = alive.clone();
        create_effect(move |_| {
            let query = query.get();
            let Some(ticket) = browser.try_update(|b| b.set_query(query.clone())).flatten() else {
                return;
            };
            let api = api.clone();
            let alive = alive.clone();
            spawn_local(async move {
                let result = api.list_assets(&query).await;
                alive.commit(|| {
                    browser.update(|b| {
                        b.settle(ticket, result);
                    })
                });
            });
        });
    }

    let set_query = Callback::new(move |(next, replace): (CatalogQuery, bool)| {
        let path = next.location_path(&location.pathname.get_untracked());
        navigate(
            &path,
            NavigateOptions {
                replace,
                ..Default::default()
            },
        );
    });

    // Search box: keep keystrokes local, push to the URL once typing pauses.
    let search_text = create_rw_signal(query.get_untracked().search);
    create_effect(move |_| {
        let current = query.get().search;
        if search_text.get_untracked().trim() != current {
            search_text.set(current);
        }
    });

    let debouncer = Debouncer::new(GlooDelay, Duration::from_millis(SEARCH_DEBOUNCE_MS));
    let on_search = {
        let alive = alive.clone();
        move |ev: web_sys::Event| {
            let text = event_target_value(&ev);
            search_text.set(text.clone());
            let debouncer = debouncer.clone();
            let alive = alive.clone();
            spawn_local(async move {
                let Some(text) = debouncer.settle(text).await else {
                    return;
                };
                if !alive.is_cancelled() {
                    set_query.call((query.get_untracked().with_search(text), true));
                }
            });
        }
    };

    let on_sort = move |ev: web_sys::Event| match event_target_value(&ev).parse::<SortOrder>() {
        Ok(sort) => set_query.call((query.get_untracked().with_sort(sort), false)),
        Err(e) => log::warn!("⚠️ {}", e),
    };

    // Grid or single-column list; purely presentational, not mirrored to the URL.
    let list_layout = create_rw_signal(false);

    let category_button = move |category: Option<Category>| {
        let label = category.map(|c| c.label()).unwrap_or("All Assets");
        view! {
            <button
                class="category-button"
                class:active={move || query.with(|q| q.category == category)}
                on:click=move |_| set_query.call((query.get_untracked().with_category(category), false))
            >
                {label}
            </button>
        }
    };

    view! {
        <Title text="Explore | Dimension Market"/>
        <div class="explore">
            <div class="page-header">
                <h1>"Explore " <span class="gradient-text">"3D Assets"</span></h1>
                <p class="subtitle">"Discover unique 3D objects from talented creators worldwide"</p>
            </div>

            <div class="toolbar">
                <input
                    type="text"
                    class="search-input"
                    placeholder="Search assets..."
                    prop:value=move || search_text.get()
                    on:input=on_search
                />
                <select class="sort-select" on:change=on_sort>
                    {SortOrder::ALL
                        .into_iter()
                        .map(|sort| view! {
                            <option
                                value=sort.as_str()
                                selected=move || query.with(|q| q.sort == sort)
                            >
                                {sort.label()}
                            </option>
                        })
                        .collect_view()}
                </select>
                <div class="layout-toggle">
                    <button
                        class="layout-button"
                        class:active={move || !list_layout.get()}
                        title="Grid view"
                        on:click=move |_| list_layout.set(false)
                    >
                        "▦"
                    </button>
                    <button
                        class="layout-button"
                        class:active={move || list_layout.get()}
                        title="List view"
                        on:click=move |_| list_layout.set(true)
                    >
                        "☰"
                    </button>
                </div>
            </div>

            <div class="explore-body">
                <aside class="categories">
                    <h3>"Categories"</h3>
                    <nav>
                        {category_button(None)}
                        {Category::ALL.into_iter().map(|c| category_button(Some(c))).collect_view()}
                    </nav>
                </aside>

                <section class="results">
                    {move || match view_state.get() {
                        CatalogView::Loading => view! {
                            <div class="asset-grid">
                                {(0..6).map(|_| view! { <div class="asset-card skeleton"></div> }).collect_view()}
                            </div>
                        }
                        .into_view(),
                        CatalogView::Empty => view! {
                            <div class="empty-state">
                                <div class="empty-icon">"🔍"</div>
                                <h3>"No assets found"</h3>
                                <p>"Try adjusting your search or filters"</p>
                            </div>
                        }
                        .into_view(),
                        CatalogView::Unavailable(reason) => view! {
                            <div class="error-state">
                                <div class="empty-icon">"⚠️"</div>
                                <h3>"The catalog is unavailable right now"</h3>
                                <p class="error-detail">{reason}</p>
                            </div>
                        }
                        .into_view(),
                        CatalogView::Loaded(assets) => {
                            let count = assets.len();
                            let cards = assets
                                .into_iter()
                                .map(|asset| {
                                    let thumbnail = asset.thumbnail_url.as_deref().map(|p| media.media_url(p));
                                    view! { <AssetCard asset=asset thumbnail=thumbnail/> }
                                })
                                .collect_view();
                            view! {
                                <p class="result-count">{format!("{} assets found", count)}</p>
                                <div class="asset-grid" class:list-view={move || list_layout.get()}>
                                    {cards}
                                </div>
                            }
                            .into_view()
                        }
                    }}
                </section>
            </div>
        </div>
    }
}
