use dimension_core::routes::EXPLORE_PATH;
use dimension_core::wallet::short_address;
use leptos::*;
use leptos_meta::Title;
use leptos_router::*;

/// Creator page. The API has no per-creator listing, so this shows who the
/// creator is and links back to the catalog.
#[component]
pub fn ProfilePage() -> impl IntoView {
    let params = use_params_map();
    let address = move || params.with(|p| p.get("address").cloned().unwrap_or_default());

    view! {
        <Title text=move || format!("{} | Dimension Market", short_address(&address()))/>
        <div class="profile">
            <div class="creator-avatar large">
                {move || address().chars().nth(2).unwrap_or('?').to_ascii_uppercase().to_string()}
            </div>
            <h1>{move || short_address(&address())}</h1>
            <p class="profile-address">{address}</p>
            <A href=EXPLORE_PATH class="back-link">"← Back to Explore"</A>
        </div>
    }
}

/// Fallback for unknown paths.
#[component]
pub fn NotFoundPage() -> impl IntoView {
    view! {
        <Title text="Not found | Dimension Market"/>
        <div class="not-found">
            <h2>"Page Not Found"</h2>
            <A href=EXPLORE_PATH>"Back to Explore"</A>
        </div>
    }
}
