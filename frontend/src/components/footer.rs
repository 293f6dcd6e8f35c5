//! Site footer: category shortcuts and marketplace terms.

use dimension_core::config::{PLATFORM_FEE_PERCENT, USD_PER_ETH};
use dimension_core::routes::{EXPLORE_PATH, UPLOAD_PATH};
use dimension_core::{CatalogQuery, Category, SortOrder};
use leptos::*;
use leptos_router::A;

/// Catalog link pre-filtered to one category.
fn category_href(category: Category) -> String {
    CatalogQuery::new()
        .with_category(Some(category))
        .location_path(EXPLORE_PATH)
}

#[component]
pub fn Footer() -> impl IntoView {
    let category_links = Category::ALL
        .into_iter()
        .map(|category| {
            let href = category_href(category);
            view! {
                <li><A href=href class="footer-link">{category.icon()} " " {category.label()}</A></li>
            }
        })
        .collect_view();

    let popular = CatalogQuery::new()
        .with_sort(SortOrder::Popular)
        .location_path(EXPLORE_PATH);

    view! {
        <footer class="site-footer">
            <div class="footer-brand">
                <span class="logo">"◈ Dimension"</span>
                <p>"A marketplace for 3D models, paid in ETH."</p>
            </div>

            <nav class="footer-column">
                <h4>"Categories"</h4>
                <ul>{category_links}</ul>
            </nav>

            <nav class="footer-column">
                <h4>"Marketplace"</h4>
                <ul>
                    <li><A href=EXPLORE_PATH class="footer-link">"Newest assets"</A></li>
                    <li><A href=popular class="footer-link">"Most popular"</A></li>
                    <li><A href=UPLOAD_PATH class="footer-link">"Sell your model"</A></li>
                </ul>
            </nav>

            <div class="footer-terms">
                <p>{format!("Creators keep {}% of every sale.", 100.0 - PLATFORM_FEE_PERCENT)}</p>
                <p>{format!("USD prices are estimates at 1 ETH ≈ ${:.0}.", USD_PER_ETH)}</p>
            </div>
        </footer>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_links_round_trip_to_filters() {
        assert_eq!(category_href(Category::Vehicles), "/explore?category=vehicles");
        for category in Category::ALL {
            let href = category_href(category);
            let (_, qs) = href.split_once('?').unwrap();
            assert_eq!(CatalogQuery::from_location_query(qs).category, Some(category));
        }
    }
}

