//! Catalog browsing: query model, URL mirroring and result state.
//!
//! A [`CatalogQuery`] has two string forms:
//!
//! - the API form ([`CatalogQuery::api_path`]) sent to `GET /objects`, where
//!   "all categories" means the `category` parameter is left out;
//! - the location form ([`CatalogQuery::to_location_query`]) kept in the
//!   address bar so a copied link reproduces the same listing.

use serde::{Deserialize, Serialize};

use crate::api::{MarketApi, OBJECTS_PATH};
use crate::cancel::{RequestSequencer, RequestTicket};
use crate::error::ApiResult;
use crate::models::{Asset, Category, SortOrder};

/// Filters and ordering for the catalog listing.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CatalogQuery {
    /// `None` means every category.
    pub category: Option<Category>,
    pub sort: SortOrder,
    pub search: String,
}

/// Wire form shared by the API and the location bar.
#[derive(Debug, Default, Serialize, Deserialize)]
struct QueryParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    sort: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    search: Option<String>,
}

impl CatalogQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_category(mut self, category: Option<Category>) -> Self {
        self.category = category;
        self
    }

    pub fn with_sort(mut self, sort: SortOrder) -> Self {
        self.sort = sort;
        self
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    fn search_term(&self) -> Option<String> {
        let term = self.search.trim();
        (!term.is_empty()).then(|| term.to_string())
    }

    /// Parameters for `GET /objects`, in request order.
    pub fn api_params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::with_capacity(3);
        if let Some(category) = self.category {
            params.push(("category", category.as_str().to_string()));
        }
        params.push(("sort", self.sort.as_str().to_string()));
        if let Some(term) = self.search_term() {
            params.push(("search", term));
        }
        params
    }

    /// `/objects?sort=newest&…`, URL-encoded.
    pub fn api_path(&self) -> String {
        let params = QueryParams {
            category: self.category.map(|c| c.as_str().to_string()),
            sort: Some(self.sort.as_str().to_string()),
            search: self.search_term(),
        };
        match serde_urlencoded::to_string(&params) {
            Ok(qs) if !qs.is_empty() => format!("{}?{}", OBJECTS_PATH, qs),
            _ => OBJECTS_PATH.to_string(),
        }
    }

    /// Shareable query string without the leading `?`. Defaults are omitted.
    pub fn to_location_query(&self) -> String {
        let params = QueryParams {
            category: self.category.map(|c| c.as_str().to_string()),
            sort: (self.sort != SortOrder::default()).then(|| self.sort.as_str().to_string()),
            search: self.search_term(),
        };
        serde_urlencoded::to_string(&params).unwrap_or_default()
    }

    /// Rebuild a query from a location string (with or without `?`).
    ///
    /// Unknown categories or sort orders fall back to the defaults.
    pub fn from_location_query(location: &str) -> Self {
        let raw = location.trim_start_matches('?');
        let params: QueryParams = serde_urlencoded::from_str(raw).unwrap_or_else(|e| {
            log::warn!("⚠️ Unreadable catalog query {:?}: {}", raw, e);
            QueryParams::default()
        });

        Self {
            category: params.category.as_deref().and_then(Category::parse_filter),
            sort: params
                .sort
                .as_deref()
                .and_then(|s| s.parse().ok())
                .unwrap_or_default(),
            search: params.search.unwrap_or_default(),
        }
    }

    /// Full shareable path, e.g. `/explore?category=vehicles`.
    pub fn location_path(&self, route: &str) -> String {
        let qs = self.to_location_query();
        if qs.is_empty() {
            route.to_string()
        } else {
            format!("{}?{}", route, qs)
        }
    }
}

/// What the catalog area currently shows.
#[derive(Clone, Debug, PartialEq)]
pub enum CatalogView {
    Loading,
    Loaded(Vec<Asset>),
    /// The query matched nothing. Not an error.
    Empty,
    /// The fetch failed; message is shown instead of the grid.
    Unavailable(String),
}

impl CatalogView {
    fn from_result(result: ApiResult<Vec<Asset>>) -> Self {
        match result {
            Ok(assets) if assets.is_empty() => CatalogView::Empty,
            Ok(assets) => CatalogView::Loaded(assets),
            Err(e) => {
                log::error!("❌ Failed to fetch objects: {}", e);
                CatalogView::Unavailable(e.to_string())
            }
        }
    }

    pub fn assets(&self) -> &[Asset] {
        match self {
            CatalogView::Loaded(assets) => assets,
            _ => &[],
        }
    }
}

/// Catalog state: the active query plus whatever the last fetch produced.
#[derive(Clone, Debug)]
pub struct CatalogBrowser {
    query: Option<CatalogQuery>,
    view: CatalogView,
    sequencer: RequestSequencer,
}

impl Default for CatalogBrowser {
    fn default() -> Self {
        Self::new()
    }
}

impl CatalogBrowser {
    pub fn new() -> Self {
        Self {
            query: None,
            view: CatalogView::Loading,
            sequencer: RequestSequencer::new(),
        }
    }

    pub fn query(&self) -> CatalogQuery {
        self.query.clone().unwrap_or_default()
    }

    pub fn view(&self) -> &CatalogView {
        &self.view
    }

    /// Switch to `query`.
    ///
    /// Returns a ticket when a fetch must be issued, `None` when the query
    /// is unchanged and the current results still apply.
    pub fn set_query(&mut self, query: CatalogQuery) -> Option<RequestTicket> {
        if self.query.as_ref() == Some(&query) {
            return None;
        }
        log::debug!("🔎 Catalog query -> {}", query.api_path());
        self.query = Some(query);
        self.view = CatalogView::Loading;
        Some(self.sequencer.issue())
    }

    /// Commit a fetch result. Results for superseded tickets are dropped.
    pub fn settle(&mut self, ticket: RequestTicket, result: ApiResult<Vec<Asset>>) -> bool {
        if !self.sequencer.is_current(ticket) {
            log::debug!("⏭️ Dropping stale catalog response #{}", ticket.id());
            return false;
        }
        self.view = CatalogView::from_result(result);
        true
    }
}

/// Fetch one page of the catalog and classify the result.
pub async fn fetch_catalog<A: MarketApi>(api: &A, query: &CatalogQuery) -> CatalogView {
    CatalogView::from_result(api.list_assets(query).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::fake::{asset, FakeApi, YieldDelay};
    use crate::cancel::Debouncer;
    use crate::error::ApiError;
    use futures::executor::block_on;
    use futures::future::join_all;
    use std::time::Duration;

    #[test]
    fn test_all_categories_omit_parameter() {
        let query = CatalogQuery::new();
        assert_eq!(query.api_path(), "/objects?sort=newest");
        assert!(query.api_params().iter().all(|(k, _)| *k != "category"));

        let from_link = CatalogQuery::from_location_query("?category=all&sort=popular");
        assert_eq!(from_link.category, None);
        assert_eq!(from_link.api_path(), "/objects?sort=popular");
    }

    #[test]
    fn test_api_path_encodes_search() {
        let query = CatalogQuery::new()
            .with_category(Some(Category::Vehicles))
            .with_sort(SortOrder::PriceLow)
            .with_search("  red car & co ");
        assert_eq!(
            query.api_path(),
            "/objects?category=vehicles&sort=price-low&search=red+car+%26+co"
        );
        assert_eq!(
            query.api_params(),
            vec![
                ("category", "vehicles".to_string()),
                ("sort", "price-low".to_string()),
                ("search", "red car & co".to_string()),
            ]
        );
    }

    #[test]
    fn test_location_mirroring() {
        let query = CatalogQuery::new()
            .with_category(Some(Category::Nature))
            .with_sort(SortOrder::Popular)
            .with_search("tree");
        let qs = query.to_location_query();
        assert_eq!(qs, "category=nature&sort=popular&search=tree");
        assert_eq!(CatalogQuery::from_location_query(&qs), query);

        assert_eq!(CatalogQuery::new().to_location_query(), "");
        assert_eq!(CatalogQuery::new().location_path("/explore"), "/explore");
    }

    #[test]
    fn test_unknown_location_values_fall_back() {
        let query = CatalogQuery::from_location_query("category=spaceships&sort=random");
        assert_eq!(query, CatalogQuery::default());
    }

    #[test]
    fn test_unchanged_query_issues_no_request() {
        let mut browser = CatalogBrowser::new();
        let query = CatalogQuery::new().with_sort(SortOrder::Popular);

        assert!(browser.set_query(query.clone()).is_some());
        assert!(browser.set_query(query).is_none());
        assert!(browser
            .set_query(CatalogQuery::new().with_sort(SortOrder::PriceHigh))
            .is_some());
    }

    #[test]
    fn test_stale_response_dropped() {
        let mut browser = CatalogBrowser::new();
        let first = browser.set_query(CatalogQuery::new()).unwrap();
        let second = browser
            .set_query(CatalogQuery::new().with_category(Some(Category::Props)))
            .unwrap();

        let props = vec![asset("p1", Category::Props, "0.1")];
        assert!(browser.settle(second, Ok(props.clone())));
        assert!(!browser.settle(first, Ok(vec![])));
        assert_eq!(browser.view(), &CatalogView::Loaded(props));
    }

    #[test]
    fn test_empty_result_is_not_an_error() {
        let api = FakeApi::with_assets(vec![asset("c1", Category::Characters, "0.2")]);
        let query = CatalogQuery::new()
            .with_category(Some(Category::Vehicles))
            .with_sort(SortOrder::PriceLow);

        let view = block_on(fetch_catalog(&api, &query));
        assert_eq!(view, CatalogView::Empty);
        assert_eq!(
            api.list_calls.borrow().as_slice(),
            ["/objects?category=vehicles&sort=price-low"]
        );
    }

    #[test]
    fn test_fetch_failure_is_distinct_from_empty() {
        let api = FakeApi::default();
        api.fail.set(true);

        let view = block_on(fetch_catalog(&api, &CatalogQuery::new()));
        assert!(matches!(view, CatalogView::Unavailable(ref msg) if msg.contains("refused")));
        assert!(view.assets().is_empty());

        let mut browser = CatalogBrowser::new();
        let ticket = browser.set_query(CatalogQuery::new()).unwrap();
        browser.settle(ticket, Err(ApiError::Decode("bad json".into())));
        assert!(matches!(browser.view(), CatalogView::Unavailable(_)));
    }

    #[test]
    fn test_search_burst_issues_one_query() {
        let mut browser = CatalogBrowser::new();
        let base = CatalogQuery::new().with_category(Some(Category::Nature));
        let first = browser.set_query(base.clone());
        assert!(first.is_some());

        let debouncer = Debouncer::new(YieldDelay, Duration::from_millis(300));
        let keystrokes = ["t", "tr", "tre", "tree"];
        let settled = block_on(join_all(keystrokes.map(|text| debouncer.settle(text))));

        let tickets: Vec<_> = settled
            .into_iter()
            .flatten()
            .filter_map(|text| browser.set_query(base.clone().with_search(text)))
            .collect();

        assert_eq!(tickets.len(), 1);
        assert_eq!(browser.query().search, "tree");
        assert_eq!(
            browser.query().api_path(),
            "/objects?category=nature&sort=newest&search=tree"
        );
    }
}
