//! Asset detail loading.

use crate::api::MarketApi;
use crate::models::Asset;

/// Detail page state. `NotFound` is terminal; there is no retry.
#[derive(Clone, Debug, PartialEq)]
pub enum DetailView {
    Loading,
    Loaded(Asset),
    NotFound,
}

impl DetailView {
    pub fn asset(&self) -> Option<&Asset> {
        match self {
            DetailView::Loaded(asset) => Some(asset),
            _ => None,
        }
    }
}

/// Fetch one asset; any failure, including a non-success status, becomes
/// [`DetailView::NotFound`].
pub async fn load_asset<A: MarketApi>(api: &A, id: &str) -> DetailView {
    match api.get_asset(id).await {
        Ok(asset) => DetailView::Loaded(asset),
        Err(e) => {
            log::error!("❌ Failed to fetch object {}: {}", id, e);
            DetailView::NotFound
        }
    }
}
