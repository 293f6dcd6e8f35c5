//! Client-side routes.

use crate::catalog::CatalogQuery;

pub const EXPLORE_PATH: &str = "/explore";
pub const UPLOAD_PATH: &str = "/upload";

/// A place the user can navigate to.
#[derive(Clone, Debug, PartialEq)]
pub enum Route {
    Catalog(CatalogQuery),
    Asset(String),
    Upload,
    Profile(String),
}

impl Route {
    /// Path (with query string for the catalog) for links and navigation.
    pub fn path(&self) -> String {
        match self {
            Route::Catalog(query) => query.location_path(EXPLORE_PATH),
            Route::Asset(id) => format!("/object/{}", id),
            Route::Upload => UPLOAD_PATH.to_string(),
            Route::Profile(address) => format!("/profile/{}", address),
        }
    }

    /// Absolute link for sharing outside the app.
    pub fn share_url(&self, site_origin: &str) -> String {
        format!("{}{}", site_origin.trim_end_matches('/'), self.path())
    }
}
