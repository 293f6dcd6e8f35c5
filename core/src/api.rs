//! Catalog API contract.
//!
//! | Method | Path               | Body                         | Returns          |
//! |--------|--------------------|------------------------------|------------------|
//! | GET    | `/objects?…`       | -                            | `Vec<Asset>`     |
//! | GET    | `/objects/{id}`    | -                            | `Asset`          |
//! | POST   | `/objects`         | multipart (see [`form`])     | created `Asset`  |
//! | POST   | `/purchases`       | JSON [`PurchaseRequest`]     | ignored          |
//!
//! [`MarketApi`] is implemented by `gloo-net` in the browser and `reqwest`
//! in the CLI. Both send the idempotency key of each submission attempt in
//! the [`IDEMPOTENCY_HEADER`] header.

use std::time::Duration;

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};

use crate::catalog::CatalogQuery;
use crate::error::{ApiError, ApiResult};
use crate::models::{Asset, PurchaseRequest};
use crate::wizard::AssetSubmission;

pub const OBJECTS_PATH: &str = "/objects";
pub const PURCHASES_PATH: &str = "/purchases";
pub const IDEMPOTENCY_HEADER: &str = "Idempotency-Key";

/// Multipart field names for `POST /objects`.
pub mod form {
    pub const NAME: &str = "name";
    pub const DESCRIPTION: &str = "description";
    pub const PRICE: &str = "price";
    pub const CATEGORY: &str = "category";
    pub const CREATOR_ADDRESS: &str = "creatorAddress";
    pub const MODEL: &str = "model";
    pub const THUMBNAIL: &str = "thumbnail";
}

/// Bytes escaped inside one path segment.
const SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'[')
    .add(b'\\')
    .add(b']')
    .add(b'^')
    .add(b'`')
    .add(b'{')
    .add(b'|')
    .add(b'}');

/// Path of a single asset, with the id percent-encoded as one segment.
///
/// Blank ids and dot segments are rejected as not found.
pub fn object_path(id: &str) -> ApiResult<String> {
    let id = id.trim();
    if id.is_empty() || id == "." || id == ".." {
        return Err(ApiError::NotFound(id.to_string()));
    }
    Ok(format!("{}/{}", OBJECTS_PATH, utf8_percent_encode(id, SEGMENT)))
}

/// Remote catalog operations.
///
/// `File` is the platform's handle for staged uploads (`web_sys::File`
/// in the browser, bytes read from disk in the CLI).
#[allow(async_fn_in_trait)]
pub trait MarketApi {
    type File;

    async fn list_assets(&self, query: &CatalogQuery) -> ApiResult<Vec<Asset>>;

    async fn get_asset(&self, id: &str) -> ApiResult<Asset>;

    async fn create_asset(&self, submission: &AssetSubmission<Self::File>) -> ApiResult<Asset>;

    async fn record_purchase(
        &self,
        request: &PurchaseRequest,
        idempotency_key: &str,
    ) -> ApiResult<()>;
}

/// Timer used for the simulated transaction delay.
#[allow(async_fn_in_trait)]
pub trait Delay {
    async fn sleep(&self, duration: Duration);
}

/// Delay that returns immediately.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoDelay;

impl Delay for NoDelay {
    async fn sleep(&self, _duration: Duration) {}
}

#[cfg(test)]
pub(crate) mod fake {
    //! In-memory API used by the driver tests.

    use std::cell::{Cell, RefCell};

    use super::*;
    use crate::models::Category;

    /// Timer that suspends exactly once, so futures joined together all
    /// start before any of them finishes.
    #[derive(Clone, Copy, Debug, Default)]
    pub struct YieldDelay;

    impl Delay for YieldDelay {
        async fn sleep(&self, _duration: Duration) {
            let mut yielded = false;
            std::future::poll_fn(|cx| {
                if yielded {
                    std::task::Poll::Ready(())
                } else {
                    yielded = true;
                    cx.waker().wake_by_ref();
                    std::task::Poll::Pending
                }
            })
            .await
        }
    }

    #[derive(Default)]
    pub struct FakeApi {
        pub assets: RefCell<Vec<Asset>>,
        pub purchases: RefCell<Vec<(PurchaseRequest, String)>>,
        pub created: RefCell<Vec<String>>,
        pub list_calls: RefCell<Vec<String>>,
        pub fail: Cell<bool>,
    }

    pub fn asset(id: &str, category: Category, price: &str) -> Asset {
        Asset {
            id: id.to_string(),
            name: format!("Asset {}", id),
            description: "test".to_string(),
            category,
            price: price.to_string(),
            creator_address: "0x1111111111111111111111111111111111111111".to_string(),
            creator: None,
            model_url: Some(format!("/uploads/{}.glb", id)),
            thumbnail_url: Some(format!("/uploads/{}.png", id)),
            views: 0,
            purchases: 0,
            created_at: None,
        }
    }

    impl FakeApi {
        pub fn with_assets(assets: Vec<Asset>) -> Self {
            Self {
                assets: RefCell::new(assets),
                ..Self::default()
            }
        }

        fn check(&self) -> ApiResult<()> {
            if self.fail.get() {
                Err(ApiError::Network("connection refused".into()))
            } else {
                Ok(())
            }
        }
    }

    impl MarketApi for FakeApi {
        type File = Vec<u8>;

        async fn list_assets(&self, query: &CatalogQuery) -> ApiResult<Vec<Asset>> {
            self.list_calls.borrow_mut().push(query.api_path());
            self.check()?;
            Ok(self
                .assets
                .borrow()
                .iter()
                .filter(|a| query.category.map_or(true, |c| a.category == c))
                .cloned()
                .collect())
        }

        async fn get_asset(&self, id: &str) -> ApiResult<Asset> {
            self.check()?;
            self.assets
                .borrow()
                .iter()
                .find(|a| a.id == id)
                .cloned()
                .ok_or_else(|| ApiError::NotFound(id.to_string()))
        }

        async fn create_asset(&self, submission: &AssetSubmission<Vec<u8>>) -> ApiResult<Asset> {
            self.check()?;
            let id = format!("new-{}", self.assets.borrow().len() + 1);
            let mut created = asset(&id, submission.category, &submission.price);
            created.name = submission.name.clone();
            created.creator_address = submission.creator_address.clone();
            self.assets.borrow_mut().push(created.clone());
            self.created.borrow_mut().push(submission.idempotency_key.clone());
            Ok(created)
        }

        async fn record_purchase(
            &self,
            request: &PurchaseRequest,
            idempotency_key: &str,
        ) -> ApiResult<()> {
            self.check()?;
            self.purchases
                .borrow_mut()
                .push((request.clone(), idempotency_key.to_string()));
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_object_path() {
        assert_eq!(object_path("65f0c2").unwrap(), "/objects/65f0c2");
        assert_eq!(object_path(" a1 ").unwrap(), "/objects/a1");
        assert!(matches!(object_path(""), Err(ApiError::NotFound(_))));
        assert!(matches!(object_path(".."), Err(ApiError::NotFound(_))));
    }

    #[test]
    fn test_object_path_encodes_segment() {
        assert_eq!(object_path("../admin").unwrap(), "/objects/..%2Fadmin");
        assert_eq!(object_path("a b#c?d").unwrap(), "/objects/a%20b%23c%3Fd");
        assert_eq!(object_path("100%").unwrap(), "/objects/100%25");
        assert_eq!(object_path("модель").unwrap(), "/objects/%D0%BC%D0%BE%D0%B4%D0%B5%D0%BB%D1%8C");
    }
}
