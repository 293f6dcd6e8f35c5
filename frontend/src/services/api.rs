//! `gloo-net` implementation of the catalog API.

use std::time::Duration;

use gloo_net::http::{Request, Response};
use web_sys::{File, FormData};

use dimension_core::api::{self, object_path, Delay, MarketApi, IDEMPOTENCY_HEADER, PURCHASES_PATH};
use dimension_core::{
    ApiError, ApiResult, Asset, AssetSubmission, CatalogQuery, MarketConfig, PurchaseRequest,
};

/// Browser HTTP client. Cheap to clone; every component gets its own copy.
#[derive(Clone, Debug)]
pub struct HttpMarketApi {
    config: MarketConfig,
}

impl HttpMarketApi {
    pub fn new(config: MarketConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &MarketConfig {
        &self.config
    }

    /// Absolute URL for a thumbnail or model reference.
    pub fn media_url(&self, path: &str) -> String {
        self.config.media_url(path)
    }

    async fn check(response: Response, resource: &str) -> ApiResult<Response> {
        if response.ok() {
            return Ok(response);
        }
        let status = response.status();
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        Err(ApiError::from_status(status, body, resource))
    }
}

fn network(e: gloo_net::Error) -> ApiError {
    ApiError::Network(e.to_string())
}

fn decode(e: gloo_net::Error) -> ApiError {
    ApiError::Decode(e.to_string())
}

fn js_error(context: &str, e: wasm_bindgen::JsValue) -> ApiError {
    ApiError::Request(format!("{}: {:?}", context, e))
}

/// Multipart body for `POST /objects`.
fn submission_form(submission: &AssetSubmission<File>) -> ApiResult<FormData> {
    let form = FormData::new().map_err(|e| js_error("Failed to create FormData", e))?;

    for (name, value) in submission.text_fields() {
        form.append_with_str(name, value)
            .map_err(|e| js_error("Failed to append field", e))?;
    }
    form.append_with_blob_and_filename(
        api::form::MODEL,
        &submission.model.handle,
        &submission.model.meta.file_name,
    )
    .map_err(|e| js_error("Failed to append model", e))?;
    form.append_with_blob_and_filename(
        api::form::THUMBNAIL,
        &submission.thumbnail.handle,
        &submission.thumbnail.meta.file_name,
    )
    .map_err(|e| js_error("Failed to append thumbnail", e))?;

    Ok(form)
}

impl MarketApi for HttpMarketApi {
    type File = File;

    async fn list_assets(&self, query: &CatalogQuery) -> ApiResult<Vec<Asset>> {
        let url = self.config.api_url(&query.api_path());
        log::debug!("📡 GET {}", url);
        let response = Request::get(&url).send().await.map_err(network)?;
        Self::check(response, "catalog")
            .await?
            .json::<Vec<Asset>>()
            .await
            .map_err(decode)
    }

    async fn get_asset(&self, id: &str) -> ApiResult<Asset> {
        let url = self.config.api_url(&object_path(id)?);
        log::debug!("📡 GET {}", url);
        let response = Request::get(&url).send().await.map_err(network)?;
        Self::check(response, id)
            .await?
            .json::<Asset>()
            .await
            .map_err(decode)
    }

    async fn create_asset(&self, submission: &AssetSubmission<File>) -> ApiResult<Asset> {
        let form = submission_form(submission)?;
        let url = self.config.api_url(api::OBJECTS_PATH);
        log::debug!("📡 POST {} ({})", url, submission.idempotency_key);

        // No explicit Content-Type: the browser adds the multipart boundary.
        let request = Request::post(&url)
            .header(IDEMPOTENCY_HEADER, &submission.idempotency_key)
            .body(form)
            .map_err(|e| ApiError::Request(e.to_string()))?;
        let response = request.send().await.map_err(network)?;
        Self::check(response, "upload")
            .await?
            .json::<Asset>()
            .await
            .map_err(decode)
    }

    async fn record_purchase(&self, request: &PurchaseRequest, idempotency_key: &str) -> ApiResult<()> {
        let url = self.config.api_url(PURCHASES_PATH);
        log::debug!("📡 POST {} ({})", url, idempotency_key);
        let response = Request::post(&url)
            .header(IDEMPOTENCY_HEADER, idempotency_key)
            .json(request)
            .map_err(|e| ApiError::Request(e.to_string()))?
            .send()
            .await
            .map_err(network)?;
        Self::check(response, &request.object_id).await?;
        Ok(())
    }
}

/// `setTimeout`-backed timer for the simulated transaction.
#[derive(Clone, Copy, Debug, Default)]
pub struct GlooDelay;

impl Delay for GlooDelay {
    async fn sleep(&self, duration: Duration) {
        let millis = u32::try_from(duration.as_millis()).unwrap_or(u32::MAX);
        gloo_timers::future::TimeoutFuture::new(millis).await;
    }
}
