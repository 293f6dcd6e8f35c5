//! `reqwest` implementation of the catalog API.

use std::time::Duration;

use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response};

use dimension_core::api::{
    self, object_path, Delay, MarketApi, IDEMPOTENCY_HEADER, OBJECTS_PATH, PURCHASES_PATH,
};
use dimension_core::{ApiError, ApiResult, Asset, AssetSubmission, CatalogQuery, MarketConfig, StagedFile};

use crate::error::{CliError, CliResult};

/// HTTP client bound to one marketplace deployment.
#[derive(Clone, Debug)]
pub struct MarketClient {
    http: Client,
    config: MarketConfig,
}

impl MarketClient {
    /// Build a client. The API base must be an absolute http(s) URL.
    pub fn new(config: MarketConfig) -> CliResult<Self> {
        if !config.api_base.starts_with("http://") && !config.api_base.starts_with("https://") {
            return Err(CliError::Config(format!(
                "API base must be an absolute URL, got {:?}",
                config.api_base
            )));
        }
        let http = Client::builder()
            .user_agent(concat!("dimension-cli/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { http, config })
    }

    pub fn config(&self) -> &MarketConfig {
        &self.config
    }

    async fn check(response: Response, resource: &str) -> ApiResult<Response> {
        if response.status().is_success() {
            return Ok(response);
        }
        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        Err(ApiError::from_status(status, body, resource))
    }
}

fn network(e: reqwest::Error) -> ApiError {
    ApiError::Network(e.to_string())
}

fn decode(e: reqwest::Error) -> ApiError {
    ApiError::Decode(e.to_string())
}

fn file_part(file: &StagedFile<Vec<u8>>) -> ApiResult<Part> {
    let part = Part::bytes(file.handle.clone()).file_name(file.meta.file_name.clone());
    if file.meta.content_type.is_empty() {
        return Ok(part);
    }
    part.mime_str(&file.meta.content_type)
        .map_err(|e| ApiError::Request(format!("bad content type for {}: {}", file.meta.file_name, e)))
}

impl MarketApi for MarketClient {
    type File = Vec<u8>;

    async fn list_assets(&self, query: &CatalogQuery) -> ApiResult<Vec<Asset>> {
        let url = self.config.api_url(OBJECTS_PATH);
        let params = query.api_params();
        log::debug!("GET {} {:?}", url, params);
        let response = self
            .http
            .get(&url)
            .query(&params)
            .send()
            .await
            .map_err(network)?;
        Self::check(response, "catalog")
            .await?
            .json::<Vec<Asset>>()
            .await
            .map_err(decode)
    }

    async fn get_asset(&self, id: &str) -> ApiResult<Asset> {
        let url = self.config.api_url(&object_path(id)?);
        log::debug!("GET {}", url);
        let response = self.http.get(&url).send().await.map_err(network)?;
        Self::check(response, id)
            .await?
            .json::<Asset>()
            .await
            .map_err(decode)
    }

    async fn create_asset(&self, submission: &AssetSubmission<Vec<u8>>) -> ApiResult<Asset> {
        let mut form = Form::new();
        for (name, value) in submission.text_fields() {
            form = form.text(name, value.to_string());
        }
        form = form
            .part(api::form::MODEL, file_part(&submission.model)?)
            .part(api::form::THUMBNAIL, file_part(&submission.thumbnail)?);

        let url = self.config.api_url(OBJECTS_PATH);
        log::debug!("POST {} ({})", url, submission.idempotency_key);
        let response = self
            .http
            .post(&url)
            .header(IDEMPOTENCY_HEADER, &submission.idempotency_key)
            .multipart(form)
            .send()
            .await
            .map_err(network)?;
        Self::check(response, "upload")
            .await?
            .json::<Asset>()
            .await
            .map_err(decode)
    }

    async fn record_purchase(
        &self,
        request: &dimension_core::PurchaseRequest,
        idempotency_key: &str,
    ) -> ApiResult<()> {
        let url = self.config.api_url(PURCHASES_PATH);
        log::debug!("POST {} ({})", url, idempotency_key);
        let response = self
            .http
            .post(&url)
            .header(IDEMPOTENCY_HEADER, idempotency_key)
            .json(request)
            .send()
            .await
            .map_err(network)?;
        Self::check(response, &request.object_id).await?;
        Ok(())
    }
}

/// Tokio-backed timer for the simulated transaction.
#[derive(Clone, Copy, Debug, Default)]
pub struct TokioDelay;

impl Delay for TokioDelay {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relative_api_base_rejected() {
        let err = MarketClient::new(MarketConfig::default()).unwrap_err();
        assert!(matches!(err, CliError::Config(_)));
    }

    #[test]
    fn test_absolute_api_base_accepted() {
        let config = MarketConfig::default().with_api_base("http://127.0.0.1:9/api/");
        let client = MarketClient::new(config).unwrap();
        assert_eq!(client.config().api_url("/objects"), "http://127.0.0.1:9/api/objects");
    }

    #[test]
    fn test_file_part_rejects_garbage_mime() {
        let file = StagedFile {
            meta: dimension_core::FileMeta::new("a.glb", "not a mime", 3),
            handle: vec![1, 2, 3],
        };
        assert!(matches!(file_part(&file), Err(ApiError::Request(_))));
    }
}
