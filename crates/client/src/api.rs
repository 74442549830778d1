//! Transport seam to the storefront backend.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use storefront_core::{Product, ProductId};

/// Header carrying the CSRF token on mutating requests.
pub const CSRF_HEADER: &str = "X-CSRFToken";

/// Body of `POST /add-to-cart`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartRequest {
    pub product_id: ProductId,
    pub quantity: u32,
}

impl CartRequest {
    /// A request for a single unit, as issued by the add-to-cart button.
    pub fn single(product_id: ProductId) -> Self {
        Self {
            product_id,
            quantity: 1,
        }
    }
}

/// Response of `POST /add-to-cart`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartResponse {
    #[serde(default)]
    pub success: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("network error: {0}")]
    Network(String),
    #[error("API error ({0}): {1}")]
    Status(u16, String),
    #[error("decode error: {0}")]
    Decode(String),
    #[error("invalid client configuration: {0}")]
    Config(String),
}

/// Backend operations the page depends on.
#[async_trait]
pub trait StorefrontApi: Send + Sync {
    /// `GET /load-more-top-rated?page={page}`.
    async fn load_more_top_rated(&self, page: u32) -> Result<Vec<Product>, ApiError>;

    /// `POST /add-to-cart`, with the CSRF header when a token is known.
    async fn add_to_cart(
        &self,
        request: &CartRequest,
        csrf_token: Option<&str>,
    ) -> Result<CartResponse, ApiError>;
}

#[async_trait]
impl<T: StorefrontApi + ?Sized> StorefrontApi for Arc<T> {
    async fn load_more_top_rated(&self, page: u32) -> Result<Vec<Product>, ApiError> {
        (**self).load_more_top_rated(page).await
    }

    async fn add_to_cart(
        &self,
        request: &CartRequest,
        csrf_token: Option<&str>,
    ) -> Result<CartResponse, ApiError> {
        (**self).add_to_cart(request, csrf_token).await
    }
}

/// `reqwest`-backed implementation talking JSON over HTTP.
#[derive(Debug, Clone)]
pub struct HttpStorefrontApi {
    client: reqwest::Client,
    api_url: String,
}

impl HttpStorefrontApi {
    pub fn new(api_url: impl Into<String>, timeout: Duration) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::Config(e.to_string()))?;

        Ok(Self::with_client(client, api_url))
    }

    /// Reuse an existing client (connection pool, proxies, TLS settings).
    pub fn with_client(client: reqwest::Client, api_url: impl Into<String>) -> Self {
        let api_url = api_url.into().trim_end_matches('/').to_string();
        Self { client, api_url }
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }
}

#[async_trait]
impl StorefrontApi for HttpStorefrontApi {
    async fn load_more_top_rated(&self, page: u32) -> Result<Vec<Product>, ApiError> {
        let url = format!("{}/load-more-top-rated", self.api_url);
        let resp = self
            .client
            .get(&url)
            .query(&[("page", page)])
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(ApiError::Status(
                status.as_u16(),
                resp.text().await.unwrap_or_default(),
            ));
        }

        let body = resp
            .bytes()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        serde_json::from_slice(&body).map_err(|e| ApiError::Decode(e.to_string()))
    }

    async fn add_to_cart(
        &self,
        request: &CartRequest,
        csrf_token: Option<&str>,
    ) -> Result<CartResponse, ApiError> {
        let url = format!("{}/add-to-cart", self.api_url);
        let mut req = self.client.post(&url).json(request);

        if let Some(token) = csrf_token {
            req = req.header(CSRF_HEADER, token);
        }

        let resp = req
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        // The backend reports rejections as `{success: false}`, sometimes
        // with a 4xx status. Only an undecodable body is a transport failure.
        let status = resp.status();
        let body = resp
            .bytes()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        match serde_json::from_slice::<CartResponse>(&body) {
            Ok(parsed) => Ok(parsed),
            Err(_) if !status.is_success() => Err(ApiError::Status(
                status.as_u16(),
                String::from_utf8_lossy(&body).into_owned(),
            )),
            Err(e) => Err(ApiError::Decode(e.to_string())),
        }
    }
}
