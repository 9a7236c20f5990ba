//! LiveMART marketplace API client
//!
//! Talks to the catalog and order endpoints under `/api`.

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde_json::Value;
use shared::{DashboardStats, HealthStatus, MessageResponse, Product, ProductQuery, PurchaseRequest};

use crate::config::ApiConfig;
use crate::error::{ClientError, ClientResult};

/// Operations the purchase page needs from the marketplace backend
#[async_trait]
pub trait MarketplaceApi: Send + Sync {
    /// `GET /api/products`
    async fn list_products(&self, query: &ProductQuery) -> ClientResult<Vec<Product>>;

    /// `POST /api/purchase/from-wholesaler`
    async fn submit_purchase(&self, request: &PurchaseRequest) -> ClientResult<MessageResponse>;

    /// `GET /api/purchase/test`, a no-op used to check the order route is reachable
    async fn purchase_route_check(&self) -> ClientResult<Value>;

    /// `GET /api/health`
    async fn health(&self) -> ClientResult<HealthStatus>;

    /// `GET /api/dashboard/retailer`
    async fn retailer_dashboard(&self, user_id: &str) -> ClientResult<DashboardStats>;
}

/// reqwest-backed marketplace client
#[derive(Clone)]
pub struct MarketplaceClient {
    client: Client,
    base_url: String,
}

impl MarketplaceClient {
    /// Create a new MarketplaceClient from configuration
    pub fn new(config: &ApiConfig) -> ClientResult<Self> {
        let client = Client::builder().timeout(config.timeout()).build()?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Create a new MarketplaceClient with custom base URL (for testing)
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api{}", self.base_url, path)
    }
}

/// Decode a JSON body, turning non-2xx responses into `ClientError::Http`
async fn read_json<T: DeserializeOwned>(response: Response) -> ClientResult<T> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(ClientError::from_response(status.as_u16(), &body));
    }

    let body = response.text().await?;
    serde_json::from_str(&body).map_err(|e| ClientError::Decode(e.to_string()))
}

/// Decode catalog items one by one, skipping the ones that are not products
fn decode_catalog(items: Vec<Value>) -> Vec<Product> {
    items
        .into_iter()
        .enumerate()
        .filter_map(|(index, item)| match serde_json::from_value::<Product>(item) {
            Ok(product) => Some(product),
            Err(e) => {
                tracing::warn!(index, error = %e, "Skipping malformed catalog item");
                None
            }
        })
        .collect()
}

#[async_trait]
impl MarketplaceApi for MarketplaceClient {
    async fn list_products(&self, query: &ProductQuery) -> ClientResult<Vec<Product>> {
        let url = self.url("/products");
        tracing::debug!(%url, "Fetching products");

        let response = self
            .client
            .get(&url)
            .query(&query.to_query_pairs())
            .send()
            .await?;

        let items: Vec<Value> = read_json(response).await?;
        Ok(decode_catalog(items))
    }

    async fn submit_purchase(&self, request: &PurchaseRequest) -> ClientResult<MessageResponse> {
        let url = self.url("/purchase/from-wholesaler");
        tracing::debug!(%url, product_id = %request.product_id, "Submitting purchase");

        let response = self.client.post(&url).json(request).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::from_response(status.as_u16(), &body));
        }

        // Some deployments answer with an empty 2xx body
        let body = response.text().await?;
        if body.trim().is_empty() {
            return Ok(MessageResponse::default());
        }
        serde_json::from_str(&body).map_err(|e| ClientError::Decode(e.to_string()))
    }

    async fn purchase_route_check(&self) -> ClientResult<Value> {
        let url = self.url("/purchase/test");
        let response = self.client.get(&url).send().await?;
        read_json(response).await
    }

    async fn health(&self) -> ClientResult<HealthStatus> {
        let url = self.url("/health");
        let response = self.client.get(&url).send().await?;
        read_json(response).await
    }

    async fn retailer_dashboard(&self, user_id: &str) -> ClientResult<DashboardStats> {
        let url = self.url("/dashboard/retailer");
        let response = self
            .client
            .get(&url)
            .query(&[("user_id", user_id)])
            .send()
            .await?;
        read_json(response).await
    }
}
