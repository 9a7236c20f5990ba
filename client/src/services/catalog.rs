//! Catalog service for loading wholesaler inventory

use std::sync::Arc;

use shared::{exclude_own_listings, Product, ProductQuery, SessionUser};

use crate::error::ClientResult;
use crate::external::MarketplaceApi;

/// Loads products a retailer may buy
#[derive(Clone)]
pub struct CatalogService {
    api: Arc<dyn MarketplaceApi>,
}

impl CatalogService {
    pub fn new(api: Arc<dyn MarketplaceApi>) -> Self {
        Self { api }
    }

    /// In-stock products, minus the user's own listings
    pub async fn available_for(&self, user: &SessionUser) -> ClientResult<Vec<Product>> {
        self.search_for(user, &ProductQuery::available()).await
    }

    /// Run a filtered catalog query, minus the user's own listings
    pub async fn search_for(
        &self,
        user: &SessionUser,
        query: &ProductQuery,
    ) -> ClientResult<Vec<Product>> {
        let products = self.api.list_products(query).await?;
        let total = products.len();
        let visible = exclude_own_listings(products, &user.id);

        tracing::info!(
            user_id = %user.id,
            total,
            visible = visible.len(),
            "Loaded catalog"
        );

        Ok(visible)
    }
}
