//! Purchase service for ordering from wholesalers

use std::sync::Arc;

use serde_json::Value;
use shared::{DashboardStats, MessageResponse, PurchaseRequest};

use crate::error::ClientResult;
use crate::external::MarketplaceApi;

/// Submits purchase orders to the order service
#[derive(Clone)]
pub struct PurchaseService {
    api: Arc<dyn MarketplaceApi>,
}

impl PurchaseService {
    pub fn new(api: Arc<dyn MarketplaceApi>) -> Self {
        Self { api }
    }

    /// Submit a validated purchase request
    pub async fn submit(&self, request: &PurchaseRequest) -> ClientResult<MessageResponse> {
        match self.api.submit_purchase(request).await {
            Ok(response) => {
                tracing::info!(
                    product_id = %request.product_id,
                    wholesaler_id = %request.wholesaler_id,
                    quantity = request.quantity,
                    markup_percent = %request.markup_percent,
                    "Purchase accepted"
                );
                Ok(response)
            }
            Err(e) => {
                tracing::warn!(
                    product_id = %request.product_id,
                    category = %e.category(),
                    error = %e,
                    "Purchase rejected"
                );
                Err(e)
            }
        }
    }

    /// Check that the order route answers at all
    pub async fn probe(&self) -> ClientResult<Value> {
        self.api.purchase_route_check().await
    }

    pub async fn dashboard(&self, retailer_id: &str) -> ClientResult<DashboardStats> {
        self.api.retailer_dashboard(retailer_id).await
    }
}
