//! Wholesale purchase page model
//!
//! Holds the state a retailer sees while browsing wholesaler inventory:
//! the product grid, the purchase modal, toast notifications and the
//! navigation scheduled after a successful order. Operations take
//! `&mut self` and are awaited one at a time.

use std::sync::Arc;
use std::time::Duration;

use rust_decimal::Decimal;
use shared::{
    DashboardStats, MessageResponse, Notification, Product, ProductListState, ProductListView, PurchaseForm,
    PurchaseModalView, PurchasePhase, PurchaseValidationError, SessionUser,
};

use crate::config::PurchaseConfig;
use crate::error::{ClientError, ClientResult};
use crate::external::MarketplaceApi;
use crate::services::{CatalogService, PurchaseService};

const DEFAULT_SUCCESS_MESSAGE: &str = "Purchase completed successfully";
const LOAD_FAILURE_MESSAGE: &str = "Failed to load products";
const ORDER_SERVICE_REACHABLE: &str = "Order service is reachable";

/// Navigation scheduled after a successful purchase
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingNavigation {
    pub route: String,
    pub delay: Duration,
}

/// State and operations of the wholesale purchase page
pub struct WholesalePurchasePage {
    catalog: CatalogService,
    purchases: PurchaseService,
    session: SessionUser,
    settings: PurchaseConfig,
    list: ProductListState,
    form: PurchaseForm,
    phase: PurchasePhase,
    notifications: Vec<Notification>,
    navigation: Option<PendingNavigation>,
}

impl WholesalePurchasePage {
    pub fn new(api: Arc<dyn MarketplaceApi>, session: SessionUser, settings: PurchaseConfig) -> Self {
        let mut form = PurchaseForm::default();
        form.set_markup_percent(settings.default_markup_percent);

        Self {
            catalog: CatalogService::new(api.clone()),
            purchases: PurchaseService::new(api),
            session,
            settings,
            list: ProductListState::Idle,
            form,
            phase: PurchasePhase::Unselected,
            notifications: Vec::new(),
            navigation: None,
        }
    }

    pub fn session(&self) -> &SessionUser {
        &self.session
    }

    /// Initial load when the page is shown
    pub async fn mount(&mut self) {
        self.load_products().await;
    }

    /// Fetch available products; failures leave an empty grid and a toast
    pub async fn load_products(&mut self) {
        self.list = ProductListState::Loading;

        self.list = match self.catalog.available_for(&self.session).await {
            Ok(products) => ProductListState::Loaded(products),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to load products");
                self.notify(Notification::error(LOAD_FAILURE_MESSAGE));
                ProductListState::Failed(e.to_string())
            }
        };
    }

    pub fn list_state(&self) -> &ProductListState {
        &self.list
    }

    pub fn list_view(&self) -> ProductListView<'_> {
        self.list.view()
    }

    pub fn products(&self) -> &[Product] {
        self.list.products()
    }

    /// Open the purchase modal on a listed product
    pub fn select_product(&mut self, product_id: &str) -> ClientResult<()> {
        let product = self
            .list
            .find(product_id)
            .cloned()
            .ok_or_else(|| PurchaseValidationError::UnknownProduct(product_id.to_string()))?;

        self.form.select(product);
        self.phase = PurchasePhase::Selected;
        Ok(())
    }

    /// Close the purchase modal without ordering
    pub fn close_modal(&mut self) {
        self.form.clear_selection();
        self.phase = PurchasePhase::Unselected;
    }

    pub fn set_quantity(&mut self, quantity: u32) {
        self.form.set_quantity(quantity);
    }

    pub fn set_markup_percent(&mut self, markup_percent: Decimal) {
        self.form.set_markup_percent(markup_percent);
    }

    pub fn form(&self) -> &PurchaseForm {
        &self.form
    }

    pub fn phase(&self) -> &PurchasePhase {
        &self.phase
    }

    /// Whether the submit action is enabled
    pub fn can_submit(&self) -> bool {
        !self.phase.is_submitting() && self.form.can_submit()
    }

    pub fn modal_view(&self) -> Option<PurchaseModalView> {
        PurchaseModalView::from_form(&self.form, self.phase.is_submitting())
    }

    /// Submit the current selection.
    ///
    /// Validation failures are reported without a network call. On success
    /// the form is reset, the list refreshed and navigation to the dashboard
    /// scheduled; on failure the phase carries the categorized message.
    pub async fn submit(&mut self) -> ClientResult<MessageResponse> {
        if self.phase.is_submitting() {
            return Err(ClientError::SubmissionInProgress);
        }

        let request = match self.form.to_request(&self.session.id) {
            Ok(request) => request,
            Err(e) => {
                self.notify(Notification::error(e.to_string()));
                return Err(e.into());
            }
        };

        self.phase = PurchasePhase::Submitting;

        match self.purchases.submit(&request).await {
            Ok(response) => {
                let message = response
                    .message
                    .clone()
                    .unwrap_or_else(|| DEFAULT_SUCCESS_MESSAGE.to_string());
                self.notify(Notification::success(message.clone()));

                self.reset_form();
                self.phase = PurchasePhase::Succeeded { message };
                self.load_products().await;
                self.navigation = Some(PendingNavigation {
                    route: self.settings.dashboard_path.clone(),
                    delay: self.settings.redirect_delay(),
                });

                Ok(response)
            }
            Err(e) => {
                let message = e.user_message();
                self.notify(Notification::error(message.clone()));
                self.phase = PurchasePhase::Failed {
                    category: e.category(),
                    message,
                };
                Err(e)
            }
        }
    }

    /// Check the purchase route before ordering; the outcome is posted as a toast
    pub async fn check_order_service(&mut self) -> bool {
        match self.purchases.probe().await {
            Ok(_) => {
                self.notify(Notification::info(ORDER_SERVICE_REACHABLE));
                true
            }
            Err(e) => {
                self.notify(Notification::error(e.user_message()));
                false
            }
        }
    }

    /// Dashboard stats shown after navigating; a failure here is only logged
    pub async fn dashboard_summary(&self) -> Option<DashboardStats> {
        match self.purchases.dashboard(&self.session.id).await {
            Ok(stats) => Some(stats),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to load retailer dashboard");
                None
            }
        }
    }

    fn reset_form(&mut self) {
        self.form.reset();
        self.form
            .set_markup_percent(self.settings.default_markup_percent);
    }

    fn notify(&mut self, notification: Notification) {
        self.notifications.push(notification);
    }

    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    /// Hand pending toasts to the view
    pub fn take_notifications(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.notifications)
    }

    pub fn pending_navigation(&self) -> Option<&PendingNavigation> {
        self.navigation.as_ref()
    }

    /// Wait out the redirect delay and return the route to show
    pub async fn follow_navigation(&mut self) -> Option<String> {
        let navigation = self.navigation.take()?;
        tokio::time::sleep(navigation.delay).await;
        tracing::info!(route = %navigation.route, "Navigating");
        Some(navigation.route)
    }
}
