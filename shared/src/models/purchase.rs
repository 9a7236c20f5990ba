//! Wholesale purchase models

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::Product;
use crate::failure::FailureCategory;
use crate::pricing::PricePreview;
use crate::validation::{validate_purchase, PurchaseValidationError, MIN_QUANTITY};

/// Markup applied when the purchase modal opens
pub const DEFAULT_MARKUP_PERCENT: Decimal = Decimal::from_parts(20, 0, 0, false, 0);

/// Quantity the purchase modal starts with
pub const DEFAULT_QUANTITY: u32 = MIN_QUANTITY;

/// Body of `POST /api/purchase/from-wholesaler`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Validate)]
pub struct PurchaseRequest {
    #[validate(length(min = 1, message = "Wholesaler is required"))]
    pub wholesaler_id: String,
    #[validate(length(min = 1, message = "Product is required"))]
    pub product_id: String,
    #[validate(length(min = 1, message = "Retailer is required"))]
    pub retailer_id: String,
    #[validate(range(min = 1, message = "Quantity must be at least 1"))]
    pub quantity: u32,
    #[validate(custom = "crate::validation::validate_markup")]
    #[serde(with = "rust_decimal::serde::float")]
    pub markup_percent: Decimal,
}

impl PurchaseRequest {
    /// Build a request for `product`, checking stock and markup first
    pub fn for_product(
        product: &Product,
        retailer_id: &str,
        quantity: u32,
        markup_percent: Decimal,
    ) -> Result<Self, PurchaseValidationError> {
        validate_purchase(Some(product), quantity, markup_percent)?;

        let request = Self {
            wholesaler_id: product.seller_id.clone(),
            product_id: product.id.clone(),
            retailer_id: retailer_id.to_string(),
            quantity,
            markup_percent,
        };
        request
            .validate()
            .map_err(|e| PurchaseValidationError::InvalidRequest(e.to_string()))?;

        Ok(request)
    }
}

/// Transient selection state of the purchase modal
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PurchaseForm {
    pub selected: Option<Product>,
    pub quantity: u32,
    pub markup_percent: Decimal,
}

impl Default for PurchaseForm {
    fn default() -> Self {
        Self {
            selected: None,
            quantity: DEFAULT_QUANTITY,
            markup_percent: DEFAULT_MARKUP_PERCENT,
        }
    }
}

impl PurchaseForm {
    /// Open the modal on a product; quantity starts over, markup is kept
    pub fn select(&mut self, product: Product) {
        self.selected = Some(product);
        self.quantity = DEFAULT_QUANTITY;
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    pub fn set_quantity(&mut self, quantity: u32) {
        self.quantity = quantity;
    }

    pub fn set_markup_percent(&mut self, markup_percent: Decimal) {
        self.markup_percent = markup_percent;
    }

    /// Back to `(None, 1, 20)`
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn validate(&self) -> Result<(), PurchaseValidationError> {
        validate_purchase(self.selected.as_ref(), self.quantity, self.markup_percent)
    }

    /// Whether the submit button is enabled
    pub fn can_submit(&self) -> bool {
        self.validate().is_ok()
    }

    pub fn max_quantity(&self) -> u32 {
        self.selected.as_ref().map(|p| p.stock).unwrap_or(0)
    }

    pub fn preview(&self) -> Option<PricePreview> {
        self.selected
            .as_ref()
            .map(|p| PricePreview::compute(p.price, self.markup_percent, self.quantity))
    }

    pub fn to_request(&self, retailer_id: &str) -> Result<PurchaseRequest, PurchaseValidationError> {
        let product = self
            .selected
            .as_ref()
            .ok_or(PurchaseValidationError::NoProductSelected)?;
        PurchaseRequest::for_product(product, retailer_id, self.quantity, self.markup_percent)
    }
}

/// Purchase flow: `Unselected → Selected → Submitting → (Succeeded | Failed)`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum PurchasePhase {
    #[default]
    Unselected,
    Selected,
    Submitting,
    Succeeded {
        message: String,
    },
    Failed {
        category: FailureCategory,
        message: String,
    },
}

impl PurchasePhase {
    pub fn is_submitting(&self) -> bool {
        matches!(self, PurchasePhase::Submitting)
    }
}

/// Everything the purchase modal renders
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PurchaseModalView {
    pub product_id: String,
    pub product_name: String,
    pub description: String,
    pub image_url: Option<String>,
    pub stock: u32,
    pub quantity: u32,
    pub max_quantity: u32,
    pub preview: PricePreview,
    pub submit_enabled: bool,
    /// Why submit is disabled, if it is
    pub disabled_reason: Option<String>,
    pub submitting: bool,
}

impl PurchaseModalView {
    pub fn from_form(form: &PurchaseForm, submitting: bool) -> Option<Self> {
        let product = form.selected.as_ref()?;
        let validation = form.validate();

        Some(Self {
            product_id: product.id.clone(),
            product_name: product.name.clone(),
            description: product.description.clone(),
            image_url: product.image_url.clone(),
            stock: product.stock,
            quantity: form.quantity,
            max_quantity: form.max_quantity(),
            preview: PricePreview::compute(product.price, form.markup_percent, form.quantity),
            submit_enabled: validation.is_ok() && !submitting,
            disabled_reason: validation.err().map(|e| e.to_string()),
            submitting,
        })
    }
}
