//! WebAssembly module for the LiveMART wholesale purchase page
//!
//! Provides client-side computation for:
//! - Retail price preview
//! - Purchase form validation
//! - Filtering out the retailer's own listings
//! - Classifying failed purchase submissions

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use wasm_bindgen::prelude::*;

// Re-export shared types for use in JavaScript
pub use shared::failure::*;
pub use shared::models::*;
pub use shared::pricing::*;
pub use shared::validation::*;

/// Numbers from form fields; NaN and infinities (an empty input) have no value
fn to_decimal(value: f64) -> Option<Decimal> {
    if !value.is_finite() {
        return None;
    }
    Decimal::try_from(value).ok()
}

fn preview_price(wholesale_price: f64, markup_percent: f64) -> Option<Decimal> {
    Some(retail_price_preview(
        to_decimal(wholesale_price)?,
        to_decimal(markup_percent)?,
    ))
}

/// Retail price rounded to two decimals, NaN when an input is not a number
#[wasm_bindgen]
pub fn calculate_retail_price(wholesale_price: f64, markup_percent: f64) -> f64 {
    preview_price(wholesale_price, markup_percent)
        .and_then(|price| price.to_f64())
        .unwrap_or(f64::NAN)
}

/// Retail price formatted for display, e.g. `"120.00"`; empty when an input is not a number
#[wasm_bindgen]
pub fn format_retail_price(wholesale_price: f64, markup_percent: f64) -> String {
    preview_price(wholesale_price, markup_percent)
        .map(|price| price.to_string())
        .unwrap_or_default()
}

/// Full price preview for the purchase modal, as JSON
#[wasm_bindgen]
pub fn price_preview_json(
    wholesale_price: f64,
    markup_percent: f64,
    quantity: u32,
) -> Result<String, JsValue> {
    let (price, markup) = match (to_decimal(wholesale_price), to_decimal(markup_percent)) {
        (Some(price), Some(markup)) => (price, markup),
        _ => return Err(JsValue::from_str("Price and markup must be numbers")),
    };
    let preview = PricePreview::compute(price, markup, quantity);
    serde_json::to_string(&preview)
        .map_err(|e| JsValue::from_str(&format!("Failed to encode preview: {}", e)))
}

/// Whether the purchase button should be enabled
#[wasm_bindgen]
pub fn can_submit_purchase(has_selection: bool, quantity: u32, stock: u32, markup_percent: f64) -> bool {
    has_selection
        && validate_quantity(quantity, stock).is_ok()
        && checked_markup(markup_percent).is_ok()
}

fn checked_markup(markup_percent: f64) -> Result<(), PurchaseValidationError> {
    let markup = to_decimal(markup_percent).ok_or(PurchaseValidationError::MarkupNotANumber)?;
    validate_markup_percent(markup)
}

/// Reason the purchase button is disabled, or an empty string
#[wasm_bindgen]
pub fn purchase_blocked_reason(
    has_selection: bool,
    quantity: u32,
    stock: u32,
    markup_percent: f64,
) -> String {
    if !has_selection {
        return PurchaseValidationError::NoProductSelected.to_string();
    }
    validate_quantity(quantity, stock)
        .and_then(|_| checked_markup(markup_percent))
        .err()
        .map(|e| e.to_string())
        .unwrap_or_default()
}

/// Drop the current user's own listings from a JSON array of products
#[wasm_bindgen]
pub fn filter_available_products(products_json: &str, user_id: &str) -> Result<String, JsValue> {
    let products: Vec<Product> = serde_json::from_str(products_json)
        .map_err(|e| JsValue::from_str(&format!("Invalid products JSON: {}", e)))?;

    let visible = exclude_own_listings(products, user_id);
    serde_json::to_string(&visible)
        .map_err(|e| JsValue::from_str(&format!("Failed to encode products: {}", e)))
}

/// Category of a failed submission; pass status 0 when no response arrived
#[wasm_bindgen]
pub fn classify_purchase_failure(status: u16, message: &str) -> String {
    let status = (status != 0).then_some(status);
    FailureCategory::classify(status, message).to_string()
}

/// User-facing message for a failed submission; pass status 0 when no response arrived
#[wasm_bindgen]
pub fn purchase_failure_message(status: u16, body: &str) -> String {
    let (status, detail) = if status == 0 {
        (None, body.trim().to_string())
    } else {
        (Some(status), extract_error_detail(status, body))
    };
    FailureCategory::classify(status, &detail).user_message(&detail)
}
