//! Validation utilities for purchase orders
//!
//! Purchase forms are validated client-side before any network call.

use rust_decimal::Decimal;
use thiserror::Error;
use validator::ValidationError;

use crate::models::Product;

/// Smallest quantity that can be ordered
pub const MIN_QUANTITY: u32 = 1;

/// Inclusive upper bound of the markup percentage
pub const MAX_MARKUP_PERCENT: Decimal = Decimal::ONE_HUNDRED;

/// Reasons a purchase cannot be submitted
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PurchaseValidationError {
    #[error("Please select a product to purchase")]
    NoProductSelected,

    #[error("Product {0} is not available")]
    UnknownProduct(String),

    #[error("Quantity must be at least {}", MIN_QUANTITY)]
    QuantityBelowMinimum { quantity: u32 },

    #[error("Only {stock} units in stock, cannot order {quantity}")]
    QuantityExceedsStock { quantity: u32, stock: u32 },

    #[error("Markup must be between 0 and 100 percent, got {markup_percent}")]
    MarkupOutOfRange { markup_percent: Decimal },

    #[error("Markup must be a number between 0 and 100 percent")]
    MarkupNotANumber,

    #[error("Invalid purchase request: {0}")]
    InvalidRequest(String),
}

/// Validate the ordered quantity against the product's stock
pub fn validate_quantity(quantity: u32, stock: u32) -> Result<(), PurchaseValidationError> {
    if quantity < MIN_QUANTITY {
        return Err(PurchaseValidationError::QuantityBelowMinimum { quantity });
    }
    if quantity > stock {
        return Err(PurchaseValidationError::QuantityExceedsStock { quantity, stock });
    }
    Ok(())
}

/// Validate the markup percentage is in [0, 100]
pub fn validate_markup_percent(markup_percent: Decimal) -> Result<(), PurchaseValidationError> {
    if markup_percent < Decimal::ZERO || markup_percent > MAX_MARKUP_PERCENT {
        return Err(PurchaseValidationError::MarkupOutOfRange { markup_percent });
    }
    Ok(())
}

/// Validate a complete purchase selection
pub fn validate_purchase(
    product: Option<&Product>,
    quantity: u32,
    markup_percent: Decimal,
) -> Result<(), PurchaseValidationError> {
    let product = product.ok_or(PurchaseValidationError::NoProductSelected)?;
    validate_quantity(quantity, product.stock)?;
    validate_markup_percent(markup_percent)
}

/// Whether the submit action should be enabled
pub fn can_submit(product: Option<&Product>, quantity: u32, markup_percent: Decimal) -> bool {
    validate_purchase(product, quantity, markup_percent).is_ok()
}

/// `validator` hook for markup fields on request payloads
pub fn validate_markup(markup_percent: &Decimal) -> Result<(), ValidationError> {
    validate_markup_percent(*markup_percent).map_err(|_| ValidationError::new("markup_range"))
}
