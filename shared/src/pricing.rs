//! Retail price preview calculations
//!
//! `retail_price = wholesale_price × (1 + markup_percent / 100)`, rounded to
//! two decimal places for display.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Decimal places used for every displayed amount
pub const DISPLAY_SCALE: u32 = 2;

/// Retail price for a wholesale price and markup, unrounded
pub fn retail_price(wholesale_price: Decimal, markup_percent: Decimal) -> Decimal {
    wholesale_price * (Decimal::ONE + markup_percent / Decimal::ONE_HUNDRED)
}

/// Round an amount to two places, midpoint away from zero, keeping the scale
/// so that `120` displays as `120.00`.
pub fn round_for_display(amount: Decimal) -> Decimal {
    let mut rounded =
        amount.round_dp_with_strategy(DISPLAY_SCALE, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(DISPLAY_SCALE);
    rounded
}

/// Formatted amount, always with two decimals
pub fn format_amount(amount: Decimal) -> String {
    round_for_display(amount).to_string()
}

/// Retail price preview for the purchase modal
pub fn retail_price_preview(wholesale_price: Decimal, markup_percent: Decimal) -> Decimal {
    round_for_display(retail_price(wholesale_price, markup_percent))
}

/// Everything the purchase modal shows about the price of an order
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PricePreview {
    pub wholesale_price: Decimal,
    pub markup_percent: Decimal,
    pub retail_price: Decimal,
    pub unit_margin: Decimal,
    pub quantity: u32,
    /// What the retailer pays the wholesaler
    pub order_total: Decimal,
    /// Margin across the whole order once resold at the retail price
    pub expected_profit: Decimal,
}

impl PricePreview {
    pub fn compute(wholesale_price: Decimal, markup_percent: Decimal, quantity: u32) -> Self {
        let retail = retail_price(wholesale_price, markup_percent);
        let qty = Decimal::from(quantity);

        Self {
            wholesale_price: round_for_display(wholesale_price),
            markup_percent,
            retail_price: round_for_display(retail),
            unit_margin: round_for_display(retail - wholesale_price),
            quantity,
            order_total: round_for_display(wholesale_price * qty),
            expected_profit: round_for_display((retail - wholesale_price) * qty),
        }
    }
}
