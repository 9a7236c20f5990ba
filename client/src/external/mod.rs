//! External API integrations

pub mod marketplace;

pub use marketplace::{MarketplaceApi, MarketplaceClient};
