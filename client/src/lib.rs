//! LiveMART wholesale purchase client
//!
//! Lets a retailer browse wholesaler inventory and place purchase orders
//! with a configurable markup, against the LiveMART marketplace API.

pub mod config;
pub mod error;
pub mod external;
pub mod services;

pub use config::Config;
pub use error::{ClientError, ClientResult};
pub use external::{MarketplaceApi, MarketplaceClient};
pub use services::{CatalogService, PendingNavigation, PurchaseService, WholesalePurchasePage};
