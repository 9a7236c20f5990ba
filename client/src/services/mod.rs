//! Business logic services

pub mod catalog;
pub mod page;
pub mod purchase;

pub use catalog::CatalogService;
pub use page::{PendingNavigation, WholesalePurchasePage};
pub use purchase::PurchaseService;
