//! Domain models for the LiveMART wholesale purchase page

mod dashboard;
mod listing;
mod product;
mod purchase;
mod user;

pub use dashboard::*;
pub use listing::*;
pub use product::*;
pub use purchase::*;
pub use user::*;
