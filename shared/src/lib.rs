//! Shared types and models for the LiveMART wholesale purchase client
//!
//! This crate contains the types and pure computations shared between the
//! HTTP client, the browser front end (via WASM), and the CLI.

pub mod failure;
pub mod models;
pub mod pricing;
pub mod types;
pub mod validation;

pub use failure::*;
pub use models::*;
pub use pricing::*;
pub use types::*;
pub use validation::*;
