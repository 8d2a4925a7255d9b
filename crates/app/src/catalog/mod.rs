//! Catalog
//!
//! Product lookup against the public recipe API that stands in for a product catalog.

mod errors;
mod models;
mod service;

pub use errors::CatalogError;
pub use service::*;
