//! Authentication
//!
//! Shopper sign-in behind a swappable provider. The bundled provider accepts one fixed
//! demo credential; there is no real credential store.

mod errors;
mod models;
mod service;

pub use errors::*;
pub use models::*;
pub use service::*;
