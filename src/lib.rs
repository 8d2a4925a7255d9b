//! Larder
//!
//! Larder is the cart and checkout core of a small food-delivery storefront: cart
//! mutation, voucher redemption, pricing, shipping-address drafting and local order
//! placement.

pub mod cart;
pub mod checkout;
pub mod discounts;
pub mod orders;
pub mod prelude;
pub mod pricing;
pub mod products;
pub mod stock;
pub mod storage;
pub mod storefront;
pub mod uuids;
