//! Larder prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    cart::{Cart, CartLine, UnitPrices},
    checkout::{AddressDraft, AddressField, CheckoutError, CheckoutSession, CheckoutState},
    discounts::{ActiveDiscount, Redemption, Voucher, VoucherError, VoucherTable},
    orders::{Confirmation, OrderError, OrderIntent, OrderLine, OrderUuid, place_order},
    pricing::{PricingSnapshot, compute_pricing},
    products::{Product, ProductId},
    stock::{QuantitySelector, StockStatus},
    storage::{KeyValueStore, MemoryStore, StorageError},
    storefront::{Storefront, StorefrontError},
};
