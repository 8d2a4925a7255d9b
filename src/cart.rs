//! Cart
//!
//! The guest cart: an insertion-ordered collection of line items with at most one
//! line per product and every quantity at least one.

use rustc_hash::FxHashMap;
use rusty_money::{Money, iso::Currency};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::{
    pricing::money,
    products::{Product, ProductId},
    storage::{GUEST_CART_KEY, KeyValueStore, StorageError},
};

/// Unit prices in minor units, keyed by product id.
pub type UnitPrices = FxHashMap<ProductId, u64>;

/// One product entry in the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    product: Product,
    quantity: u32,
}

impl CartLine {
    /// The product on this line.
    pub fn product(&self) -> &Product {
        &self.product
    }

    /// The id of the product on this line.
    pub fn product_id(&self) -> &ProductId {
        &self.product.id
    }

    /// Quantity, always at least one.
    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Unit price multiplied by quantity, saturating.
    pub fn line_total_minor(&self) -> u64 {
        self.product
            .unit_price_minor
            .saturating_mul(u64::from(self.quantity))
    }

    /// Line total as money in `currency`.
    pub fn line_total<'a>(&self, currency: &'a Currency) -> Money<'a, Currency> {
        money(self.line_total_minor(), currency)
    }
}

/// Guest cart
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Create an empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `quantity_delta` of `product`.
    ///
    /// An existing line has its quantity adjusted, otherwise a new line is appended.
    /// Nothing changes if the resulting quantity would be below one. Returns whether
    /// the cart changed.
    pub fn add_item(&mut self, product: Product, quantity_delta: i32) -> bool {
        if let Some(line) = self.line_mut(&product.id) {
            let Some(quantity) = adjusted(line.quantity, quantity_delta) else {
                return false;
            };

            line.quantity = quantity;

            debug!(product = %product.id, quantity, "cart line quantity increased");

            return true;
        }

        let Some(quantity) = adjusted(0, quantity_delta) else {
            return false;
        };

        debug!(product = %product.id, quantity, "cart line added");

        self.lines.push(CartLine { product, quantity });

        true
    }

    /// Change the quantity of an existing line by `delta`, clamping at one.
    ///
    /// Never removes a line. Unknown product ids are ignored. Returns whether a line
    /// was found.
    pub fn change_quantity(&mut self, product_id: &ProductId, delta: i32) -> bool {
        let Some(line) = self.line_mut(product_id) else {
            debug!(product = %product_id, "quantity change for product not in cart");
            return false;
        };

        line.quantity = adjusted(line.quantity, delta).unwrap_or(1);

        debug!(product = %product_id, quantity = line.quantity, "cart line quantity changed");

        true
    }

    /// Remove the line for `product_id`. Idempotent; returns whether a line was removed.
    pub fn remove_item(&mut self, product_id: &ProductId) -> bool {
        let before = self.lines.len();

        self.lines.retain(|line| line.product_id() != product_id);

        let removed = self.lines.len() != before;

        if removed {
            debug!(product = %product_id, "cart line removed");
        }

        removed
    }

    /// Lines in insertion order.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Look up the line for a product.
    pub fn line(&self, product_id: &ProductId) -> Option<&CartLine> {
        self.lines.iter().find(|line| line.product_id() == product_id)
    }

    /// Unit prices of every product in the cart.
    pub fn unit_prices(&self) -> UnitPrices {
        self.lines
            .iter()
            .map(|line| (line.product.id.clone(), line.product.unit_price_minor))
            .collect()
    }

    /// Total number of units across all lines.
    pub fn item_count(&self) -> u64 {
        self.lines.iter().map(|line| u64::from(line.quantity)).sum()
    }

    /// Remove every line.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Number of lines.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Whether the cart has no lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Persist the cart lines to `store`.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the lines cannot be encoded or written.
    pub fn save_to(&self, store: &impl KeyValueStore) -> Result<(), StorageError> {
        let encoded = serde_json::to_string(&self.lines)?;

        store.set(GUEST_CART_KEY, &encoded)
    }

    /// Restore a cart previously saved with [`Cart::save_to`].
    ///
    /// A missing cart restores empty, as does one that cannot be decoded. Saved lines
    /// are re-added one by one so duplicate or zero-quantity entries cannot come back.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the store cannot be read.
    pub fn restore_from(store: &impl KeyValueStore) -> Result<Self, StorageError> {
        let mut cart = Self::new();

        let Some(encoded) = store.get(GUEST_CART_KEY)? else {
            return Ok(cart);
        };

        let saved: Vec<CartLine> = match serde_json::from_str(&encoded) {
            Ok(saved) => saved,
            Err(error) => {
                warn!(%error, "discarding undecodable saved cart");
                return Ok(cart);
            }
        };

        for line in saved {
            let delta = i32::try_from(line.quantity).unwrap_or(i32::MAX);
            cart.add_item(line.product, delta);
        }

        Ok(cart)
    }

    fn line_mut(&mut self, product_id: &ProductId) -> Option<&mut CartLine> {
        self.lines
            .iter_mut()
            .find(|line| line.product_id() == product_id)
    }
}

/// Apply `delta` to `quantity`, returning `None` if the result would fall below one.
fn adjusted(quantity: u32, delta: i32) -> Option<u32> {
    let next = i64::from(quantity) + i64::from(delta);

    if next < 1 {
        return None;
    }

    Some(u32::try_from(next).unwrap_or(u32::MAX))
}
