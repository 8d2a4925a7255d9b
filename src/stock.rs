//! Stock
//!
//! Availability banding and the bounded quantity picker on the product details page.
//! The catalog carries no inventory, so callers use [`PLACEHOLDER_STOCK_LEVEL`].

use std::fmt;

/// Stock level assumed for every catalog product.
pub const PLACEHOLDER_STOCK_LEVEL: u32 = 20;

/// Availability band for a stock level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StockStatus {
    /// More than 50 units.
    InStock,
    /// 11 to 50 units.
    LowStock,
    /// 1 to 10 units.
    VeryLowStock,
    /// Nothing left.
    OutOfStock,
}

impl StockStatus {
    /// Band a stock level.
    pub fn from_level(level: u32) -> Self {
        match level {
            51.. => StockStatus::InStock,
            11..=50 => StockStatus::LowStock,
            1..=10 => StockStatus::VeryLowStock,
            0 => StockStatus::OutOfStock,
        }
    }

    /// Whether anything can be added to the cart.
    pub fn is_available(self) -> bool {
        self != StockStatus::OutOfStock
    }
}

impl fmt::Display for StockStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            StockStatus::InStock => "In Stock",
            StockStatus::LowStock => "Low Stock",
            StockStatus::VeryLowStock => "Very Low Stock",
            StockStatus::OutOfStock => "Out of Stock",
        })
    }
}

/// Quantity chosen on the product page, kept within `[1, stock]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuantitySelector {
    quantity: u32,
    stock: u32,
}

impl QuantitySelector {
    /// Start at one unit for a product with `stock` units available.
    pub fn new(stock: u32) -> Self {
        Self { quantity: 1, stock }
    }

    /// Step the quantity by `delta`. Steps that leave `[1, stock]` are ignored.
    /// Returns whether the quantity changed.
    pub fn step(&mut self, delta: i32) -> bool {
        let next = i64::from(self.quantity) + i64::from(delta);

        match u32::try_from(next) {
            Ok(next) if next >= 1 && next <= self.stock.max(1) && next != self.quantity => {
                self.quantity = next;
                true
            }
            _ => false,
        }
    }

    /// Selected quantity.
    pub fn quantity(self) -> u32 {
        self.quantity
    }

    /// Availability band of the product.
    pub fn status(self) -> StockStatus {
        StockStatus::from_level(self.stock)
    }

    /// Quantity to add to the cart, or `None` when out of stock.
    pub fn to_add(self) -> Option<u32> {
        self.status().is_available().then_some(self.quantity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn band_boundaries() {
        assert_eq!(StockStatus::from_level(0), StockStatus::OutOfStock);
        assert_eq!(StockStatus::from_level(1), StockStatus::VeryLowStock);
        assert_eq!(StockStatus::from_level(10), StockStatus::VeryLowStock);
        assert_eq!(StockStatus::from_level(11), StockStatus::LowStock);
        assert_eq!(StockStatus::from_level(50), StockStatus::LowStock);
        assert_eq!(StockStatus::from_level(51), StockStatus::InStock);
    }

    #[test]
    fn placeholder_level_is_low_stock() {
        assert_eq!(
            StockStatus::from_level(PLACEHOLDER_STOCK_LEVEL).to_string(),
            "Low Stock"
        );
    }

    #[test]
    fn selector_stays_within_stock() {
        let mut selector = QuantitySelector::new(3);

        assert!(!selector.step(-1));
        assert!(selector.step(2));
        assert!(!selector.step(1));
        assert_eq!(selector.quantity(), 3);
        assert_eq!(selector.to_add(), Some(3));
    }

    #[test]
    fn out_of_stock_cannot_be_added() {
        let mut selector = QuantitySelector::new(0);

        assert!(!selector.step(1));
        assert_eq!(selector.to_add(), None);
    }
}
