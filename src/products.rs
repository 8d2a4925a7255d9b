//! Products

use std::fmt;

use rusty_money::{Money, iso::Currency};
use serde::{Deserialize, Serialize};

/// Product identifier, as assigned by the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(String);

impl ProductId {
    /// Create a product id from any string-like value.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ProductId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for ProductId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Product
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Product id
    pub id: ProductId,

    /// Product name
    pub name: String,

    /// Thumbnail image URL
    pub thumbnail_url: String,

    /// Long-form description
    pub description: String,

    /// Unit price in minor currency units
    pub unit_price_minor: u64,
}

impl Product {
    /// Unit price as money in the given currency.
    ///
    /// Prices that do not fit an `i64` saturate.
    pub fn unit_price<'a>(&self, currency: &'a Currency) -> Money<'a, Currency> {
        Money::from_minor(
            i64::try_from(self.unit_price_minor).unwrap_or(i64::MAX),
            currency,
        )
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use rusty_money::iso;

    use super::*;

    pub(crate) fn product(id: &str, unit_price_minor: u64) -> Product {
        Product {
            id: ProductId::new(id),
            name: format!("Product {id}"),
            thumbnail_url: format!("https://img.example.com/{id}.jpg"),
            description: String::new(),
            unit_price_minor,
        }
    }

    #[test]
    fn unit_price_uses_minor_units() {
        let product = product("p1", 150);

        assert_eq!(product.unit_price(iso::INR), Money::from_minor(150, iso::INR));
    }

    #[test]
    fn product_id_displays_raw_value() {
        assert_eq!(ProductId::from("52772").to_string(), "52772");
    }
}
