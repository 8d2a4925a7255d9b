//! Catalog wire models.

use larder::products::{Product, ProductId};
use serde::Deserialize;

/// Search response body. `meals` is `null` when nothing matches.
#[derive(Debug, Deserialize)]
pub(crate) struct SearchResponse {
    pub meals: Option<Vec<MealRecord>>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct MealRecord {
    #[serde(rename = "idMeal")]
    pub id: String,

    #[serde(rename = "strMeal")]
    pub name: String,

    #[serde(rename = "strMealThumb", default)]
    pub thumbnail: Option<String>,

    #[serde(rename = "strInstructions", default)]
    pub instructions: Option<String>,
}

impl MealRecord {
    /// The recipe API has no prices, so every product gets `unit_price_minor`.
    pub(crate) fn into_product(self, unit_price_minor: u64) -> Product {
        Product {
            id: ProductId::new(self.id),
            name: self.name,
            thumbnail_url: self.thumbnail.unwrap_or_default(),
            description: self.instructions.unwrap_or_default(),
            unit_price_minor,
        }
    }
}

impl SearchResponse {
    pub(crate) fn into_products(self, unit_price_minor: u64) -> Vec<Product> {
        self.meals
            .unwrap_or_default()
            .into_iter()
            .map(|meal| meal.into_product(unit_price_minor))
            .collect()
    }
}
