//! Catalog service.

use async_trait::async_trait;
use larder::products::Product;
use mockall::automock;
use reqwest::Client;
use tracing::{debug, warn};

use crate::catalog::{errors::CatalogError, models::SearchResponse};

/// Default search endpoint base of the recipe API.
pub const DEFAULT_CATALOG_URL: &str = "https://www.themealdb.com/api/json/v1/1";

/// Unit price given to every catalog product: Rs. 100 in paise.
pub const DEFAULT_UNIT_PRICE_MINOR: u64 = 10_000;

/// Configuration for the recipe catalog.
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    /// API base URL, without a trailing slash.
    pub base_url: String,

    /// Unit price assigned to every product, in minor units.
    pub unit_price_minor: u64,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_CATALOG_URL.to_string(),
            unit_price_minor: DEFAULT_UNIT_PRICE_MINOR,
        }
    }
}

/// HTTP-backed catalog over TheMealDB search endpoint.
#[derive(Debug, Clone)]
pub struct MealDbCatalog {
    config: CatalogConfig,
    http: Client,
}

impl MealDbCatalog {
    #[must_use]
    pub fn new(config: CatalogConfig) -> Self {
        Self {
            config,
            http: Client::new(),
        }
    }

    fn search_url(&self) -> String {
        format!("{}/search.php", self.config.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl CatalogService for MealDbCatalog {
    async fn search(&self, query: &str) -> Result<Vec<Product>, CatalogError> {
        let response = self
            .http
            .get(self.search_url())
            .query(&[("s", query)])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            warn!(%status, query, "catalog search failed");

            return Err(CatalogError::UnexpectedResponse(format!(
                "search request failed with status {status}"
            )));
        }

        let body: SearchResponse = response.json().await?;
        let products = body.into_products(self.config.unit_price_minor);

        debug!(query, count = products.len(), "catalog search returned");

        Ok(products)
    }
}

#[automock]
#[async_trait]
pub trait CatalogService: Send + Sync {
    /// Search products by name. An empty query lists the default selection.
    async fn search(&self, query: &str) -> Result<Vec<Product>, CatalogError>;
}

/// Return the first product matching `query`.
///
/// # Errors
///
/// Returns [`CatalogError::NotFound`] when the search is empty, or the lookup error.
pub async fn first_match(
    catalog: &dyn CatalogService,
    query: &str,
) -> Result<Product, CatalogError> {
    catalog
        .search(query)
        .await?
        .into_iter()
        .next()
        .ok_or_else(|| CatalogError::NotFound(query.to_string()))
}

/// Return the product with `id` from the results of searching `query`.
///
/// # Errors
///
/// Returns [`CatalogError::NotFound`] when no result carries that id, or the lookup error.
pub async fn find_by_id(
    catalog: &dyn CatalogService,
    query: &str,
    id: &str,
) -> Result<Product, CatalogError> {
    catalog
        .search(query)
        .await?
        .into_iter()
        .find(|product| product.id.as_str() == id)
        .ok_or_else(|| CatalogError::NotFound(id.to_string()))
}
