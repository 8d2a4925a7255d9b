//! Catalog errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog lookup failed")]
    Lookup(#[from] reqwest::Error),

    #[error("unexpected catalog response: {0}")]
    UnexpectedResponse(String),

    #[error("no product matches {0:?}")]
    NotFound(String),
}

impl CatalogError {
    /// Whether the catalog could not be reached or understood, as opposed to a search
    /// that simply found nothing.
    #[must_use]
    pub fn is_lookup_failure(&self) -> bool {
        matches!(self, Self::Lookup(_) | Self::UnexpectedResponse(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_is_not_a_lookup_failure() {
        assert!(!CatalogError::NotFound("pie".to_string()).is_lookup_failure());
        assert!(CatalogError::UnexpectedResponse("500".to_string()).is_lookup_failure());
    }
}
