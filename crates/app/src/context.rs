//! App Context

use std::{fs, io, path::PathBuf, sync::Arc};

use larder::{
    discounts::{VoucherError, VoucherTable},
    storefront::{Storefront, StorefrontError},
};
use thiserror::Error;
use tracing::debug;

use crate::{
    auth::{AuthProvider, FixedCredentialAuth},
    catalog::{CatalogService, MealDbCatalog},
    config::AppConfig,
    storage::JsonFileStore,
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to read voucher file {path}")]
    VoucherFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid voucher file")]
    Vouchers(#[from] VoucherError),

    #[error(transparent)]
    Storefront(#[from] StorefrontError),
}

#[derive(Clone)]
pub struct AppContext {
    pub catalog: Arc<dyn CatalogService>,
    pub auth: Arc<dyn AuthProvider>,
    pub vouchers: VoucherTable,
    pub store: JsonFileStore,
}

impl AppContext {
    /// Build application context from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error when the voucher file cannot be read or parsed.
    pub fn from_config(config: &AppConfig) -> Result<Self, AppInitError> {
        let vouchers = match &config.vouchers {
            Some(path) => {
                let contents =
                    fs::read_to_string(path).map_err(|source| AppInitError::VoucherFile {
                        path: path.clone(),
                        source,
                    })?;

                VoucherTable::from_yaml(&contents)?
            }
            None => VoucherTable::default(),
        };

        debug!(
            data_file = %config.data_file.display(),
            vouchers = vouchers.iter().count(),
            "app context ready"
        );

        Ok(Self {
            catalog: Arc::new(MealDbCatalog::new(config.catalog())),
            auth: Arc::new(FixedCredentialAuth::demo()),
            vouchers,
            store: JsonFileStore::new(&config.data_file),
        })
    }

    /// Open the storefront over the configured store.
    ///
    /// # Errors
    ///
    /// Returns an error if the saved state cannot be read.
    pub fn storefront(&self) -> Result<Storefront<&JsonFileStore>, AppInitError> {
        Ok(Storefront::open(&self.store, self.vouchers.clone())?)
    }
}
