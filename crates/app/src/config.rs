//! Application configuration

use std::path::PathBuf;

use clap::Args;

use crate::catalog::{CatalogConfig, DEFAULT_CATALOG_URL, DEFAULT_UNIT_PRICE_MINOR};

/// Log output format.
#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum LogFormat {
    /// Compact, human-readable logs.
    Compact,

    /// Structured JSON logs.
    Json,
}

/// Logging settings.
#[derive(Debug, Args)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "RUST_LOG", default_value = "warn", global = true)]
    pub log_level: String,

    /// Log format (compact, json)
    #[arg(long, env = "LOG_FORMAT", value_enum, default_value_t = LogFormat::Compact, global = true)]
    pub log_format: LogFormat,
}

/// Shared settings for every command.
#[derive(Debug, Args)]
pub struct AppConfig {
    /// File holding the cart, voucher and remembered address between runs
    #[arg(long, env = "LARDER_DATA_FILE", default_value = "larder.json", global = true)]
    pub data_file: PathBuf,

    /// Recipe API base URL
    #[arg(long, env = "LARDER_CATALOG_URL", default_value = DEFAULT_CATALOG_URL, global = true)]
    pub catalog_url: String,

    /// Unit price given to every catalog product, in paise
    #[arg(long, env = "LARDER_DEFAULT_PRICE", default_value_t = DEFAULT_UNIT_PRICE_MINOR, global = true)]
    pub default_price: u64,

    /// Optional YAML voucher table replacing the built-in one
    #[arg(long, env = "LARDER_VOUCHERS", global = true)]
    pub vouchers: Option<PathBuf>,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    #[must_use]
    pub fn catalog(&self) -> CatalogConfig {
        CatalogConfig {
            base_url: self.catalog_url.clone(),
            unit_price_minor: self.default_price,
        }
    }
}
