//! Runtime configuration for a stockbook instance.
//!
//! Reads configuration from environment variables:
//! - `STOCKBOOK_DATA_DIR`: directory holding the JSON snapshots (default: ".")
//! - `STOCKBOOK_LOW_STOCK_THRESHOLD`: default `low-stock` cutoff (default: 5)

use std::path::PathBuf;

use crate::ledger::DEFAULT_LOW_STOCK_THRESHOLD;

pub const DATA_DIR_VAR: &str = "STOCKBOOK_DATA_DIR";
pub const LOW_STOCK_VAR: &str = "STOCKBOOK_LOW_STOCK_THRESHOLD";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StockbookConfig {
    /// Directory containing `inventory.json`, `sales.json` and `users.json`.
    pub data_dir: PathBuf,
    pub low_stock_threshold: u32,
}

impl Default for StockbookConfig {
    fn default() -> Self {
        StockbookConfig {
            data_dir: PathBuf::from("."),
            low_stock_threshold: DEFAULT_LOW_STOCK_THRESHOLD,
        }
    }
}

impl StockbookConfig {
    /// Builds a config from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from an arbitrary variable lookup.
    ///
    /// Unparsable values fall back to their defaults with a warning.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = StockbookConfig::default();

        if let Some(dir) = lookup(DATA_DIR_VAR).filter(|dir| !dir.trim().is_empty()) {
            config.data_dir = PathBuf::from(dir);
        }

        if let Some(raw) = lookup(LOW_STOCK_VAR) {
            match raw.trim().parse() {
                Ok(threshold) => config.low_stock_threshold = threshold,
                Err(_) => tracing::warn!(
                    value = %raw,
                    default = DEFAULT_LOW_STOCK_THRESHOLD,
                    "ignoring invalid {}",
                    LOW_STOCK_VAR
                ),
            }
        }

        config
    }

    /// Overrides the data directory, e.g. from a command-line flag.
    pub fn with_data_dir(mut self, data_dir: impl Into<PathBuf>) -> Self {
        self.data_dir = data_dir.into();
        self
    }
}
