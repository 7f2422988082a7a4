//! Built-in defaults for the row store and the on-disk locations the
//! application writes to. The store never reads globals: a `StoreConfig` is
//! handed to it at construction so tests can shrink the column count or swap
//! headers without touching shared state.

use std::path::PathBuf;

use anyhow::{anyhow, Result};
use directories::BaseDirs;

/// Number of fields a row may hold before it is truncated.
pub const MAX_COLUMNS: usize = 5;
/// Fixed column headers written to every saved file.
pub const COLUMN_HEADERS: [&str; MAX_COLUMNS] = ["Date", "Product", "Quantity", "Price", "Total"];
/// Title used for new lists and for files without the metadata preamble.
pub const DEFAULT_TITLE: &str = "lista.csv";
/// Author used when a file does not name one.
pub const DEFAULT_AUTHOR: &str = "author";
/// File the binary opens when no path is given on the command line.
pub const DEFAULT_FILE: &str = "lista.csv";

/// Folder name used beneath the user's home directory for application data.
const DATA_DIR_NAME: &str = ".list-manager";
/// Log folder inside the application data directory.
const LOGS_DIR_NAME: &str = "logs";

/// Immutable defaults injected into a [`crate::RowStore`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Maximum number of fields kept per row.
    pub max_columns: usize,
    /// Header record. Its length is the column count shown in tables.
    pub column_headers: Vec<String>,
    pub default_title: String,
    pub default_author: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            max_columns: MAX_COLUMNS,
            column_headers: COLUMN_HEADERS.iter().map(|h| h.to_string()).collect(),
            default_title: DEFAULT_TITLE.to_string(),
            default_author: DEFAULT_AUTHOR.to_string(),
        }
    }
}

/// Resolve the directory that receives rolling log files.
pub fn logs_dir() -> Result<PathBuf> {
    let base_dirs = BaseDirs::new().ok_or_else(|| anyhow!("could not locate home directory"))?;
    Ok(base_dirs.home_dir().join(DATA_DIR_NAME).join(LOGS_DIR_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_headers_match_column_count() {
        let config = StoreConfig::default();
        assert_eq!(config.column_headers.len(), config.max_columns);
        assert_eq!(config.column_headers[2], "Quantity");
        assert_eq!(config.default_title, "lista.csv");
        assert_eq!(config.default_author, "author");
    }
}
