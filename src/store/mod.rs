//! The row store: an ordered list of fixed-width text rows plus the list's
//! title, author and column headers. Submodules split the behaviour the same
//! way the file formats split: in-memory edits, CSV persistence, JSON export
//! and text rendering.

mod delimited;
mod error;
mod export;
mod render;
mod rows;

use std::path::{Path, PathBuf};

use crate::config::StoreConfig;
use crate::models::Row;

pub use error::{StoreError, StoreResult};

/// Tag written in the first field of the title record.
pub const LIST_NAME_TAG: &str = "LIST_NAME";
/// Tag written in the first field of the author record.
pub const AUTHOR_TAG: &str = "AUTHOR";

/// In-memory list of rows. Every stored row holds at most
/// `config.max_columns` fields.
#[derive(Debug, Clone)]
pub struct RowStore {
    config: StoreConfig,
    rows: Vec<Row>,
    title: String,
    author: String,
    /// Last file passed to `save` or `load`; export derives its path from it.
    active_file: Option<PathBuf>,
}

impl RowStore {
    /// Empty store using the configured default title and author.
    pub fn new(config: StoreConfig) -> Self {
        Self {
            title: config.default_title.clone(),
            author: config.default_author.clone(),
            config,
            rows: Vec::new(),
            active_file: None,
        }
    }

    /// Seed the store from an existing row collection, truncating each row.
    pub fn with_rows<I>(config: StoreConfig, rows: I) -> Self
    where
        I: IntoIterator<Item = Row>,
    {
        let mut store = Self::new(config);
        store.rows = rows.into_iter().map(|row| store.truncated(row)).collect();
        store
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn row(&self, index: usize) -> Option<&Row> {
        self.rows.get(index)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_headers(&self) -> &[String] {
        &self.config.column_headers
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    pub fn set_author(&mut self, author: impl Into<String>) {
        self.author = author.into();
    }

    pub fn active_file(&self) -> Option<&Path> {
        self.active_file.as_deref()
    }

    /// Drop every field past the configured maximum.
    fn truncated(&self, mut row: Row) -> Row {
        row.truncate(self.config.max_columns);
        row
    }
}

impl Default for RowStore {
    fn default() -> Self {
        Self::new(StoreConfig::default())
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::row;
    use super::*;

    #[test]
    fn new_store_uses_configured_defaults() {
        let store = RowStore::default();
        assert!(store.is_empty());
        assert_eq!(store.title(), "lista.csv");
        assert_eq!(store.author(), "author");
        assert!(store.active_file().is_none());
    }

    #[test]
    fn seeding_truncates_every_row() {
        let store = RowStore::with_rows(
            StoreConfig::default(),
            vec![row(&["a", "b", "c", "d", "e", "f", "g"]), row(&["x"])],
        );
        assert_eq!(store.rows()[0], row(&["a", "b", "c", "d", "e"]));
        assert_eq!(store.rows()[1], row(&["x"]));
    }

    #[test]
    fn title_and_author_are_settable() {
        let mut store = RowStore::default();
        store.set_title("Groceries");
        store.set_author("Ana");
        assert_eq!(store.title(), "Groceries");
        assert_eq!(store.author(), "Ana");
    }
}
