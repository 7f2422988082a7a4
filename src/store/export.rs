use std::fs;
use std::path::PathBuf;

use tracing::info;

use crate::models::ExportDocument;

use super::{RowStore, StoreError, StoreResult};

/// Extension given to exported documents.
const EXPORT_EXTENSION: &str = "json";

impl RowStore {
    /// Path `export` would write to: the active file with its extension
    /// swapped for `.json`.
    pub fn export_path(&self) -> Option<PathBuf> {
        self.active_file
            .as_ref()
            .map(|path| path.with_extension(EXPORT_EXTENSION))
    }

    /// Write title, author, headers and raw rows as a JSON document next to
    /// the active CSV file. Requires an earlier `save` or `load`, and at least
    /// one row.
    pub fn export(&self) -> StoreResult<PathBuf> {
        let path = self.export_path().ok_or(StoreError::NoActiveFile)?;
        if self.rows.is_empty() {
            return Err(StoreError::NothingToExport);
        }

        let contents = self.export_document()?;
        fs::write(&path, contents).map_err(|err| StoreError::io(&path, err))?;

        info!(path = %path.display(), rows = self.rows.len(), "list exported");
        Ok(path)
    }

    /// Pretty-printed JSON for the export file, built in memory so a failed
    /// serialization never touches the target.
    fn export_document(&self) -> StoreResult<Vec<u8>> {
        let document = ExportDocument {
            list_name: &self.title,
            author: &self.author,
            data: std::iter::once(self.config.column_headers.as_slice())
                .chain(self.rows.iter().map(Vec::as_slice))
                .collect(),
        };
        Ok(serde_json::to_vec_pretty(&document)?)
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use serde_json::{json, Value};
    use tempfile::tempdir;

    use crate::store::test_support::row;
    use crate::store::{RowStore, StoreError};

    #[test]
    fn export_without_active_file_writes_nothing() {
        let mut store = RowStore::default();
        store.add(row(&["2024-01-01", "Widget", "2", "5"]));

        let err = store.export().unwrap_err();

        assert!(matches!(err, StoreError::NoActiveFile));
        assert!(store.export_path().is_none());
    }

    #[test]
    fn export_writes_document_next_to_saved_file() {
        let dir = tempdir().unwrap();
        let csv_path = dir.path().join("lista.csv");
        let mut store = RowStore::default();
        store.set_title("T");
        store.set_author("A");
        store.add(row(&["2024-01-01", "Widget", "2", "5"]));
        store.save(&csv_path).unwrap();

        let json_path = store.export().unwrap();

        assert_eq!(json_path, dir.path().join("lista.json"));
        let written: Value = serde_json::from_str(&fs::read_to_string(&json_path).unwrap()).unwrap();
        assert_eq!(
            written,
            json!({
                "LIST_NAME": "T",
                "AUTHOR": "A",
                "data": [
                    ["Date", "Product", "Quantity", "Price", "Total"],
                    ["2024-01-01", "Widget", "2", "5"]
                ]
            })
        );
    }

    #[test]
    fn export_keeps_key_order_and_two_space_indent() {
        let dir = tempdir().unwrap();
        let mut store = RowStore::default();
        store.add(row(&["x"]));
        store.save(dir.path().join("list.csv")).unwrap();

        let text = fs::read_to_string(store.export().unwrap()).unwrap();

        assert!(text.starts_with("{\n  \"LIST_NAME\": \"lista.csv\",\n  \"AUTHOR\": \"author\",\n  \"data\": ["));
    }

    #[test]
    fn export_writes_exactly_the_rendered_document() {
        let dir = tempdir().unwrap();
        let mut store = RowStore::default();
        store.add(row(&["2024-01-01", "Widget"]));
        store.save(dir.path().join("list.csv")).unwrap();

        let path = store.export().unwrap();

        assert_eq!(fs::read(&path).unwrap(), store.export_document().unwrap());
    }

    #[test]
    fn unwritable_target_reports_io_error() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join("blocked.json")).unwrap();
        let mut store = RowStore::default();
        store.add(row(&["x"]));
        store.save(dir.path().join("blocked.csv")).unwrap();

        let err = store.export().unwrap_err();

        assert!(matches!(err, StoreError::Io { .. }));
        assert!(dir.path().join("blocked.json").is_dir());
    }

    #[test]
    fn export_of_empty_list_is_skipped() {
        let dir = tempdir().unwrap();
        let mut store = RowStore::default();
        store.save(dir.path().join("empty.csv")).unwrap();

        let err = store.export().unwrap_err();

        assert!(matches!(err, StoreError::NothingToExport));
        assert!(!dir.path().join("empty.json").exists());
    }

    #[test]
    fn export_path_swaps_or_adds_extension() {
        let dir = tempdir().unwrap();
        let mut store = RowStore::default();
        let _ = store.load(dir.path().join("data"));
        assert_eq!(store.export_path(), Some(dir.path().join("data.json")));
    }
}
