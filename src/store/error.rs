use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Everything a row store operation can report. None of these are fatal: the
/// store is left as it was before the failing call.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Index {index} out of range (list has {len} row(s)).")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Invalid column index {index}. Please choose a column between 0 and {}.", .max.saturating_sub(1))]
    InvalidColumn { index: usize, max: usize },

    #[error("File {} not found.", .0.display())]
    FileNotFound(PathBuf),

    #[error("Error reading CSV file {}: {message}", .path.display())]
    Malformed { path: PathBuf, message: String },

    #[error("Failed to access {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("No CSV file has been loaded or saved. Please load or save a CSV file first.")]
    NoActiveFile,

    #[error("No data to export.")]
    NothingToExport,

    #[error("Error exporting to JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl StoreError {
    /// Wrap an I/O failure, keeping "not found" distinct from other errors.
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        let path = path.into();
        if source.kind() == io::ErrorKind::NotFound {
            StoreError::FileNotFound(path)
        } else {
            StoreError::Io { path, source }
        }
    }

    /// Translate a `csv` crate error, routing its I/O failures through
    /// [`StoreError::io`].
    pub(crate) fn csv(path: impl Into<PathBuf>, err: csv::Error) -> Self {
        let path = path.into();
        if err.is_io_error() {
            match err.into_kind() {
                csv::ErrorKind::Io(source) => StoreError::io(path, source),
                other => StoreError::Malformed {
                    path,
                    message: format!("{other:?}"),
                },
            }
        } else {
            StoreError::Malformed {
                path,
                message: err.to_string(),
            }
        }
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_is_reported_separately() {
        let err = StoreError::io("missing.csv", io::Error::from(io::ErrorKind::NotFound));
        assert!(matches!(err, StoreError::FileNotFound(_)));
        assert_eq!(err.to_string(), "File missing.csv not found.");
    }

    #[test]
    fn invalid_column_names_the_valid_range() {
        let err = StoreError::InvalidColumn { index: 7, max: 5 };
        assert_eq!(
            err.to_string(),
            "Invalid column index 7. Please choose a column between 0 and 4."
        );
    }
}
