//! Core library surface for the list manager: a row store persisted as CSV
//! with a small metadata preamble, exportable to JSON, and the terminal UI
//! that drives it.
pub mod config;
pub mod logging;
pub mod models;
pub mod store;
pub mod ui;

/// Defaults injected into every store.
pub use config::StoreConfig;

/// Result and report types returned by store operations.
pub use models::{ColumnSum, FileFormat, LoadReport, Row};

/// The row store and its error type.
pub use store::{RowStore, StoreError};

/// The interactive application entry point and state container.
pub use ui::{run_app, App};
