//! Plain data types passed between the row store and the terminal UI. They
//! carry results and reports only; every rule about rows lives in `store`.

use std::fmt;

use serde::Serialize;

/// One stored record: positional text fields, field *i* under header *i*.
pub type Row = Vec<String>;

/// Result of summing one column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColumnSum {
    pub column: usize,
    pub total: f64,
    /// Fields present at the column that did not parse as numbers.
    pub skipped: usize,
}

impl fmt::Display for ColumnSum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Sum of column {}: {}", self.column, self.total)?;
        if self.skipped > 0 {
            write!(
                f,
                " ({} non-numeric value(s) were skipped)",
                self.skipped
            )?;
        }
        Ok(())
    }
}

/// Which layout a loaded file used.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    /// `LIST_NAME` and `AUTHOR` records precede the header row.
    Current,
    /// No metadata preamble; header row optional.
    Legacy,
}

/// What `load` found, so the caller can echo notices to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadReport {
    pub format: FileFormat,
    pub header_skipped: bool,
    pub rows: usize,
    pub warnings: Vec<String>,
}

impl LoadReport {
    /// Single-line status text for the footer.
    pub fn summary(&self) -> String {
        let mut text = match self.format {
            FileFormat::Current => format!("Loaded {} row(s).", self.rows),
            FileFormat::Legacy => format!("Loaded {} row(s) from old format file.", self.rows),
        };
        for warning in &self.warnings {
            text.push(' ');
            text.push_str(warning);
        }
        text
    }
}

/// Shape of the structured export document. Field order is the key order in
/// the written JSON.
#[derive(Debug, Serialize)]
pub struct ExportDocument<'a> {
    #[serde(rename = "LIST_NAME")]
    pub list_name: &'a str,
    #[serde(rename = "AUTHOR")]
    pub author: &'a str,
    pub data: Vec<&'a [String]>,
}
