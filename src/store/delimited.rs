//! CSV persistence. Saved files open with two metadata records
//! (`LIST_NAME,<title>` and `AUTHOR,<author>`) followed by the header record
//! and the data rows. Files without the metadata records are read as the
//! legacy layout: an optional header row followed by data.

use std::fs;
use std::path::Path;

use csv::{ReaderBuilder, WriterBuilder};
use tracing::{info, warn};

use crate::models::{FileFormat, LoadReport, Row};

use super::{RowStore, StoreError, StoreResult, AUTHOR_TAG, LIST_NAME_TAG};

/// Everything a successful parse produces, applied to the store in one step.
struct ParsedFile {
    title: String,
    author: String,
    rows: Vec<Row>,
    report: LoadReport,
}

impl RowStore {
    /// Write the list to `path`, replacing any existing file. The path becomes
    /// the active file even if the write fails.
    pub fn save(&mut self, path: impl AsRef<Path>) -> StoreResult<()> {
        let path = path.as_ref();
        self.active_file = Some(path.to_path_buf());

        let contents = self.encode().map_err(|err| StoreError::csv(path, err))?;
        fs::write(path, contents).map_err(|err| StoreError::io(path, err))?;

        info!(path = %path.display(), rows = self.rows.len(), "list saved");
        Ok(())
    }

    /// Replace rows, title and author with the contents of `path`. The path
    /// becomes the active file; on failure nothing else changes.
    pub fn load(&mut self, path: impl AsRef<Path>) -> StoreResult<LoadReport> {
        let path = path.as_ref();
        self.active_file = Some(path.to_path_buf());

        let records = read_records(path)?;
        let parsed = self.parse_records(path, records)?;

        self.title = parsed.title;
        self.author = parsed.author;
        self.rows = parsed.rows;

        info!(
            path = %path.display(),
            format = ?parsed.report.format,
            rows = parsed.report.rows,
            "list loaded"
        );
        Ok(parsed.report)
    }

    /// Serialize preamble, headers and rows. A row with no fields becomes a
    /// blank line so it reads back as an empty row.
    fn encode(&self) -> Result<Vec<u8>, csv::Error> {
        let mut writer = WriterBuilder::new().flexible(true).from_writer(Vec::new());

        writer.write_record([LIST_NAME_TAG, self.title.as_str()])?;
        writer.write_record([AUTHOR_TAG, self.author.as_str()])?;
        writer.write_record(&self.config.column_headers)?;
        for row in &self.rows {
            if row.is_empty() {
                writer.flush()?;
                let mut buf = writer
                    .into_inner()
                    .map_err(|err| csv::Error::from(err.into_error()))?;
                buf.push(b'\n');
                writer = WriterBuilder::new().flexible(true).from_writer(buf);
            } else {
                writer.write_record(row)?;
            }
        }

        writer
            .into_inner()
            .map_err(|err| csv::Error::from(err.into_error()))
    }

    fn parse_records(&self, path: &Path, records: Vec<Row>) -> StoreResult<ParsedFile> {
        let malformed = |message: &str| StoreError::Malformed {
            path: path.to_path_buf(),
            message: message.to_string(),
        };

        let mut records = records.into_iter().peekable();
        let first = records.next().ok_or_else(|| malformed("file is empty"))?;
        let mut warnings = Vec::new();

        let (format, title, author, header_skipped, leading) =
            if first.first().map(String::as_str) == Some(LIST_NAME_TAG) {
                let title = first
                    .get(1)
                    .cloned()
                    .ok_or_else(|| malformed("LIST_NAME record has no value"))?;

                let author_record =
                    records.next_if(|record| record.first().map(String::as_str) == Some(AUTHOR_TAG));
                let (author, header_skipped) = match author_record {
                    Some(record) => {
                        let author = record
                            .get(1)
                            .cloned()
                            .ok_or_else(|| malformed("AUTHOR record has no value"))?;
                        (author, records.next().is_some())
                    }
                    None => {
                        // The record after the title starts the header/data
                        // sequence; only an exact header match is dropped.
                        warn!(path = %path.display(), "AUTHOR record missing");
                        warnings.push(format!(
                            "Warning: AUTHOR row not found. Using default author: {}",
                            self.config.default_author
                        ));
                        let skipped = records
                            .next_if(|record| *record == self.config.column_headers)
                            .is_some();
                        (self.config.default_author.clone(), skipped)
                    }
                };
                (FileFormat::Current, title, author, header_skipped, None)
            } else {
                warn!(path = %path.display(), "loading file in old format");
                let is_header = first == self.config.column_headers;
                let leading = if is_header { None } else { Some(first) };
                (
                    FileFormat::Legacy,
                    self.config.default_title.clone(),
                    self.config.default_author.clone(),
                    is_header,
                    leading,
                )
            };

        let rows: Vec<Row> = leading
            .into_iter()
            .chain(records)
            .map(|row| self.truncated(row))
            .collect();

        Ok(ParsedFile {
            title,
            author,
            report: LoadReport {
                format,
                header_skipped,
                rows: rows.len(),
                warnings,
            },
            rows,
        })
    }
}

/// Read every record of a CSV file without header handling. Records may have
/// any number of fields, and a blank line is a record with no fields.
fn read_records(path: &Path) -> StoreResult<Vec<Row>> {
    let contents = fs::read(path).map_err(|err| StoreError::io(path, err))?;
    split_lines(&contents)
        .into_iter()
        .map(|line| parse_line(line).map_err(|err| StoreError::csv(path, err)))
        .collect()
}

/// Split raw file contents at line breaks that fall outside quoted fields.
/// The final line break does not start another record.
fn split_lines(contents: &[u8]) -> Vec<&[u8]> {
    let mut lines = Vec::new();
    let mut in_quotes = false;
    let mut start = 0;

    for (pos, byte) in contents.iter().enumerate() {
        match *byte {
            b'"' => in_quotes = !in_quotes,
            b'\n' if !in_quotes => {
                lines.push(strip_carriage_return(&contents[start..pos]));
                start = pos + 1;
            }
            _ => {}
        }
    }
    if start < contents.len() {
        lines.push(strip_carriage_return(&contents[start..]));
    }
    lines
}

fn strip_carriage_return(line: &[u8]) -> &[u8] {
    line.strip_suffix(b"\r").unwrap_or(line)
}

/// Parse one logical line with the `csv` reader. Blank lines give an empty row.
fn parse_line(line: &[u8]) -> Result<Row, csv::Error> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(line);

    match reader.records().next() {
        Some(record) => Ok(record?.iter().map(str::to_string).collect()),
        None => Ok(Vec::new()),
    }
}
