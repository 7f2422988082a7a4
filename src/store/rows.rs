use tracing::{debug, warn};

use crate::models::{ColumnSum, Row};

use super::{RowStore, StoreError, StoreResult};

impl RowStore {
    /// Append a row, truncated to the configured width.
    pub fn add(&mut self, row: Row) {
        let row = self.truncated(row);
        debug!(index = self.rows.len(), fields = row.len(), "row added");
        self.rows.push(row);
    }

    /// Remove the row at `index`; later rows shift down by one.
    pub fn delete(&mut self, index: usize) -> StoreResult<Row> {
        self.check_index(index)?;
        debug!(index, "row deleted");
        Ok(self.rows.remove(index))
    }

    /// Replace the row at `index`, truncated to the configured width.
    pub fn update(&mut self, index: usize, row: Row) -> StoreResult<()> {
        self.check_index(index)?;
        let row = self.truncated(row);
        debug!(index, fields = row.len(), "row updated");
        self.rows[index] = row;
        Ok(())
    }

    /// `(row_count, column_count)`. The column count is always the configured
    /// maximum, never the widest stored row.
    pub fn dimensions(&self) -> (usize, usize) {
        (self.rows.len(), self.config.max_columns)
    }

    /// Add up every field at `column` that parses as a number. Fields that do
    /// not parse are counted in [`ColumnSum::skipped`]; rows too short to have
    /// the column are ignored.
    pub fn sum_column(&self, column: usize) -> StoreResult<ColumnSum> {
        if column >= self.config.max_columns {
            return Err(StoreError::InvalidColumn {
                index: column,
                max: self.config.max_columns,
            });
        }

        let mut total = 0.0;
        let mut skipped = 0;
        for field in self.rows.iter().filter_map(|row| row.get(column)) {
            match field.trim().parse::<f64>() {
                Ok(value) => total += value,
                Err(_) => skipped += 1,
            }
        }

        if skipped > 0 {
            warn!(column, skipped, "non-numeric values skipped while summing");
        }

        Ok(ColumnSum {
            column,
            total,
            skipped,
        })
    }

    fn check_index(&self, index: usize) -> StoreResult<()> {
        if index < self.rows.len() {
            Ok(())
        } else {
            Err(StoreError::IndexOutOfRange {
                index,
                len: self.rows.len(),
            })
        }
    }
}
