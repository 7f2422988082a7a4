//! Read-only text views of the store. Short rows are padded here and only
//! here; stored and saved rows keep their original width.

use super::RowStore;

/// Header of the synthetic index column in pretty views.
pub const ROW_INDEX_HEADER: &str = "Row";

impl RowStore {
    /// One line per row, `line <index>: [fields]`.
    pub fn display_lines(&self) -> Vec<String> {
        self.rows
            .iter()
            .enumerate()
            .map(|(index, row)| format!("line {index}: {row:?}"))
            .collect()
    }

    /// Header cells of the pretty table: the index column then the headers.
    pub fn pretty_header(&self) -> Vec<String> {
        std::iter::once(ROW_INDEX_HEADER.to_string())
            .chain(self.config.column_headers.iter().cloned())
            .collect()
    }

    /// Table body: the row index followed by the row's fields, right-padded
    /// with empty strings to the configured column count.
    pub fn pretty_rows(&self) -> Vec<Vec<String>> {
        let width = self.config.max_columns;
        self.rows
            .iter()
            .enumerate()
            .map(|(index, row)| {
                let mut cells = Vec::with_capacity(width + 1);
                cells.push(index.to_string());
                cells.extend(row.iter().cloned());
                cells.resize(width + 1, String::new());
                cells
            })
            .collect()
    }

    /// Title, author and a boxed ASCII table of every row. Column widths count
    /// `char`s, so wide or combining characters leave the borders uneven.
    pub fn display_pretty(&self) -> String {
        if self.rows.is_empty() {
            return "The list is empty.".to_string();
        }

        let header = self.pretty_header();
        let body = self.pretty_rows();
        let widths: Vec<usize> = (0..header.len())
            .map(|col| {
                std::iter::once(&header)
                    .chain(body.iter())
                    .filter_map(|cells| cells.get(col))
                    .map(|cell| cell.chars().count())
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        let border = table_border(&widths);
        let mut out = format!("List Name: {}\nAuthor: {}\n", self.title, self.author);
        out.push_str(&border);
        out.push_str(&table_line(&header, &widths));
        out.push_str(&border);
        for cells in &body {
            out.push_str(&table_line(cells, &widths));
        }
        out.push_str(&border);
        out
    }
}

fn table_border(widths: &[usize]) -> String {
    let mut line = String::from("+");
    for width in widths {
        line.push_str(&"-".repeat(width + 2));
        line.push('+');
    }
    line.push('\n');
    line
}

fn table_line(cells: &[String], widths: &[usize]) -> String {
    let mut line = String::from("|");
    for (cell, width) in cells.iter().zip(widths) {
        let pad = width - cell.chars().count();
        line.push(' ');
        line.push_str(cell);
        line.push_str(&" ".repeat(pad + 1));
        line.push('|');
    }
    line.push('\n');
    line
}

#[cfg(test)]
mod tests {
    use crate::store::test_support::row;
    use crate::store::RowStore;

    #[test]
    fn display_lines_show_index_and_fields() {
        let mut store = RowStore::default();
        store.add(row(&["a", "b"]));
        store.add(row(&["c"]));
        assert_eq!(
            store.display_lines(),
            vec![r#"line 0: ["a", "b"]"#, r#"line 1: ["c"]"#]
        );
    }

    #[test]
    fn pretty_rows_pad_without_touching_storage() {
        let mut store = RowStore::default();
        store.add(row(&["2024-01-01", "Widget"]));

        let rows = store.pretty_rows();

        assert_eq!(rows[0], row(&["0", "2024-01-01", "Widget", "", "", ""]));
        assert_eq!(store.rows()[0].len(), 2);
    }

    #[test]
    fn pretty_table_includes_title_author_and_padded_cells() {
        let mut store = RowStore::default();
        store.set_title("Shop");
        store.set_author("Ana");
        store.add(row(&["2024-01-01", "Widget", "2"]));

        let text = store.display_pretty();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "List Name: Shop");
        assert_eq!(lines[1], "Author: Ana");
        assert_eq!(
            lines[2],
            "+-----+------------+---------+----------+-------+-------+"
        );
        assert_eq!(
            lines[3],
            "| Row | Date       | Product | Quantity | Price | Total |"
        );
        assert_eq!(
            lines[5],
            "| 0   | 2024-01-01 | Widget  | 2        |       |       |"
        );
        assert_eq!(lines.len(), 7);
    }

    #[test]
    fn accented_cells_are_measured_in_chars() {
        let mut store = RowStore::default();
        store.add(row(&["2024-01-01", "Crème brûlée"]));

        let text = store.display_pretty();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[3].chars().count(), lines[5].chars().count());
        assert!(lines[5].starts_with("| 0   | 2024-01-01 | Crème brûlée |"));
    }

    #[test]
    fn pretty_table_of_empty_list() {
        assert_eq!(RowStore::default().display_pretty(), "The list is empty.");
    }
}
