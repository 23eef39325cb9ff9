//! Header-addressed view over raw store rows
//!
//! Columns are matched by exact trimmed header name, never by position,
//! so reordering columns in the backing store cannot break reads.

use crate::cell::CellValue;
use crate::row_store::{RowStore, StoreError};
use indexmap::IndexMap;

static EMPTY_CELL: CellValue = CellValue::Empty;

/// A store's rows with columns addressable by header name
#[derive(Debug, Clone)]
pub struct Table {
    name: String,
    columns: IndexMap<String, usize>,
    rows: Vec<Vec<CellValue>>,
}

impl Table {
    /// Build from raw rows; the first row is the header
    #[must_use]
    pub fn from_rows(name: impl Into<String>, mut raw: Vec<Vec<CellValue>>) -> Self {
        let header = if raw.is_empty() { Vec::new() } else { raw.remove(0) };
        let mut columns = IndexMap::new();
        for (idx, cell) in header.iter().enumerate() {
            let name = cell.to_trimmed_string();
            if !name.is_empty() {
                // First occurrence wins on duplicate headers
                columns.entry(name).or_insert(idx);
            }
        }
        Self {
            name: name.into(),
            columns,
            rows: raw,
        }
    }

    /// Load a store through the accessor and wrap it
    ///
    /// # Errors
    /// Propagates the store's read failure.
    pub fn load(store: &dyn RowStore, name: &str) -> Result<Self, StoreError> {
        let raw = store.get_rows(name)?;
        Ok(Self::from_rows(name, raw))
    }

    /// Column index for a header name
    #[must_use]
    pub fn column(&self, header: &str) -> Option<usize> {
        self.columns.get(header.trim()).copied()
    }

    /// Column index for a header name, as an error when missing
    ///
    /// # Errors
    /// [`StoreError::UnknownColumn`].
    pub fn require_column(&self, header: &str) -> Result<usize, StoreError> {
        self.column(header).ok_or_else(|| StoreError::UnknownColumn {
            store: self.name.clone(),
            column: header.to_string(),
        })
    }

    /// Number of data rows
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// True when there are no data rows
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Iterate data rows as header-addressed views
    pub fn iter(&self) -> impl Iterator<Item = RowView<'_>> {
        self.rows
            .iter()
            .enumerate()
            .map(move |(idx, cells)| RowView {
                table: self,
                cells,
                data_index: idx,
            })
    }
}

/// One data row, addressable by header name
#[derive(Debug, Clone, Copy)]
pub struct RowView<'a> {
    table: &'a Table,
    cells: &'a [CellValue],
    data_index: usize,
}

impl RowView<'_> {
    /// Cell under a header; [`CellValue::Empty`] when the column or cell
    /// is absent
    #[must_use]
    pub fn get(&self, header: &str) -> &CellValue {
        self.table
            .column(header)
            .and_then(|idx| self.cells.get(idx))
            .unwrap_or(&EMPTY_CELL)
    }

    /// Trimmed text under a header
    #[must_use]
    pub fn text(&self, header: &str) -> String {
        self.get(header).to_trimmed_string()
    }

    /// Trimmed text under a header, `None` when blank
    #[must_use]
    pub fn text_opt(&self, header: &str) -> Option<String> {
        let text = self.text(header);
        if text.is_empty() {
            None
        } else {
            Some(text)
        }
    }

    /// Row index in the underlying store (0-based, header row included),
    /// suitable for `set_cell`
    #[must_use]
    pub fn store_row_index(&self) -> usize {
        self.data_index + 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn table() -> Table {
        Table::from_rows(
            "personnel",
            vec![
                vec![" UPID ".into(), "Email".into(), "Task".into()],
                vec!["100-001".into(), "a@example.test".into(), CellValue::Empty],
                vec!["310-003".into(), "b@example.test".into(), "TASK-001".into()],
            ],
        )
    }

    #[test]
    fn headers_are_trimmed() {
        let t = table();
        assert_eq!(t.column("UPID"), Some(0));
        assert_eq!(t.column(" Email "), Some(1));
        assert_eq!(t.column("Missing"), None);
    }

    #[test]
    fn column_reordering_does_not_break_reads() {
        // Same data with Email first
        let reordered = Table::from_rows(
            "personnel",
            vec![
                vec!["Email".into(), "UPID".into()],
                vec!["a@example.test".into(), "100-001".into()],
            ],
        );
        let row = reordered.iter().next().unwrap();
        assert_eq!(row.text("UPID"), "100-001");
        assert_eq!(row.text("Email"), "a@example.test");
    }

    #[test]
    fn missing_cells_read_as_empty() {
        let t = Table::from_rows(
            "personnel",
            vec![
                vec!["UPID".into(), "Email".into()],
                vec!["100-001".into()], // short row
            ],
        );
        let row = t.iter().next().unwrap();
        assert!(row.get("Email").is_blank());
        assert_eq!(row.text_opt("Email"), None);
    }

    #[test]
    fn store_row_index_accounts_for_header() {
        let t = table();
        let indices: Vec<usize> = t.iter().map(|r| r.store_row_index()).collect();
        assert_eq!(indices, vec![1, 2]);
    }

    #[test]
    fn require_column_names_the_store() {
        let t = table();
        let err = t.require_column("Nope").unwrap_err();
        assert!(matches!(
            err,
            StoreError::UnknownColumn { ref store, ref column }
                if store == "personnel" && column == "Nope"
        ));
    }

    #[test]
    fn empty_table() {
        let t = Table::from_rows("x", vec![]);
        assert!(t.is_empty());
        assert_eq!(t.len(), 0);
        assert_eq!(t.column("anything"), None);
    }
}
