//! Row store seam and its in-memory implementation
//!
//! The data layer talks to its backing spreadsheet through [`RowStore`]:
//! whole-table reads plus append/set-cell writes. The host environment
//! serializes writers; this layer adds no locking of its own beyond the
//! in-memory double's internal consistency.

use crate::cell::CellValue;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};

/// Well-known store (sheet) names
pub mod stores {
    /// Personnel roster
    pub const PERSONNEL: &str = "personnel";
    /// Team/task taxonomy
    pub const TEAM_MAPPINGS: &str = "team_mappings";
    /// Task display metadata
    pub const TASK_METADATA: &str = "task_metadata";
    /// Never-filled vacancies
    pub const VACANT_POSITIONS: &str = "vacant_positions";
}

/// Failures raised by collaborators
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// Backing store unreachable or misconfigured
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// Named store does not exist
    #[error("unknown store {0:?}")]
    UnknownStore(String),

    /// Header row lacks an expected column
    #[error("unknown column {column:?} in store {store:?}")]
    UnknownColumn {
        /// Store name
        store: String,
        /// Missing column header
        column: String,
    },

    /// Row index past the end of the store
    #[error("row {row} out of range for store {store:?}")]
    RowOutOfRange {
        /// Store name
        store: String,
        /// Offending row index
        row: usize,
    },

    /// Caller lacks the capability for a write
    #[error("permission denied for {action}")]
    PermissionDenied {
        /// Attempted action
        action: String,
    },
}

/// Row-oriented backing store
///
/// `get_rows` returns the full table including the header row; writes are
/// append-row or single-cell granularity. Implementations must match
/// columns by header name, never by fixed position.
pub trait RowStore: Send + Sync {
    /// All rows of a store, header row first
    ///
    /// # Errors
    /// [`StoreError::UnknownStore`] or [`StoreError::Unavailable`].
    fn get_rows(&self, store: &str) -> Result<Vec<Vec<CellValue>>, StoreError>;

    /// Append one row
    ///
    /// # Errors
    /// [`StoreError::UnknownStore`] or [`StoreError::Unavailable`].
    fn append_row(&self, store: &str, row: Vec<CellValue>) -> Result<(), StoreError>;

    /// Overwrite a single cell; `row` is 0-based including the header row
    ///
    /// # Errors
    /// [`StoreError::RowOutOfRange`] when the row does not exist.
    fn set_cell(
        &self,
        store: &str,
        row: usize,
        col: usize,
        value: CellValue,
    ) -> Result<(), StoreError>;
}

/// In-memory [`RowStore`]
///
/// The test double for the spreadsheet backend, and the reference
/// implementation a production adapter mirrors. `fail_reads` simulates an
/// unreachable backend for fail-soft tests.
#[derive(Debug, Default)]
pub struct InMemoryRowStore {
    tables: RwLock<HashMap<String, Vec<Vec<CellValue>>>>,
    fail_reads: AtomicBool,
}

impl InMemoryRowStore {
    /// Empty store
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed (or replace) a table, header row first
    pub fn insert_table(&self, name: impl Into<String>, rows: Vec<Vec<CellValue>>) {
        self.tables.write().insert(name.into(), rows);
    }

    /// Builder form of [`InMemoryRowStore::insert_table`]
    #[must_use]
    pub fn with_table(self, name: impl Into<String>, rows: Vec<Vec<CellValue>>) -> Self {
        self.insert_table(name, rows);
        self
    }

    /// Make every subsequent read fail as unavailable
    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    /// Number of data rows (excluding the header) in a table
    #[must_use]
    pub fn row_count(&self, store: &str) -> usize {
        self.tables
            .read()
            .get(store)
            .map_or(0, |rows| rows.len().saturating_sub(1))
    }
}

impl RowStore for InMemoryRowStore {
    fn get_rows(&self, store: &str) -> Result<Vec<Vec<CellValue>>, StoreError> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("simulated outage".to_string()));
        }
        self.tables
            .read()
            .get(store)
            .cloned()
            .ok_or_else(|| StoreError::UnknownStore(store.to_string()))
    }

    fn append_row(&self, store: &str, row: Vec<CellValue>) -> Result<(), StoreError> {
        let mut tables = self.tables.write();
        let rows = tables
            .get_mut(store)
            .ok_or_else(|| StoreError::UnknownStore(store.to_string()))?;
        rows.push(row);
        Ok(())
    }

    fn set_cell(
        &self,
        store: &str,
        row: usize,
        col: usize,
        value: CellValue,
    ) -> Result<(), StoreError> {
        let mut tables = self.tables.write();
        let rows = tables
            .get_mut(store)
            .ok_or_else(|| StoreError::UnknownStore(store.to_string()))?;
        let target = rows.get_mut(row).ok_or(StoreError::RowOutOfRange {
            store: store.to_string(),
            row,
        })?;
        if col >= target.len() {
            target.resize(col + 1, CellValue::Empty);
        }
        target[col] = value;
        Ok(())
    }
}
