use alloc::vec::Vec;

use crate::KeyMap;

/// One row record: column key → cell value.
pub type Record<V> = KeyMap<V>;

/// Read-only access to a caller-owned row snapshot.
///
/// The engine never mutates rows; a data change is expressed by handing the engine a new
/// snapshot (see [`crate::DataTable::set_rows`]).
pub trait RowSource {
    type Value;

    fn row_count(&self) -> usize;

    /// Returns the cell at (`row`, `column`), or `None` when the row is out of range or has
    /// no value for that column.
    fn cell(&self, row: usize, column: &str) -> Option<&Self::Value>;
}

impl<V> RowSource for [Record<V>] {
    type Value = V;

    fn row_count(&self) -> usize {
        self.len()
    }

    fn cell(&self, row: usize, column: &str) -> Option<&V> {
        self.get(row)?.get(column)
    }
}

impl<V> RowSource for Vec<Record<V>> {
    type Value = V;

    fn row_count(&self) -> usize {
        self.len()
    }

    fn cell(&self, row: usize, column: &str) -> Option<&V> {
        self.as_slice().cell(row, column)
    }
}
