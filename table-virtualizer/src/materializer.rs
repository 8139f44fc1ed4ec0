use alloc::vec::Vec;
use core::cmp;

use crate::{ColumnDefinition, ColumnType, Parity, RowSource, Window, geometry};

/// One cell of a materialized row: the raw value plus the column's type tag.
#[derive(Debug, PartialEq)]
pub struct CellDescriptor<'a, V> {
    pub key: &'a str,
    pub kind: ColumnType,
    pub value: Option<&'a V>,
}

impl<V> Clone for CellDescriptor<'_, V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<V> Copy for CellDescriptor<'_, V> {}

/// A row ready for the presentation layer.
#[derive(Clone, Debug, PartialEq)]
pub struct RowDescriptor<'a, V> {
    pub index: usize,
    /// Offset of the row's top edge from the top of the scroll body.
    pub absolute_top: u64,
    pub height: u32,
    pub parity: Parity,
    /// One entry per resolved column, in column order.
    pub cells: Vec<CellDescriptor<'a, V>>,
}

impl<V> RowDescriptor<'_, V> {
    pub fn bottom(&self) -> u64 {
        self.absolute_top.saturating_add(self.height as u64)
    }
}

/// Clamps `window` against the dataset it is about to index.
///
/// The geometry already clamps `end_index` to the row count it was computed for, but a
/// snapshot can be swapped between computing a window and materializing it.
pub fn clamp_window(window: Window, row_count: usize) -> (usize, usize) {
    if window.end_index > row_count {
        twarn!(
            end_index = window.end_index,
            row_count,
            "materialize: window exceeds row count"
        );
    }
    let end = cmp::min(window.end_index, row_count);
    let start = cmp::min(window.start_index, end);
    (start, end)
}

/// Emits one [`RowDescriptor`] per row in `[window.start_index, window.end_index)`.
///
/// Prefer this over [`materialize`] when the presentation layer paints rows as they come.
pub fn for_each_row<'a, D>(
    window: Window,
    rows: &'a D,
    columns: &[&'a ColumnDefinition],
    row_height: u32,
    mut f: impl FnMut(RowDescriptor<'a, D::Value>),
) where
    D: RowSource + ?Sized,
    D::Value: 'a,
{
    let (start, end) = clamp_window(window, rows.row_count());
    for index in start..end {
        let cells = columns
            .iter()
            .map(|c| CellDescriptor {
                key: c.key.as_str(),
                kind: c.kind,
                value: rows.cell(index, &c.key),
            })
            .collect();
        f(RowDescriptor {
            index,
            absolute_top: geometry::row_offset(index, row_height),
            height: row_height,
            parity: Parity::of(index),
            cells,
        });
    }
}

/// Produces the ordered row descriptors for `window`.
pub fn materialize<'a, D>(
    window: Window,
    rows: &'a D,
    columns: &[&'a ColumnDefinition],
    row_height: u32,
) -> Vec<RowDescriptor<'a, D::Value>>
where
    D: RowSource + ?Sized,
    D::Value: 'a,
{
    let mut out = Vec::with_capacity(window.len().min(rows.row_count()));
    for_each_row(window, rows, columns, row_height, |row| out.push(row));
    out
}
