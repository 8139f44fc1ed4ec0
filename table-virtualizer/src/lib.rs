//! A headless row-windowing engine for large scrollable tables.
//!
//! For a headless host and an event-driving controller, see the `table-virtualizer-adapter`
//! crate.
//!
//! This crate maps a scroll position to the minimal set of rows worth materializing, keeps
//! that set in sync with viewport resizes, resolves the visible column layout, and keeps
//! keyboard focus on the same logical cell while rows are torn down and rebuilt.
//!
//! It is UI-agnostic. A presentation layer is expected to provide, through [`Host`]:
//! - element lookup by identifier, measurement and focus
//! - the scroll offset of the table's scroll container
//! - per-instance resize notifications
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod columns;
mod dataset;
mod focus;
pub mod geometry;
mod host;
mod key;
pub mod materializer;
mod options;
mod scroll;
mod table;
mod types;

#[cfg(test)]
mod tests;

pub use columns::{
    ColumnDefinition, ColumnType, VisibilityMap, VisibilityToggle, is_column_visible,
    resolve_columns, visibility_toggles,
};
pub use dataset::{Record, RowSource};
pub use focus::{
    FocusToken, FocusTracker, LayoutPart, TableInstanceId, element_id, part_element_id,
};
pub use geometry::compute_window;
pub use host::{Host, ResizeSubscription};
pub use key::KeyMap;
pub use materializer::{CellDescriptor, RowDescriptor, materialize};
pub use options::{OnChangeCallback, OnIntentCallback, RowIntent, TableOptions};
pub use scroll::{
    DEFAULT_FOCUS_RESTORE_DELAY_MS, DebounceTimer, ScrollEvent, ScrollMachine, ScrollPhase,
    ScrollSample, Transition, WindowParams,
};
pub use table::DataTable;
pub use types::{Align, Extent, Parity, Window};
