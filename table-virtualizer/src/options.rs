use alloc::string::String;
use alloc::sync::Arc;

use crate::scroll::DEFAULT_FOCUS_RESTORE_DELAY_MS;
use crate::{ScrollPhase, Window};

/// A callback fired whenever the materialized window changes.
pub type OnChangeCallback = Arc<dyn Fn(Window, ScrollPhase) + Send + Sync>;

/// A callback receiving add/edit/delete intents from the presentation layer.
pub type OnIntentCallback = Arc<dyn Fn(&RowIntent) + Send + Sync>;

/// An application-level request concerning a row. Passed through untouched.
///
/// `Edit::value` is the editor's raw text. Parsing it into the dataset's value type is
/// left to whoever handles the intent, since the engine never writes to the rows.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RowIntent {
    Add,
    Edit {
        row: usize,
        column: String,
        value: String,
    },
    Delete {
        row: usize,
    },
}

/// Configuration for [`crate::DataTable`].
///
/// Cheap to clone: callbacks are stored in `Arc`s.
#[derive(Clone)]
pub struct TableOptions {
    /// Fixed height of every row, in pixels.
    pub row_height: u32,
    /// Over-scan padding as a multiple of the viewport height, added on both ends.
    pub overscan_factor: f32,
    /// Quiet period after the last scroll/resize event before focus is restored.
    pub focus_restore_delay_ms: u64,
    pub on_change: Option<OnChangeCallback>,
    pub on_intent: Option<OnIntentCallback>,
}

impl Default for TableOptions {
    fn default() -> Self {
        Self::new(30)
    }
}

impl TableOptions {
    pub fn new(row_height: u32) -> Self {
        Self {
            row_height,
            overscan_factor: 1.0,
            focus_restore_delay_ms: DEFAULT_FOCUS_RESTORE_DELAY_MS,
            on_change: None,
            on_intent: None,
        }
    }

    pub fn with_row_height(mut self, row_height: u32) -> Self {
        self.row_height = row_height;
        self
    }

    pub fn with_overscan_factor(mut self, overscan_factor: f32) -> Self {
        self.overscan_factor = overscan_factor;
        self
    }

    pub fn with_focus_restore_delay_ms(mut self, delay_ms: u64) -> Self {
        self.focus_restore_delay_ms = delay_ms;
        self
    }

    pub fn with_on_change(
        mut self,
        on_change: Option<impl Fn(Window, ScrollPhase) + Send + Sync + 'static>,
    ) -> Self {
        self.on_change = on_change.map(|f| Arc::new(f) as _);
        self
    }

    pub fn with_on_intent(
        mut self,
        on_intent: Option<impl Fn(&RowIntent) + Send + Sync + 'static>,
    ) -> Self {
        self.on_intent = on_intent.map(|f| Arc::new(f) as _);
        self
    }
}

impl core::fmt::Debug for TableOptions {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("TableOptions")
            .field("row_height", &self.row_height)
            .field("overscan_factor", &self.overscan_factor)
            .field("focus_restore_delay_ms", &self.focus_restore_delay_ms)
            .field("on_change", &self.on_change.is_some())
            .field("on_intent", &self.on_intent.is_some())
            .finish()
    }
}
