use alloc::format;
use alloc::string::String;
use core::fmt;
use core::sync::atomic::{AtomicU64, Ordering};

use crate::Host;

static NEXT_INSTANCE_ID: AtomicU64 = AtomicU64::new(1);

/// A process-unique identifier for one table mount.
///
/// Every derived element identifier is prefixed with it, so several tables can share one
/// display environment without colliding.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TableInstanceId(u64);

impl TableInstanceId {
    pub fn next() -> Self {
        Self(NEXT_INSTANCE_ID.fetch_add(1, Ordering::Relaxed))
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for TableInstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "tbl{:016x}", self.0)
    }
}

/// The structural elements of one table instance.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LayoutPart {
    /// The scroll container.
    Container,
    Table,
    Header,
    Body,
    Footer,
}

impl LayoutPart {
    pub const ALL: [Self; 5] = [
        Self::Container,
        Self::Table,
        Self::Header,
        Self::Body,
        Self::Footer,
    ];

    fn suffix(self) -> &'static str {
        match self {
            Self::Container => "container",
            Self::Table => "table",
            Self::Header => "header",
            Self::Body => "body",
            Self::Footer => "footer",
        }
    }
}

/// Identifier of a layout part of `instance`.
pub fn part_element_id(instance: TableInstanceId, part: LayoutPart) -> String {
    format!("{instance}-{}", part.suffix())
}

/// Identifier of the element hosting cell (`row_index`, `column_key`) of `instance`.
///
/// The same logical cell always maps to the same identifier, across any number of
/// re-renders.
pub fn element_id(instance: TableInstanceId, row_index: usize, column_key: &str) -> String {
    format!("{instance}-cell-{row_index}-{column_key}")
}

/// Logical address of a cell, independent of the element currently rendering it.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FocusToken {
    pub row_index: usize,
    pub column_key: String,
}

impl FocusToken {
    pub fn new(row_index: usize, column_key: impl Into<String>) -> Self {
        Self {
            row_index,
            column_key: column_key.into(),
        }
    }

    pub fn element_id(&self, instance: TableInstanceId) -> String {
        element_id(instance, self.row_index, &self.column_key)
    }

    /// Recovers the token from a cell identifier of `instance`.
    ///
    /// Returns `None` for identifiers of other instances and for non-cell identifiers.
    pub fn parse(instance: TableInstanceId, id: &str) -> Option<Self> {
        let prefix = format!("{instance}-cell-");
        let rest = id.strip_prefix(prefix.as_str())?;
        let (row, key) = rest.split_once('-')?;
        if key.is_empty() {
            return None;
        }
        Some(Self {
            row_index: row.parse().ok()?,
            column_key: key.into(),
        })
    }
}

/// Remembers the most recently focused cell element and puts focus back after a re-render.
///
/// Only the latest recorded identifier is kept; earlier ones are overwritten, never queued.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FocusTracker {
    last: Option<String>,
}

impl FocusTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Call whenever a cell-hosting element receives focus.
    pub fn record_focus(&mut self, element_id: &str) {
        match &mut self.last {
            Some(last) => {
                last.clear();
                last.push_str(element_id);
            }
            None => self.last = Some(element_id.into()),
        }
    }

    pub fn last_recorded(&self) -> Option<&str> {
        self.last.as_deref()
    }

    /// The recorded cell as a logical token, if it belongs to `instance`.
    pub fn token(&self, instance: TableInstanceId) -> Option<FocusToken> {
        FocusToken::parse(instance, self.last.as_deref()?)
    }

    pub fn clear(&mut self) {
        self.last = None;
    }

    /// Re-applies focus to the element with the last recorded identifier.
    ///
    /// Best effort: returns `false` without side effects when nothing was recorded or the
    /// element is not attached (e.g. its row scrolled out of the window).
    pub fn restore_focus<H: Host>(&self, host: &mut H) -> bool {
        let Some(id) = self.last.as_deref() else {
            return false;
        };
        match host.lookup(id) {
            Some(element) => {
                host.focus(&element);
                tdebug!(id, "restore_focus: focused");
                true
            }
            None => {
                tdebug!(id, "restore_focus: target not attached");
                false
            }
        }
    }
}
