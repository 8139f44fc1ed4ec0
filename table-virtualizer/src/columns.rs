use alloc::string::String;
use alloc::vec::Vec;

use crate::KeyMap;

/// How a column's cells are edited by the presentation layer.
///
/// The engine never interprets this; it is passed through on every materialized cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ColumnType {
    #[default]
    Plain,
    Combo,
    Date,
}

/// A caller-owned column definition.
///
/// Columns without a `label` are structural: they never appear on the visibility toggle
/// surface and ignore [`VisibilityMap`] overrides.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ColumnDefinition {
    pub key: String,
    pub label: Option<String>,
    pub kind: ColumnType,
    pub hidden: bool,
}

impl ColumnDefinition {
    /// A visible, labeled, plain column.
    pub fn new(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: Some(label.into()),
            kind: ColumnType::Plain,
            hidden: false,
        }
    }

    /// A column without a display label.
    pub fn structural(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: None,
            kind: ColumnType::Plain,
            hidden: false,
        }
    }

    pub fn with_kind(mut self, kind: ColumnType) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_hidden(mut self, hidden: bool) -> Self {
        self.hidden = hidden;
        self
    }

    pub fn is_toggleable(&self) -> bool {
        self.label.is_some()
    }
}

/// Runtime show/hide overrides keyed by column key.
pub type VisibilityMap = KeyMap<bool>;

/// One entry of the visibility toggle surface.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VisibilityToggle {
    pub key: String,
    pub label: String,
    pub visible: bool,
}

/// Resolved visibility of one column: the map override for labeled columns, else the
/// definition's default.
pub fn is_column_visible(column: &ColumnDefinition, visibility: &VisibilityMap) -> bool {
    if column.is_toggleable() {
        if let Some(&visible) = visibility.get(&column.key) {
            return visible;
        }
    }
    !column.hidden
}

/// Derives the ordered set of visible columns, preserving definition order.
pub fn resolve_columns<'a>(
    definitions: &'a [ColumnDefinition],
    visibility: &VisibilityMap,
) -> Vec<&'a ColumnDefinition> {
    definitions
        .iter()
        .filter(|c| is_column_visible(c, visibility))
        .collect()
}

/// Same as [`resolve_columns`], but yields positions into `definitions`.
pub fn resolve_column_indexes(
    definitions: &[ColumnDefinition],
    visibility: &VisibilityMap,
) -> Vec<usize> {
    definitions
        .iter()
        .enumerate()
        .filter(|(_, c)| is_column_visible(c, visibility))
        .map(|(i, _)| i)
        .collect()
}

/// Lists every labeled column with its resolved visibility, in definition order.
pub fn visibility_toggles(
    definitions: &[ColumnDefinition],
    visibility: &VisibilityMap,
) -> Vec<VisibilityToggle> {
    definitions
        .iter()
        .filter_map(|c| {
            let label = c.label.as_ref()?;
            Some(VisibilityToggle {
                key: c.key.clone(),
                label: label.clone(),
                visible: is_column_visible(c, visibility),
            })
        })
        .collect()
}
