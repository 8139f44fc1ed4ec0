use alloc::string::String;
use alloc::vec::Vec;

use table_virtualizer::{
    DataTable, Extent, Host, KeyMap, LayoutPart, ResizeSubscription, RowSource, TableInstanceId,
};

/// Size of a table's chrome: the scroll container plus its header and footer rows.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TableLayout {
    pub container: Extent,
    pub header_height: u32,
    pub footer_height: u32,
}

impl TableLayout {
    pub fn new(container: Extent, header_height: u32, footer_height: u32) -> Self {
        Self {
            container,
            header_height,
            footer_height,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
struct Node {
    extent: Extent,
    scroll_top: u64,
}

/// An in-memory display environment.
///
/// Elements are plain identifier → geometry entries. This is what a TUI (or a test) needs to
/// drive a [`DataTable`] without a real display tree: `layout` attaches a table's structural
/// parts, `paint` rebuilds its cell elements from the current window, and focus follows
/// identifiers the same way a browser's would (it is dropped when the element detaches).
#[derive(Clone, Debug, Default)]
pub struct MemoryHost {
    elements: KeyMap<Node>,
    focused: Option<String>,
    next_subscription: u64,
    subscriptions: Vec<(ResizeSubscription, TableInstanceId)>,
}

impl MemoryHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn attach(&mut self, id: impl Into<String>, extent: Extent) {
        let node = self.elements.entry(id.into()).or_default();
        node.extent = extent;
    }

    pub fn detach(&mut self, id: &str) -> bool {
        if self.elements.remove(id).is_none() {
            return false;
        }
        if self.focused.as_deref() == Some(id) {
            self.focused = None;
        }
        true
    }

    pub fn is_attached(&self, id: &str) -> bool {
        self.elements.contains_key(id)
    }

    pub fn element_count(&self) -> usize {
        self.elements.len()
    }

    /// Sets the scroll offset of an attached element. Returns `false` if it is not attached.
    pub fn scroll_element(&mut self, id: &str, offset: u64) -> bool {
        match self.elements.get_mut(id) {
            Some(node) => {
                node.scroll_top = offset;
                true
            }
            None => false,
        }
    }

    pub fn focused(&self) -> Option<&str> {
        self.focused.as_deref()
    }

    pub fn blur(&mut self) {
        self.focused = None;
    }

    pub fn subscriptions(&self) -> &[(ResizeSubscription, TableInstanceId)] {
        &self.subscriptions
    }

    pub fn is_subscribed(&self, instance: TableInstanceId) -> bool {
        self.subscriptions.iter().any(|(_, i)| *i == instance)
    }

    /// The instances to notify for an environment-wide resize, in subscription order.
    pub fn resize_targets(&self) -> Vec<TableInstanceId> {
        self.subscriptions.iter().map(|(_, i)| *i).collect()
    }

    /// Attaches (or re-measures) the structural parts of `table`.
    pub fn layout<D: RowSource + ?Sized>(&mut self, table: &DataTable<D>, layout: TableLayout) {
        let width = layout.container.width;
        self.attach(table.part_element_id(LayoutPart::Container), layout.container);
        self.attach(
            table.part_element_id(LayoutPart::Table),
            Extent::new(0, width),
        );
        self.attach(
            table.part_element_id(LayoutPart::Header),
            Extent::new(layout.header_height, width),
        );
        let body = table.content_height().min(u32::MAX as u64) as u32;
        self.attach(
            table.part_element_id(LayoutPart::Body),
            Extent::new(body, width),
        );
        self.attach(
            table.part_element_id(LayoutPart::Footer),
            Extent::new(layout.footer_height, width),
        );
    }

    /// Detaches every element that belongs to `table`.
    pub fn clear<D: RowSource + ?Sized>(&mut self, table: &DataTable<D>) {
        let prefix = alloc::format!("{}-", table.id());
        self.retain(|id| !id.starts_with(&prefix));
    }

    /// Rebuilds the cell elements of `table` from its current window.
    ///
    /// Returns the number of cell elements attached.
    pub fn paint<D: RowSource + ?Sized>(&mut self, table: &DataTable<D>) -> usize {
        let prefix = alloc::format!("{}-cell-", table.id());
        self.retain(|id| !id.starts_with(&prefix));

        let width = table.viewport().width;
        let mut cells = Vec::new();
        table.for_each_row(|row| {
            for cell in &row.cells {
                cells.push((table.cell_element_id(row.index, cell.key), row.height));
            }
        });
        let n = cells.len();
        for (id, height) in cells {
            self.attach(id, Extent::new(height, width));
        }
        n
    }

    fn retain(&mut self, mut keep: impl FnMut(&str) -> bool) {
        self.elements.retain(|id, _| keep(id));
        if let Some(focused) = &self.focused {
            if !self.elements.contains_key(focused.as_str()) {
                self.focused = None;
            }
        }
    }
}

impl Host for MemoryHost {
    type Element = String;

    fn lookup(&self, id: &str) -> Option<String> {
        self.elements.contains_key(id).then(|| id.into())
    }

    fn measure(&self, element: &String) -> Extent {
        self.elements
            .get(element.as_str())
            .map(|n| n.extent)
            .unwrap_or_default()
    }

    fn focus(&mut self, element: &String) {
        if self.elements.contains_key(element.as_str()) {
            self.focused = Some(element.clone());
        }
    }

    fn scroll_top(&self, element: &String) -> u64 {
        self.elements
            .get(element.as_str())
            .map(|n| n.scroll_top)
            .unwrap_or(0)
    }

    fn set_scroll_top(&mut self, element: &String, offset: u64) {
        self.scroll_element(element, offset);
    }

    fn subscribe_resize(&mut self, instance: TableInstanceId) -> ResizeSubscription {
        self.next_subscription = self.next_subscription.saturating_add(1);
        let subscription = ResizeSubscription(self.next_subscription);
        self.subscriptions.push((subscription, instance));
        subscription
    }

    fn release_resize(&mut self, subscription: ResizeSubscription) {
        self.subscriptions.retain(|(s, _)| *s != subscription);
    }
}
