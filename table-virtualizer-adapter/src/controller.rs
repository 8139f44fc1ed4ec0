use alloc::sync::Arc;

use table_virtualizer::{
    Align, DataTable, FocusToken, LayoutPart, RowSource, TableInstanceId, Window,
};

use crate::{MemoryHost, TableLayout};

/// A framework-neutral controller that owns a [`DataTable`] and a [`MemoryHost`] and runs the
/// full event loop for one table: event → window → paint → focus restoration.
///
/// Adapters drive it by calling:
/// - `on_scroll` / `on_resize` when UI events occur
/// - `tick(now_ms)` on each frame or timer tick
/// - `click_cell` when the user focuses a cell
///
/// Every call that can change the window repaints the host's cell elements before returning,
/// so `host().focused()` and `table().window()` are always consistent.
#[derive(Debug)]
pub struct Controller<D: ?Sized> {
    table: DataTable<D>,
    host: MemoryHost,
    layout: TableLayout,
}

impl<D: RowSource + ?Sized> Controller<D> {
    pub fn new(table: DataTable<D>, layout: TableLayout) -> Self {
        Self::with_host(table, MemoryHost::new(), layout)
    }

    /// Uses an existing host, e.g. one shared by several tables through `into_parts`.
    pub fn with_host(table: DataTable<D>, mut host: MemoryHost, layout: TableLayout) -> Self {
        host.layout(&table, layout);
        Self {
            table,
            host,
            layout,
        }
    }

    pub fn table(&self) -> &DataTable<D> {
        &self.table
    }

    pub fn host(&self) -> &MemoryHost {
        &self.host
    }

    pub fn layout(&self) -> TableLayout {
        self.layout
    }

    pub fn id(&self) -> TableInstanceId {
        self.table.id()
    }

    pub fn window(&self) -> Window {
        self.table.window()
    }

    pub fn mount(&mut self, now_ms: u64) -> Window {
        let container = self.table.part_element_id(LayoutPart::Container);
        self.host.scroll_element(&container, 0);
        let window = self.table.mount(&mut self.host, now_ms);
        self.host.paint(&self.table);
        window
    }

    /// Releases the table's subscription, cancels pending work, and detaches its elements.
    pub fn unmount(&mut self) {
        self.table.unmount(&mut self.host);
        self.host.clear(&self.table);
    }

    /// Call this when the UI reports a new scroll offset (e.g. wheel/drag).
    ///
    /// Ignored once the table is unmounted.
    pub fn on_scroll(&mut self, scroll_offset: u64, now_ms: u64) -> Window {
        if !self.table.is_mounted() {
            return self.table.window();
        }
        let container = self.table.part_element_id(LayoutPart::Container);
        self.host.scroll_element(&container, scroll_offset);
        let window = self.table.on_scroll(&mut self.host, now_ms);
        self.host.paint(&self.table);
        window
    }

    /// Call this when the environment's size changes.
    ///
    /// The table is only notified while it holds a resize subscription (i.e. while mounted).
    pub fn on_resize(&mut self, layout: TableLayout, now_ms: u64) -> Window {
        self.layout = layout;
        self.host.layout(&self.table, layout);
        if !self.host.is_subscribed(self.table.id()) {
            return self.table.window();
        }
        let window = self.table.on_resize(&mut self.host, now_ms);
        self.host.paint(&self.table);
        window
    }

    /// Advances the focus-restoration timer. Returns `true` when focus was restored.
    pub fn tick(&mut self, now_ms: u64) -> bool {
        self.table.tick(&mut self.host, now_ms)
    }

    /// Focuses a cell as if the user clicked it. Returns `false` if it is not rendered.
    pub fn click_cell(&mut self, row_index: usize, column_key: &str) -> bool {
        self.table.focus_cell(&mut self.host, row_index, column_key)
    }

    pub fn focused_cell(&self) -> Option<FocusToken> {
        self.table.focused_cell()
    }

    /// Scrolls the focused cell's row back into view and focuses it again.
    ///
    /// Returns the applied scroll offset, or `None` when no cell of this table is focused.
    pub fn reveal_focused(&mut self, align: Align, now_ms: u64) -> Option<u64> {
        let token = self.table.focused_cell()?;
        let offset = self
            .table
            .scroll_to_row(&mut self.host, token.row_index, align, now_ms);
        self.host.paint(&self.table);
        self.table.restore_focus(&mut self.host);
        Some(offset)
    }

    /// Replaces the row snapshot, keeping the scroll offset and focus.
    pub fn set_rows(&mut self, rows: Arc<D>) -> Window {
        self.table.set_rows(rows);
        self.host.layout(&self.table, self.layout);
        self.host.paint(&self.table);
        self.table.window()
    }

    pub fn set_column_visible(&mut self, key: &str, visible: bool) -> bool {
        let changed = self.table.set_column_visible(key, visible);
        if changed {
            self.host.paint(&self.table);
        }
        changed
    }

    pub fn scroll_to_top(&mut self, now_ms: u64) -> Window {
        let window = self.table.scroll_to_top(&mut self.host, now_ms);
        self.host.paint(&self.table);
        window
    }

    /// Unmounts the table and hands back both halves.
    pub fn into_parts(mut self) -> (DataTable<D>, MemoryHost) {
        self.unmount();
        (self.table, self.host)
    }
}
