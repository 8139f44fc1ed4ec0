use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;

use crate::columns::{is_column_visible, resolve_column_indexes, visibility_toggles};
use crate::focus::{element_id, part_element_id};
use crate::scroll::{ScrollEvent, ScrollSample, WindowParams};
use crate::{
    Align, ColumnDefinition, Extent, FocusToken, FocusTracker, Host, LayoutPart,
    ResizeSubscription, RowDescriptor, RowIntent, RowSource, ScrollMachine, ScrollPhase,
    TableInstanceId, TableOptions, VisibilityMap, VisibilityToggle, Window, geometry, materializer,
};

/// One mounted table: the window, column layout and focus state of a single instance.
///
/// This type holds no UI objects. The presentation layer drives it:
/// - `mount` once, before the first paint of row content
/// - `on_scroll` / `on_resize` when the host reports those events
/// - `tick(now_ms)` on a timer so the post-scroll focus restoration can run
/// - `record_focus` whenever a cell element gains focus
/// - `unmount` when the table goes away
///
/// Row data and column definitions are immutable snapshots; replace them wholesale with
/// [`DataTable::set_rows`] / [`DataTable::set_columns`].
pub struct DataTable<D: ?Sized> {
    id: TableInstanceId,
    options: TableOptions,
    rows: Arc<D>,
    columns: Arc<[ColumnDefinition]>,
    visibility: VisibilityMap,
    visible_columns: Vec<usize>,
    scroll: ScrollMachine,
    focus: FocusTracker,
    table_width: u32,
    resize: Option<ResizeSubscription>,
}

impl<D: RowSource + ?Sized> DataTable<D> {
    pub fn new(
        rows: Arc<D>,
        columns: impl Into<Arc<[ColumnDefinition]>>,
        options: TableOptions,
    ) -> Self {
        let columns = columns.into();
        let visibility = VisibilityMap::default();
        let visible_columns = resolve_column_indexes(&columns, &visibility);
        Self {
            id: TableInstanceId::next(),
            scroll: ScrollMachine::new(options.focus_restore_delay_ms),
            options,
            rows,
            columns,
            visibility,
            visible_columns,
            focus: FocusTracker::new(),
            table_width: 0,
            resize: None,
        }
    }

    pub fn id(&self) -> TableInstanceId {
        self.id
    }

    pub fn options(&self) -> &TableOptions {
        &self.options
    }

    pub fn set_options(&mut self, options: TableOptions) {
        self.options = options;
        self.scroll
            .set_focus_restore_delay_ms(self.options.focus_restore_delay_ms);
        let params = self.params();
        let changed = self.scroll.recompute(&params);
        self.notify(changed);
    }

    pub fn rows(&self) -> &Arc<D> {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.row_count()
    }

    pub fn row_height(&self) -> u32 {
        self.options.row_height
    }

    /// Height the scroll body must have so the host scrollbar spans every row.
    pub fn content_height(&self) -> u64 {
        geometry::content_height(self.row_count(), self.options.row_height)
    }

    pub fn window(&self) -> Window {
        self.scroll.window()
    }

    pub fn phase(&self) -> ScrollPhase {
        self.scroll.phase()
    }

    pub fn is_scrolling(&self) -> bool {
        self.scroll.phase() == ScrollPhase::Scrolling
    }

    pub fn is_mounted(&self) -> bool {
        self.resize.is_some()
    }

    /// Scroll offset of the last applied event.
    pub fn scroll_offset(&self) -> u64 {
        self.scroll.sample().scroll_top
    }

    /// Visible body height (container minus header and footer) and table width, as of the
    /// last applied event.
    pub fn viewport(&self) -> Extent {
        Extent {
            height: self.scroll.sample().viewport.height,
            width: self.table_width,
        }
    }

    pub fn cell_element_id(&self, row_index: usize, column_key: &str) -> String {
        element_id(self.id, row_index, column_key)
    }

    pub fn part_element_id(&self, part: LayoutPart) -> String {
        part_element_id(self.id, part)
    }

    /// Registers the per-instance resize subscription and establishes the initial window
    /// with a synthetic scroll event at offset 0.
    ///
    /// Mounting again resets the window and the recorded focus.
    pub fn mount<H: Host>(&mut self, host: &mut H, now_ms: u64) -> Window {
        if let Some(sub) = self.resize.take() {
            host.release_resize(sub);
        }
        self.resize = Some(host.subscribe_resize(self.id));
        self.focus.clear();
        tdebug!(
            instance = self.id.get(),
            rows = self.row_count(),
            columns = self.columns.len(),
            "mount"
        );
        let sample = self.sample(host, Some(0));
        self.apply(ScrollEvent::Scroll(sample), now_ms)
    }

    /// Cancels any pending focus restoration and releases the resize subscription.
    pub fn unmount<H: Host>(&mut self, host: &mut H) {
        let params = self.params();
        self.scroll.handle(ScrollEvent::Cancel, &params, 0);
        if let Some(sub) = self.resize.take() {
            host.release_resize(sub);
        }
        tdebug!(instance = self.id.get(), "unmount");
    }

    /// Handles a scroll notification: reads the offset and viewport from the host and
    /// recomputes the window before returning.
    ///
    /// Events reaching an unmounted table are ignored and the last window is returned.
    pub fn on_scroll<H: Host>(&mut self, host: &mut H, now_ms: u64) -> Window {
        let sample = self.sample(host, None);
        self.apply(ScrollEvent::Scroll(sample), now_ms)
    }

    /// Handles a resize notification. Recomputes even if the scroll offset is unchanged.
    pub fn on_resize<H: Host>(&mut self, host: &mut H, now_ms: u64) -> Window {
        let sample = self.sample(host, None);
        self.apply(ScrollEvent::Resize(sample), now_ms)
    }

    /// Advances the debounce timer; restores focus when the quiet period has elapsed.
    ///
    /// Returns `true` when focus was put back on an element.
    pub fn tick<H: Host>(&mut self, host: &mut H, now_ms: u64) -> bool {
        if !self.is_mounted() {
            return false;
        }
        let params = self.params();
        let t = self.scroll.handle(ScrollEvent::Tick, &params, now_ms);
        if !t.restore_focus {
            return false;
        }
        self.focus.restore_focus(host)
    }

    /// The next instant `tick` has work to do, if any.
    pub fn next_deadline_ms(&self) -> Option<u64> {
        self.scroll.timer().deadline_ms()
    }

    /// Records that the element with `element_id` received focus.
    pub fn record_focus(&mut self, element_id: &str) {
        self.focus.record_focus(element_id);
    }

    /// Records and immediately focuses cell (`row_index`, `column_key`).
    ///
    /// Returns `false` if the cell element is not attached.
    pub fn focus_cell<H: Host>(&mut self, host: &mut H, row_index: usize, column_key: &str) -> bool {
        let id = self.cell_element_id(row_index, column_key);
        self.focus.record_focus(&id);
        self.focus.restore_focus(host)
    }

    /// Puts focus back on the last recorded cell, if it is attached.
    pub fn restore_focus<H: Host>(&self, host: &mut H) -> bool {
        self.focus.restore_focus(host)
    }

    pub fn focused_element_id(&self) -> Option<&str> {
        self.focus.last_recorded()
    }

    /// The logical cell of the last recorded focus, if it is a cell of this table.
    pub fn focused_cell(&self) -> Option<FocusToken> {
        self.focus.token(self.id)
    }

    pub fn columns(&self) -> &[ColumnDefinition] {
        &self.columns
    }

    /// The ordered visible columns.
    pub fn visible_columns(&self) -> Vec<&ColumnDefinition> {
        self.visible_columns
            .iter()
            .map(|&i| &self.columns[i])
            .collect()
    }

    pub fn visibility(&self) -> &VisibilityMap {
        &self.visibility
    }

    pub fn visibility_toggles(&self) -> Vec<VisibilityToggle> {
        visibility_toggles(&self.columns, &self.visibility)
    }

    pub fn is_column_visible(&self, key: &str) -> bool {
        self.columns
            .iter()
            .find(|c| c.key == key)
            .is_some_and(|c| is_column_visible(c, &self.visibility))
    }

    /// Overrides the visibility of a labeled column.
    ///
    /// Returns `false` (and changes nothing) for unknown or unlabeled columns.
    pub fn set_column_visible(&mut self, key: &str, visible: bool) -> bool {
        let toggleable = self
            .columns
            .iter()
            .any(|c| c.key == key && c.is_toggleable());
        if !toggleable {
            twarn!(key, "set_column_visible: column is not toggleable");
            return false;
        }
        self.visibility.insert(key.into(), visible);
        self.resolve_columns();
        true
    }

    pub fn toggle_column(&mut self, key: &str) -> bool {
        let visible = self.is_column_visible(key);
        self.set_column_visible(key, !visible)
    }

    /// Drops every visibility override, falling back to the definitions' hidden flags.
    pub fn clear_visibility_overrides(&mut self) {
        self.visibility.clear();
        self.resolve_columns();
    }

    /// Replaces the row snapshot and re-clamps the window against the new row count.
    ///
    /// The scroll offset and recorded focus are kept.
    pub fn set_rows(&mut self, rows: Arc<D>) {
        self.rows = rows;
        tdebug!(rows = self.row_count(), "set_rows");
        let params = self.params();
        let changed = self.scroll.recompute(&params);
        self.notify(changed);
    }

    /// Replaces the column definitions. Visibility overrides stay keyed by column key.
    pub fn set_columns(&mut self, columns: impl Into<Arc<[ColumnDefinition]>>) {
        self.columns = columns.into();
        tdebug!(columns = self.columns.len(), "set_columns");
        self.resolve_columns();
    }

    /// Scrolls the host back to offset 0 and forgets the recorded focus.
    pub fn scroll_to_top<H: Host>(&mut self, host: &mut H, now_ms: u64) -> Window {
        self.focus.clear();
        self.scroll_host_to(host, 0, now_ms)
    }

    /// Offset that brings row `index` into view with `align`, from the current position.
    pub fn scroll_to_row_offset(&self, index: usize, align: Align) -> u64 {
        geometry::scroll_to_row_offset(
            index,
            align,
            self.scroll_offset(),
            self.options.row_height,
            self.row_count(),
            self.viewport().height,
        )
    }

    /// Moves the host's scroll position so row `index` is in view, then applies it as a
    /// scroll event.
    ///
    /// Returns the applied (clamped) offset.
    pub fn scroll_to_row<H: Host>(
        &mut self,
        host: &mut H,
        index: usize,
        align: Align,
        now_ms: u64,
    ) -> u64 {
        let offset = self.scroll_to_row_offset(index, align);
        self.scroll_host_to(host, offset, now_ms);
        self.scroll_offset()
    }

    /// Emits the descriptors of the rows in the current window, in order.
    pub fn for_each_row<'a>(&'a self, f: impl FnMut(RowDescriptor<'a, D::Value>))
    where
        D::Value: 'a,
    {
        let columns = self.visible_columns();
        materializer::for_each_row(
            self.window(),
            &*self.rows,
            &columns,
            self.options.row_height,
            f,
        );
    }

    /// Collects the descriptors of the rows in the current window.
    pub fn materialize<'a>(&'a self) -> Vec<RowDescriptor<'a, D::Value>>
    where
        D::Value: 'a,
    {
        let columns = self.visible_columns();
        materializer::materialize(self.window(), &*self.rows, &columns, self.options.row_height)
    }

    pub fn request_add(&self) {
        self.emit_intent(RowIntent::Add);
    }

    pub fn request_edit(&self, row: usize, column: impl Into<String>, value: impl Into<String>) {
        self.emit_intent(RowIntent::Edit {
            row,
            column: column.into(),
            value: value.into(),
        });
    }

    pub fn request_delete(&self, row: usize) {
        self.emit_intent(RowIntent::Delete { row });
    }

    fn emit_intent(&self, intent: RowIntent) {
        if let Some(cb) = &self.options.on_intent {
            cb(&intent);
        }
    }

    /// The host may clamp `offset`; the window follows whatever the container reports back.
    fn scroll_host_to<H: Host>(&mut self, host: &mut H, offset: u64, now_ms: u64) -> Window {
        if !self.is_mounted() {
            return self.scroll.window();
        }
        let container = self.part_element_id(LayoutPart::Container);
        let fallback = match host.lookup(&container) {
            Some(el) => {
                host.set_scroll_top(&el, offset);
                None
            }
            None => Some(offset),
        };
        let sample = self.sample(host, fallback);
        self.apply(ScrollEvent::Scroll(sample), now_ms)
    }

    fn params(&self) -> WindowParams {
        if self.options.row_height == 0 {
            twarn!("row_height is 0; window is empty");
        }
        WindowParams {
            row_height: self.options.row_height,
            row_count: self.row_count(),
            overscan_factor: self.options.overscan_factor,
        }
    }

    /// Reads scroll offset and viewport geometry from the host. Parts that are not attached
    /// measure as zero.
    fn sample<H: Host>(&mut self, host: &H, scroll_top: Option<u64>) -> ScrollSample {
        let id = self.id;
        let measure = |part: LayoutPart| {
            host.lookup(&part_element_id(id, part))
                .map(|el| host.measure(&el))
                .unwrap_or(Extent::ZERO)
        };
        let container = host.lookup(&part_element_id(id, LayoutPart::Container));
        let container_extent = container
            .as_ref()
            .map(|el| host.measure(el))
            .unwrap_or(Extent::ZERO);
        let scroll_top = scroll_top.unwrap_or_else(|| {
            container
                .as_ref()
                .map(|el| host.scroll_top(el))
                .unwrap_or(0)
        });
        let height = container_extent
            .height
            .saturating_sub(measure(LayoutPart::Header).height)
            .saturating_sub(measure(LayoutPart::Footer).height);
        self.table_width = measure(LayoutPart::Table).width;

        ScrollSample {
            scroll_top,
            viewport: Extent {
                height,
                width: container_extent.width,
            },
        }
    }

    fn apply(&mut self, event: ScrollEvent, now_ms: u64) -> Window {
        if !self.is_mounted() {
            ttrace!(instance = self.id.get(), "event after unmount ignored");
            return self.scroll.window();
        }
        let params = self.params();
        let t = self.scroll.handle(event, &params, now_ms);
        self.notify(t.window_changed);
        self.scroll.window()
    }

    fn resolve_columns(&mut self) {
        self.visible_columns = resolve_column_indexes(&self.columns, &self.visibility);
    }

    fn notify(&self, window_changed: bool) {
        if !window_changed {
            return;
        }
        if let Some(cb) = &self.options.on_change {
            cb(self.scroll.window(), self.scroll.phase());
        }
    }
}

impl<D: ?Sized> core::fmt::Debug for DataTable<D> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("DataTable")
            .field("id", &self.id)
            .field("options", &self.options)
            .field("columns", &self.columns.len())
            .field("visible_columns", &self.visible_columns)
            .field("window", &self.scroll.window())
            .field("phase", &self.scroll.phase())
            .field("focused", &self.focus.last_recorded())
            .field("mounted", &self.resize.is_some())
            .finish_non_exhaustive()
    }
}
