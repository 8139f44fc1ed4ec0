use crate::*;

use std::collections::HashMap;
use std::string::{String, ToString};
use std::sync::Arc;
use std::sync::Mutex;
use std::vec::Vec;
use std::{format, vec};

#[derive(Clone, Copy, Debug)]
struct Lcg(u64);

impl Lcg {
    fn new(seed: u64) -> Self {
        Self(seed)
    }

    fn next_u64(&mut self) -> u64 {
        // Deterministic, dependency-free PRNG for tests.
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        self.0
    }

    fn gen_range_u64(&mut self, start: u64, end_exclusive: u64) -> u64 {
        debug_assert!(start < end_exclusive);
        start + (self.next_u64() % (end_exclusive - start))
    }

    fn gen_range_u32(&mut self, start: u32, end_exclusive: u32) -> u32 {
        self.gen_range_u64(start as u64, end_exclusive as u64) as u32
    }

    fn gen_range_usize(&mut self, start: usize, end_exclusive: usize) -> usize {
        self.gen_range_u64(start as u64, end_exclusive as u64) as usize
    }
}

/// A display environment that keeps elements in a map keyed by identifier.
#[derive(Default)]
struct TestHost {
    extents: HashMap<String, Extent>,
    scroll: HashMap<String, u64>,
    focused: Option<String>,
    focus_calls: usize,
    max_scroll: Option<u64>,
    next_sub: u64,
    subs: Vec<(ResizeSubscription, TableInstanceId)>,
}

impl Host for TestHost {
    type Element = String;

    fn lookup(&self, id: &str) -> Option<String> {
        self.extents.contains_key(id).then(|| id.to_string())
    }

    fn measure(&self, element: &String) -> Extent {
        self.extents.get(element).copied().unwrap_or_default()
    }

    fn focus(&mut self, element: &String) {
        self.focused = Some(element.clone());
        self.focus_calls += 1;
    }

    fn scroll_top(&self, element: &String) -> u64 {
        self.scroll.get(element).copied().unwrap_or(0)
    }

    fn set_scroll_top(&mut self, element: &String, offset: u64) {
        let offset = self.max_scroll.map_or(offset, |max| offset.min(max));
        self.scroll.insert(element.clone(), offset);
    }

    fn subscribe_resize(&mut self, instance: TableInstanceId) -> ResizeSubscription {
        self.next_sub += 1;
        let sub = ResizeSubscription(self.next_sub);
        self.subs.push((sub, instance));
        sub
    }

    fn release_resize(&mut self, subscription: ResizeSubscription) {
        self.subs.retain(|(s, _)| *s != subscription);
    }
}

impl TestHost {
    fn layout<D: RowSource + ?Sized>(&mut self, t: &DataTable<D>, container: u32, chrome: u32) {
        self.extents.insert(
            t.part_element_id(LayoutPart::Container),
            Extent::new(container, 640),
        );
        self.extents
            .insert(t.part_element_id(LayoutPart::Table), Extent::new(0, 600));
        self.extents
            .insert(t.part_element_id(LayoutPart::Header), Extent::new(chrome, 600));
        self.extents
            .insert(t.part_element_id(LayoutPart::Footer), Extent::new(chrome, 600));
    }

    fn scroll_to<D: RowSource + ?Sized>(&mut self, t: &DataTable<D>, offset: u64) {
        self.scroll
            .insert(t.part_element_id(LayoutPart::Container), offset);
    }

    /// Rebuilds the cell elements of `t` from its current window.
    fn paint<D: RowSource + ?Sized>(&mut self, t: &DataTable<D>) {
        let prefix = format!("{}-cell-", t.id());
        self.extents.retain(|id, _| !id.starts_with(&prefix));
        let mut ids = Vec::new();
        t.for_each_row(|row| {
            for cell in &row.cells {
                ids.push((t.cell_element_id(row.index, cell.key), row.height));
            }
        });
        for (id, h) in ids {
            self.extents.insert(id, Extent::new(h, 100));
        }
    }
}

fn people(n: usize) -> Vec<Record<String>> {
    (0..n)
        .map(|i| {
            let mut r = Record::<String>::default();
            r.insert("id".into(), i.to_string());
            r.insert("name".into(), format!("person {i}"));
            if i % 3 != 0 {
                r.insert("born".into(), format!("19{:02}-01-01", i % 100));
            }
            r
        })
        .collect()
}

fn people_columns() -> Vec<ColumnDefinition> {
    vec![
        ColumnDefinition::structural("id"),
        ColumnDefinition::new("name", "Name"),
        ColumnDefinition::new("team", "Team").with_kind(ColumnType::Combo),
        ColumnDefinition::new("born", "Born")
            .with_kind(ColumnType::Date)
            .with_hidden(true),
    ]
}

fn people_table(n: usize) -> DataTable<Vec<Record<String>>> {
    DataTable::new(Arc::new(people(n)), people_columns(), TableOptions::new(30))
}

#[test]
fn concrete_window_at_top() {
    let w = compute_window(0, 300, 30, 1000, 1.0);
    assert_eq!(w.start_index, 0);
    // 10 visible + 10 padding
    assert_eq!(w.end_index, 20);
    assert_eq!(w.pixel_top, 0);
}

#[test]
fn resize_grows_window_without_scrolling() {
    let before = compute_window(0, 300, 30, 1000, 1.0);
    let after = compute_window(0, 600, 30, 1000, 1.0);
    assert_eq!(before.end_index, 20);
    assert_eq!(after.end_index, 40);
    assert_eq!(after.start_index, 0);
}

#[test]
fn window_is_padded_on_both_ends() {
    // top row 100, 10 visible, 10 padding each side
    let w = compute_window(3000, 300, 30, 1000, 1.0);
    assert_eq!(w.start_index, 90);
    assert_eq!(w.end_index, 120);
    assert_eq!(w.pixel_top, 90 * 30);
}

#[test]
fn overscan_factor_scales_padding() {
    assert_eq!(geometry::overscan_rows(300, 30, 0.0), 0);
    assert_eq!(geometry::overscan_rows(300, 30, 0.5), 5);
    // 0.25 * 300 / 30 = 2.5 => 3
    assert_eq!(geometry::overscan_rows(300, 30, 0.25), 3);
    assert_eq!(geometry::overscan_rows(300, 30, -1.0), 0);
    assert_eq!(geometry::overscan_rows(300, 30, f32::NAN), 0);

    let w = compute_window(3000, 300, 30, 1000, 0.0);
    assert_eq!((w.start_index, w.end_index), (100, 110));
}

#[test]
fn partial_rows_round_up() {
    // 100px viewport over 30px rows shows 4 (partial) rows
    assert_eq!(geometry::visible_row_count(100, 30), 4);
    let w = compute_window(15, 100, 30, 50, 0.0);
    assert_eq!((w.start_index, w.end_index), (0, 4));
}

#[test]
fn empty_dataset_yields_empty_window() {
    assert_eq!(compute_window(0, 300, 30, 0, 1.0), Window::EMPTY);
    assert_eq!(compute_window(9_000, 300, 30, 0, 1.0), Window::EMPTY);
}

#[test]
fn zero_row_height_yields_empty_window() {
    assert_eq!(compute_window(120, 300, 0, 1000, 1.0), Window::EMPTY);
    assert_eq!(geometry::scroll_to_row_offset(5, Align::Start, 0, 0, 10, 300), 0);
}

#[test]
fn scroll_past_content_stays_in_bounds() {
    let w = compute_window(1_000_000, 300, 30, 50, 1.0);
    assert!(w.start_index <= w.end_index);
    assert_eq!(w.end_index, 50);
    assert_eq!(w.start_index, 40);
}

#[test]
fn max_scroll_offset_reaches_last_row() {
    for (rows, rh, vh) in [(1000usize, 30u32, 300u32), (10, 30, 100), (7, 13, 50), (3, 30, 600)] {
        let max = geometry::max_scroll_offset(rows, rh, vh);
        let w = compute_window(max, vh, rh, rows, 1.0);
        assert_eq!(w.end_index, rows, "rows={rows} rh={rh} vh={vh}");
    }
}

#[test]
fn random_windows_hold_invariants() {
    let mut rng = Lcg::new(0x5eed);
    for _ in 0..2_000 {
        let rows = rng.gen_range_usize(0, 5_000);
        let rh = rng.gen_range_u32(1, 80);
        let vh = rng.gen_range_u32(0, 2_000);
        let factor = rng.gen_range_u32(0, 9) as f32 / 4.0;
        let top = rng.gen_range_u64(0, (rows as u64 + 10) * rh as u64 + 1);

        let w = compute_window(top, vh, rh, rows, factor);
        assert!(w.start_index <= w.end_index);
        assert!(w.end_index <= rows);
        assert_eq!(w.pixel_top, w.start_index as u64 * rh as u64);
        assert_eq!(w, compute_window(top, vh, rh, rows, factor));

        if rows > 0 {
            assert_eq!(compute_window(0, vh, rh, rows, factor).start_index, 0);
        }

        let further = top + rng.gen_range_u64(0, 5_000);
        let w2 = compute_window(further, vh, rh, rows, factor);
        assert!(w2.start_index >= w.start_index);
    }
}

#[test]
fn scroll_to_row_offset_alignments() {
    // rows of 30px, 300px viewport, 100 rows => max offset 2700
    let off = |index, align, current| geometry::scroll_to_row_offset(index, align, current, 30, 100, 300);
    assert_eq!(off(10, Align::Start, 0), 300);
    assert_eq!(off(10, Align::End, 0), 30);
    assert_eq!(off(10, Align::Center, 0), 315 - 150);
    assert_eq!(off(99, Align::Start, 0), 2700);
    assert_eq!(off(500, Align::Start, 0), 2700);

    // row 12 spans [360, 390), fully inside [300, 600)
    assert_eq!(off(12, Align::Auto, 300), 300);
    assert_eq!(off(2, Align::Auto, 300), 60);
    assert_eq!(off(25, Align::Auto, 300), 780 - 300);
}

#[test]
fn hidden_column_is_excluded_until_overridden() {
    let defs = people_columns();
    let mut vis = VisibilityMap::default();
    let keys = |v: &VisibilityMap| {
        resolve_columns(&defs, v)
            .into_iter()
            .map(|c| c.key.as_str())
            .collect::<Vec<_>>()
    };
    assert_eq!(keys(&vis), ["id", "name", "team"]);

    vis.insert("born".into(), true);
    assert_eq!(keys(&vis), ["id", "name", "team", "born"]);

    vis.insert("name".into(), false);
    assert_eq!(keys(&vis), ["id", "team", "born"]);
}

#[test]
fn unlabeled_columns_ignore_overrides_and_toggles() {
    let defs = people_columns();
    let mut vis = VisibilityMap::default();
    vis.insert("id".into(), false);
    assert!(resolve_columns(&defs, &vis).iter().any(|c| c.key == "id"));

    let toggles = visibility_toggles(&defs, &vis);
    let keys: Vec<_> = toggles.iter().map(|t| t.key.as_str()).collect();
    assert_eq!(keys, ["name", "team", "born"]);
    assert_eq!(
        toggles[2],
        VisibilityToggle {
            key: "born".into(),
            label: "Born".into(),
            visible: false,
        }
    );
}

#[test]
fn materialize_emits_offsets_parity_and_cells() {
    let rows = people(10);
    let defs = people_columns();
    let cols = resolve_columns(&defs, &VisibilityMap::default());
    let window = compute_window(60, 60, 30, rows.len(), 0.0);
    assert_eq!((window.start_index, window.end_index), (2, 4));

    let out = materialize(window, &rows, &cols, 30);
    assert_eq!(out.len(), 2);
    assert_eq!(out[0].index, 2);
    assert_eq!(out[0].absolute_top, 60);
    assert_eq!(out[0].bottom(), 90);
    assert_eq!(out[0].parity, Parity::Even);
    assert_eq!(out[1].parity, Parity::Odd);

    let cells = &out[1].cells;
    assert_eq!(cells.len(), 3);
    assert_eq!(cells[0].key, "id");
    assert_eq!(cells[0].value.map(String::as_str), Some("3"));
    assert_eq!(cells[1].value.map(String::as_str), Some("person 3"));
    assert_eq!(cells[2].kind, ColumnType::Combo);
    assert_eq!(cells[2].value, None);
}

#[test]
fn materialize_reclamps_stale_window() {
    let rows = people(5);
    let defs = people_columns();
    let cols = resolve_columns(&defs, &VisibilityMap::default());
    let stale = Window {
        start_index: 3,
        end_index: 40,
        pixel_top: 90,
    };
    let out = materialize(stale, &rows, &cols, 30);
    let indexes: Vec<_> = out.iter().map(|r| r.index).collect();
    assert_eq!(indexes, [3, 4]);

    let beyond = Window {
        start_index: 8,
        end_index: 12,
        pixel_top: 240,
    };
    assert!(materialize(beyond, &rows, &cols, 30).is_empty());
}

#[test]
fn element_ids_are_deterministic_and_scoped() {
    let a = TableInstanceId::next();
    let b = TableInstanceId::next();
    assert_ne!(a, b);
    assert_eq!(element_id(a, 5, "name"), element_id(a, 5, "name"));
    assert_ne!(element_id(a, 5, "name"), element_id(b, 5, "name"));
    assert_ne!(element_id(a, 5, "name"), element_id(a, 55, "name"));
    assert_ne!(part_element_id(a, LayoutPart::Header), part_element_id(a, LayoutPart::Footer));

    let token = FocusToken::new(5, "first-name");
    let id = token.element_id(a);
    assert_eq!(FocusToken::parse(a, &id), Some(token));
    assert_eq!(FocusToken::parse(b, &id), None);
    assert_eq!(FocusToken::parse(a, &part_element_id(a, LayoutPart::Body)), None);
}

#[test]
fn focus_tracker_keeps_only_latest_and_tolerates_absence() {
    let mut host = TestHost::default();
    let mut tracker = FocusTracker::new();
    assert!(!tracker.restore_focus(&mut host));

    host.extents.insert("b".into(), Extent::new(30, 100));
    tracker.record_focus("a");
    tracker.record_focus("b");
    assert_eq!(tracker.last_recorded(), Some("b"));
    assert!(tracker.restore_focus(&mut host));
    assert_eq!(host.focused.as_deref(), Some("b"));

    tracker.record_focus("gone");
    assert!(!tracker.restore_focus(&mut host));
    assert_eq!(host.focus_calls, 1);
}

#[test]
fn debounce_timer_restarts_and_fires_once() {
    let mut t = DebounceTimer::new(10);
    assert!(!t.fire_if_due(100));
    t.restart(0);
    t.restart(5);
    assert_eq!(t.deadline_ms(), Some(15));
    assert!(!t.fire_if_due(14));
    assert!(t.fire_if_due(15));
    assert!(!t.fire_if_due(16));

    t.restart(20);
    t.cancel();
    assert!(!t.is_pending());
    assert!(!t.fire_if_due(1_000));
}

#[test]
fn scroll_machine_follows_transition_table() {
    let params = WindowParams {
        row_height: 30,
        row_count: 1000,
        overscan_factor: 1.0,
    };
    let sample = |top| ScrollSample {
        scroll_top: top,
        viewport: Extent::new(300, 600),
    };
    let mut m = ScrollMachine::new(10);
    assert_eq!(m.phase(), ScrollPhase::Idle);

    let t = m.handle(ScrollEvent::Tick, &params, 0);
    assert_eq!((t.from, t.to, t.restore_focus), (ScrollPhase::Idle, ScrollPhase::Idle, false));

    let t = m.handle(ScrollEvent::Scroll(sample(0)), &params, 0);
    assert_eq!(t.to, ScrollPhase::Scrolling);
    assert!(t.window_changed);
    assert_eq!(m.window().end_index, 20);

    // Same geometry again: still scrolling, window unchanged, timer restarted.
    let t = m.handle(ScrollEvent::Resize(sample(0)), &params, 8);
    assert_eq!(t.to, ScrollPhase::Scrolling);
    assert!(!t.window_changed);

    let t = m.handle(ScrollEvent::Tick, &params, 12);
    assert!(!t.restore_focus);
    assert_eq!(t.to, ScrollPhase::Scrolling);

    let t = m.handle(ScrollEvent::Tick, &params, 18);
    assert!(t.restore_focus);
    assert_eq!(t.to, ScrollPhase::Idle);

    m.handle(ScrollEvent::Scroll(sample(3000)), &params, 30);
    let t = m.handle(ScrollEvent::Cancel, &params, 31);
    assert_eq!(t.to, ScrollPhase::Idle);
    assert!(!m.handle(ScrollEvent::Tick, &params, 100).restore_focus);
    assert_eq!(m.window().start_index, 90);
}

#[test]
fn mount_establishes_window_from_host_geometry() {
    let mut host = TestHost::default();
    let mut t = people_table(1000);
    // 360px container minus 30px header and footer => 300px of rows
    host.layout(&t, 360, 30);
    host.scroll_to(&t, 900);

    let w = t.mount(&mut host, 0);
    // the synthetic mount event ignores the host's stale offset
    assert_eq!((w.start_index, w.end_index), (0, 20));
    assert_eq!(t.viewport(), Extent::new(300, 600));
    assert_eq!(t.content_height(), 30_000);
    assert!(t.is_mounted());
    assert_eq!(host.subs, [(ResizeSubscription(1), t.id())]);
}

#[test]
fn resize_recomputes_with_unchanged_offset() {
    let mut host = TestHost::default();
    let mut t = people_table(1000);
    host.layout(&t, 360, 30);
    t.mount(&mut host, 0);
    assert_eq!(t.window().end_index, 20);

    host.layout(&t, 660, 30);
    let w = t.on_resize(&mut host, 5);
    assert_eq!((w.start_index, w.end_index), (0, 40));
    assert_eq!(t.scroll_offset(), 0);
}

#[test]
fn missing_layout_measures_as_zero() {
    let mut host = TestHost::default();
    let mut t = people_table(100);
    let w = t.mount(&mut host, 0);
    assert!(w.is_empty());
    assert_eq!(t.viewport(), Extent::ZERO);

    // Once the container attaches the next event self-corrects.
    host.layout(&t, 360, 30);
    let w = t.on_scroll(&mut host, 1);
    assert_eq!(w.end_index, 20);
}

#[test]
fn focus_survives_scroll_that_keeps_the_row() {
    let mut host = TestHost::default();
    let mut t = people_table(1000);
    host.layout(&t, 360, 30);
    t.mount(&mut host, 0);
    host.paint(&t);

    assert!(t.focus_cell(&mut host, 5, "name"));
    assert_eq!(t.focused_cell(), Some(FocusToken::new(5, "name")));
    host.focused = None;

    host.scroll_to(&t, 300);
    let w = t.on_scroll(&mut host, 100);
    assert!(w.contains(5));
    host.paint(&t);

    assert!(!t.tick(&mut host, 105));
    assert!(t.tick(&mut host, 110));
    assert_eq!(host.focused, Some(t.cell_element_id(5, "name")));
}

#[test]
fn focus_restore_is_noop_after_row_is_evicted() {
    let mut host = TestHost::default();
    let mut t = people_table(1000);
    host.layout(&t, 360, 30);
    t.mount(&mut host, 0);
    host.paint(&t);
    t.record_focus(&t.cell_element_id(5, "name"));
    let calls = host.focus_calls;

    host.scroll_to(&t, 3000);
    let w = t.on_scroll(&mut host, 100);
    assert!(!w.contains(5));
    host.paint(&t);

    assert!(!t.tick(&mut host, 200));
    assert_eq!(host.focus_calls, calls);
    assert!(!t.is_scrolling());
    // the logical token is kept for when the row comes back
    assert_eq!(t.focused_cell(), Some(FocusToken::new(5, "name")));
}

#[test]
fn rapid_events_restore_once_after_quiet_period() {
    let mut host = TestHost::default();
    let mut t = people_table(1000);
    host.layout(&t, 360, 30);
    t.mount(&mut host, 0);
    host.paint(&t);
    t.record_focus(&t.cell_element_id(3, "id"));
    t.record_focus(&t.cell_element_id(4, "team"));

    for (i, now) in [10u64, 14, 18, 22].into_iter().enumerate() {
        host.scroll_to(&t, 30 * i as u64);
        t.on_scroll(&mut host, now);
        assert!(!t.tick(&mut host, now + 5));
    }
    host.paint(&t);
    assert_eq!(t.next_deadline_ms(), Some(32));
    assert!(t.tick(&mut host, 32));
    assert!(!t.tick(&mut host, 40));
    assert_eq!(host.focus_calls, 1);
    assert_eq!(host.focused, Some(t.cell_element_id(4, "team")));
}

#[test]
fn unmount_cancels_timer_and_releases_subscription() {
    let mut host = TestHost::default();
    let mut t = people_table(50);
    host.layout(&t, 360, 30);
    t.mount(&mut host, 0);
    host.paint(&t);
    t.record_focus(&t.cell_element_id(1, "name"));
    t.on_scroll(&mut host, 10);
    assert!(t.next_deadline_ms().is_some());

    t.unmount(&mut host);
    assert!(!t.is_mounted());
    assert!(host.subs.is_empty());
    assert_eq!(t.next_deadline_ms(), None);
    assert!(!t.tick(&mut host, 1_000));
    assert_eq!(host.focus_calls, 0);
}

#[test]
fn unmounted_table_ignores_late_events() {
    let mut host = TestHost::default();
    let mut t = people_table(1000);
    host.layout(&t, 360, 30);
    t.mount(&mut host, 0);
    host.paint(&t);
    t.record_focus(&t.cell_element_id(1, "name"));
    t.unmount(&mut host);

    host.scroll_to(&t, 3000);
    let w = t.on_scroll(&mut host, 20);
    assert_eq!((w.start_index, w.end_index), (0, 20));
    assert_eq!(t.on_resize(&mut host, 25), w);
    assert_eq!(t.scroll_to_row(&mut host, 500, Align::Start, 30), 0);
    assert_eq!(t.next_deadline_ms(), None);
    assert!(!t.is_scrolling());

    assert!(!t.tick(&mut host, 100));
    assert_eq!(host.focus_calls, 0);
    assert_eq!(host.focused, None);
}

#[test]
fn instances_keep_separate_subscriptions_and_ids() {
    let mut host = TestHost::default();
    let mut a = people_table(100);
    let mut b = people_table(100);
    host.layout(&a, 360, 30);
    host.layout(&b, 660, 30);
    a.mount(&mut host, 0);
    b.mount(&mut host, 0);
    assert_eq!(host.subs.len(), 2);
    assert_ne!(a.cell_element_id(0, "name"), b.cell_element_id(0, "name"));
    assert_eq!(a.window().end_index, 20);
    assert_eq!(b.window().end_index, 40);

    a.unmount(&mut host);
    assert_eq!(host.subs, [(ResizeSubscription(2), b.id())]);
}

#[test]
fn remount_resets_window_and_focus() {
    let mut host = TestHost::default();
    let mut t = people_table(1000);
    host.layout(&t, 360, 30);
    t.mount(&mut host, 0);
    host.scroll_to(&t, 3000);
    t.on_scroll(&mut host, 1);
    t.record_focus(&t.cell_element_id(95, "name"));

    t.unmount(&mut host);
    let w = t.mount(&mut host, 50);
    assert_eq!(w.start_index, 0);
    assert_eq!(t.focused_element_id(), None);
    assert_eq!(host.subs.len(), 1);
}

#[test]
fn replacing_rows_reclamps_window_and_keeps_focus() {
    let mut host = TestHost::default();
    let mut t = people_table(1000);
    host.layout(&t, 360, 30);
    t.mount(&mut host, 0);
    host.scroll_to(&t, 3000);
    t.on_scroll(&mut host, 1);
    t.record_focus(&t.cell_element_id(95, "name"));

    t.set_rows(Arc::new(people(100)));
    let w = t.window();
    assert_eq!((w.start_index, w.end_index), (90, 100));
    assert_eq!(t.focused_cell(), Some(FocusToken::new(95, "name")));

    t.set_rows(Arc::new(Vec::new()));
    assert_eq!(t.window(), Window::EMPTY);
    assert!(t.materialize().is_empty());
}

#[test]
fn scroll_to_top_moves_host_and_clears_focus() {
    let mut host = TestHost::default();
    let mut t = people_table(1000);
    host.layout(&t, 360, 30);
    t.mount(&mut host, 0);
    host.scroll_to(&t, 3000);
    t.on_scroll(&mut host, 1);
    t.record_focus(&t.cell_element_id(95, "name"));

    let w = t.scroll_to_top(&mut host, 2);
    assert_eq!(w.start_index, 0);
    assert_eq!(host.scroll_top(&t.part_element_id(LayoutPart::Container)), 0);
    assert_eq!(t.focused_cell(), None);
}

#[test]
fn scroll_to_row_applies_host_offset() {
    let mut host = TestHost::default();
    let mut t = people_table(1000);
    host.layout(&t, 360, 30);
    t.mount(&mut host, 0);

    let off = t.scroll_to_row(&mut host, 500, Align::Start, 1);
    assert_eq!(off, 15_000);
    assert_eq!(host.scroll_top(&t.part_element_id(LayoutPart::Container)), 15_000);
    assert!(t.window().contains(500));
    assert!(t.is_scrolling());
}

#[test]
fn scroll_to_row_follows_offset_clamped_by_host() {
    let mut host = TestHost {
        max_scroll: Some(1_000),
        ..TestHost::default()
    };
    let mut t = people_table(1000);
    host.layout(&t, 360, 30);
    t.mount(&mut host, 0);

    let off = t.scroll_to_row(&mut host, 500, Align::Start, 1);
    assert_eq!(off, 1_000);
    assert_eq!(t.scroll_offset(), 1_000);
    // top row 33, ten rows of padding on each side
    assert_eq!((t.window().start_index, t.window().end_index), (23, 53));
}

#[test]
fn scroll_to_row_without_container_uses_requested_offset() {
    let mut host = TestHost::default();
    let mut t = people_table(1000);
    host.layout(&t, 360, 30);
    t.mount(&mut host, 0);
    host.extents.remove(&t.part_element_id(LayoutPart::Container));

    let off = t.scroll_to_row(&mut host, 500, Align::Start, 1);
    assert_eq!(off, 15_000);
    assert_eq!(t.scroll_offset(), 15_000);
    assert!(host.scroll.is_empty());
}

#[test]
fn column_toggles_drive_materialized_cells() {
    let mut t = people_table(10);
    let keys = |t: &DataTable<Vec<Record<String>>>| {
        t.visible_columns()
            .into_iter()
            .map(|c| c.key.clone())
            .collect::<Vec<_>>()
    };
    assert_eq!(keys(&t), ["id", "name", "team"]);

    assert!(t.toggle_column("born"));
    assert!(t.set_column_visible("team", false));
    assert_eq!(keys(&t), ["id", "name", "born"]);
    assert!(!t.set_column_visible("id", false));
    assert!(!t.set_column_visible("missing", true));

    t.clear_visibility_overrides();
    assert_eq!(keys(&t), ["id", "name", "team"]);
    assert_eq!(t.visibility_toggles().len(), 3);

    t.set_columns(vec![ColumnDefinition::new("name", "Name")]);
    assert_eq!(keys(&t), ["name"]);
}

#[test]
fn callbacks_pass_through() {
    let changes = Arc::new(Mutex::new(Vec::new()));
    let intents = Arc::new(Mutex::new(Vec::new()));
    let opts = TableOptions::new(30)
        .with_on_change(Some({
            let changes = Arc::clone(&changes);
            move |w: Window, phase: ScrollPhase| changes.lock().unwrap().push((w, phase))
        }))
        .with_on_intent(Some({
            let intents = Arc::clone(&intents);
            move |i: &RowIntent| intents.lock().unwrap().push(i.clone())
        }));
    let mut host = TestHost::default();
    let mut t = DataTable::new(Arc::new(people(100)), people_columns(), opts);
    host.layout(&t, 360, 30);
    t.mount(&mut host, 0);
    t.on_scroll(&mut host, 1); // unchanged window, no notification

    {
        let changes = changes.lock().unwrap();
        assert_eq!(changes.len(), 1);
        assert_eq!(changes[0].0.end_index, 20);
        assert_eq!(changes[0].1, ScrollPhase::Scrolling);
    }

    t.request_add();
    t.request_edit(4, "name", "renamed");
    t.request_delete(7);
    assert_eq!(
        *intents.lock().unwrap(),
        [
            RowIntent::Add,
            RowIntent::Edit {
                row: 4,
                column: "name".into(),
                value: "renamed".into(),
            },
            RowIntent::Delete { row: 7 },
        ]
    );
}
