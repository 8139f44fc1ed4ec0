// Example: drive a table through a headless host, the way a TUI adapter would.
use std::sync::Arc;

use table_virtualizer::{
    Align, ColumnDefinition, ColumnType, DataTable, Extent, Record, ScrollPhase, TableOptions,
    Window,
};
use table_virtualizer_adapter::{Controller, TableLayout};

fn main() {
    let rows: Vec<Record<String>> = (0..10_000)
        .map(|i| {
            let mut r = Record::default();
            r.insert("name".to_string(), format!("user{i}"));
            r.insert("joined".to_string(), format!("2024-01-{:02}", i % 28 + 1));
            r
        })
        .collect();
    let columns = vec![
        ColumnDefinition::new("name", "Name"),
        ColumnDefinition::new("joined", "Joined").with_kind(ColumnType::Date),
    ];
    let table = DataTable::new(
        Arc::new(rows),
        columns,
        TableOptions::new(24).with_on_change(Some(|w: Window, phase: ScrollPhase| {
            println!("window changed: {w:?} ({phase:?})");
        })),
    );

    let mut c = Controller::new(table, TableLayout::new(Extent::new(520, 1024), 40, 40));
    c.mount(0);
    c.click_cell(3, "name");
    println!("focused={:?}", c.host().focused());

    // A burst of wheel events; focus comes back once they stop.
    for (i, now) in (0..5u64).zip([16, 32, 48, 64, 80]) {
        c.on_scroll(i * 24, now);
        c.tick(now);
    }
    let restored = c.tick(100);
    println!("restored={restored} focused={:?}", c.host().focused());

    // Jump far away, then bring the focused row back.
    c.on_scroll(120_000, 200);
    println!(
        "after jump: window={:?} focused={:?}",
        c.window(),
        c.host().focused()
    );
    let off = c.reveal_focused(Align::Center, 300);
    println!("revealed at {off:?}: focused={:?}", c.host().focused());

    c.unmount();
}
