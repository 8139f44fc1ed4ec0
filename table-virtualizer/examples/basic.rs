// Example: compute a window for a scroll position and materialize its rows.
use table_virtualizer::{
    ColumnDefinition, ColumnType, Record, VisibilityMap, compute_window, materialize,
    resolve_columns,
};

fn main() {
    let rows: Vec<Record<String>> = (0..1_000)
        .map(|i| {
            let mut r = Record::default();
            r.insert("name".to_string(), format!("row {i}"));
            r.insert("status".to_string(), if i % 2 == 0 { "open" } else { "done" }.to_string());
            r
        })
        .collect();
    let columns = vec![
        ColumnDefinition::new("name", "Name"),
        ColumnDefinition::new("status", "Status").with_kind(ColumnType::Combo),
    ];
    let visible = resolve_columns(&columns, &VisibilityMap::default());

    let window = compute_window(4_500, 300, 30, rows.len(), 1.0);
    println!("window={window:?}");

    let out = materialize(window, &rows, &visible, 30);
    println!("materialized={}", out.len());
    if let Some(first) = out.first() {
        println!(
            "first: index={} top={} parity={:?} cells={:?}",
            first.index,
            first.absolute_top,
            first.parity,
            first.cells.iter().map(|c| c.value).collect::<Vec<_>>()
        );
    }
}
