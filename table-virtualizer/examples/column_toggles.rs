// Example: runtime show/hide of columns through the visibility map.
use table_virtualizer::{ColumnDefinition, ColumnType, VisibilityMap, resolve_columns, visibility_toggles};

fn main() {
    let columns = vec![
        ColumnDefinition::structural("row_id"),
        ColumnDefinition::new("name", "Name"),
        ColumnDefinition::new("due", "Due")
            .with_kind(ColumnType::Date)
            .with_hidden(true),
    ];
    let mut visibility = VisibilityMap::default();

    let keys = |v: &VisibilityMap| {
        resolve_columns(&columns, v)
            .iter()
            .map(|c| c.key.clone())
            .collect::<Vec<_>>()
    };
    println!("default: {:?}", keys(&visibility));

    visibility.insert("due".to_string(), true);
    visibility.insert("row_id".to_string(), false); // structural, ignored
    println!("after toggles: {:?}", keys(&visibility));

    for t in visibility_toggles(&columns, &visibility) {
        println!("[{}] {}", if t.visible { "x" } else { " " }, t.label);
    }
}
