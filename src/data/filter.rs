use std::collections::BTreeSet;

use super::model::{Record, Table, Value};

// ---------------------------------------------------------------------------
// User-driven refiltering over already-loaded tables
// ---------------------------------------------------------------------------

/// Keep rows whose `Country` is in the selection.
///
/// An empty selection yields an empty table, never an error — the chart
/// renders an empty state.
pub fn filter_countries(table: &Table, selected: &BTreeSet<String>) -> Table {
    let rows = table
        .rows
        .iter()
        .filter(|record| {
            record
                .get("Country")
                .and_then(Value::as_str)
                .is_some_and(|country| selected.contains(country))
        })
        .cloned()
        .collect();
    Table::new(table.columns.clone(), rows)
}

/// Keep rows where `column` equals an exact year (the slider charts:
/// disclosure 2005–2019, trade 2011–2020).
pub fn filter_year(table: &Table, column: &str, year: i64) -> Table {
    let rows = table
        .rows
        .iter()
        .filter(|record| record.get(column).and_then(Value::as_i64) == Some(year))
        .cloned()
        .collect();
    Table::new(table.columns.clone(), rows)
}

/// Project the wide electricity table down to one year: `Country` plus every
/// `{year}_{kind}` field, renamed to the bare kind (`2020_solar` → `solar`).
pub fn electricity_year_view(table: &Table, year: i64) -> Table {
    let prefix = format!("{year}_");
    let kinds: Vec<(String, String)> = table
        .columns
        .iter()
        .filter_map(|column| {
            column
                .strip_prefix(&prefix)
                .map(|kind| (column.clone(), kind.to_string()))
        })
        .collect();

    let mut columns = vec!["Country".to_string()];
    columns.extend(kinds.iter().map(|(_, kind)| kind.clone()));

    let rows = table
        .rows
        .iter()
        .map(|record| {
            let mut row = Record::new();
            row.insert(
                "Country".into(),
                record.get("Country").cloned().unwrap_or(Value::Null),
            );
            for (field, kind) in &kinds {
                row.insert(
                    kind.clone(),
                    record.get(field.as_str()).cloned().unwrap_or(Value::Null),
                );
            }
            row
        })
        .collect();
    Table::new(columns, rows)
}
