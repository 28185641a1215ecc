use std::collections::BTreeMap;
use std::fs::File;
use std::path::Path;

use serde::Serialize;

use crate::config::{DataConfig, Dataset};
use crate::error::DataError;

use super::graph::{self, DiplomacyGraph};
use super::hierarchy::{self, HierarchyNode};
use super::model::{Record, Table, Value};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// What a loader hands to the presentation layer. Serializes untagged:
/// a record array, a nested name/children tree, or a {nodes, edges} object.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ChartData {
    Table(Table),
    Hierarchy(HierarchyNode),
    Graph(DiplomacyGraph),
}

/// Run the loader for one dataset. Each invocation re-reads the source file;
/// nothing is cached between calls.
pub fn load_dataset(config: &DataConfig, dataset: Dataset) -> Result<ChartData, DataError> {
    Ok(match dataset {
        Dataset::Mobile => ChartData::Table(load_mobile_data(config)?),
        Dataset::Gdp => ChartData::Table(load_gdp_data(config)?),
        Dataset::Population => ChartData::Table(load_population_data(config)?),
        Dataset::Freight => ChartData::Table(load_freight_data(config)?),
        Dataset::Passengers => ChartData::Table(load_passenger_data(config)?),
        Dataset::Electricity => ChartData::Table(load_electricity_data(config)?),
        Dataset::Disclosure => ChartData::Table(load_disclosure_data(config)?),
        Dataset::Childrens => ChartData::Table(load_childrens_data(config)?),
        Dataset::Expenditure => ChartData::Table(load_expenditure_data(config)?),
        Dataset::Difference => ChartData::Table(load_difference_data(config)?),
        Dataset::Diplomacy => ChartData::Graph(load_diplomacy_data(config)?),
        Dataset::Trade => ChartData::Table(load_trade_data(config)?),
        Dataset::Tourism => ChartData::Hierarchy(load_tourism_hierarchy(config)?),
    })
}

// ---------------------------------------------------------------------------
// CSV plumbing
// ---------------------------------------------------------------------------

/// Read a CSV into a [`Table`], type-guessing every cell.
/// Header whitespace is trimmed (some extracts pad column names).
fn read_table(path: &Path) -> Result<Table, DataError> {
    let file = File::open(path).map_err(|e| DataError::io(path, e))?;
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::Headers)
        .from_reader(file);

    let columns: Vec<String> = reader
        .headers()
        .map_err(|e| DataError::csv(path, e))?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result.map_err(|e| DataError::csv(path, e))?;
        let mut row = Record::new();
        for (i, cell) in record.iter().enumerate() {
            if let Some(name) = columns.get(i) {
                row.insert(name.clone(), Value::guess(cell));
            }
        }
        rows.push(row);
    }
    log::debug!("{}: read {} rows", path.display(), rows.len());
    Ok(Table::new(columns, rows))
}

fn require_column(table: &Table, path: &Path, column: &str) -> Result<(), DataError> {
    if table.columns.iter().any(|c| c == column) {
        Ok(())
    } else {
        Err(DataError::MissingColumn {
            path: path.to_path_buf(),
            column: column.to_string(),
        })
    }
}

// ---------------------------------------------------------------------------
// Mobile subscriptions (line chart)
// ---------------------------------------------------------------------------

/// Mobile subscriptions per country, restricted to 2010–2020 inclusive.
/// Output columns: `Country`, `Year`, `Subscriptions`. Rows whose year or
/// value fails numeric coercion are dropped.
pub fn load_mobile_data(config: &DataConfig) -> Result<Table, DataError> {
    let path = config.source_path(Dataset::Mobile);
    let source = read_table(&path)?;
    for column in ["Country or Area", "Year", "Value"] {
        require_column(&source, &path, column)?;
    }

    let mut rows = Vec::new();
    for record in &source.rows {
        let Some(year) = record.get("Year").and_then(Value::as_i64) else {
            continue;
        };
        if !(2010..=2020).contains(&year) {
            continue;
        }
        let Some(country) = record.get("Country or Area").and_then(Value::as_str) else {
            continue;
        };
        let Some(subscriptions) = record.get("Value").cloned().filter(|v| v.as_f64().is_some())
        else {
            continue;
        };
        let mut row = Record::new();
        row.insert("Country".into(), Value::String(country.to_string()));
        row.insert("Year".into(), Value::Integer(year));
        row.insert("Subscriptions".into(), subscriptions);
        rows.push(row);
    }
    Ok(Table::new(
        vec!["Country".into(), "Year".into(), "Subscriptions".into()],
        rows,
    ))
}

// ---------------------------------------------------------------------------
// GDP per capita (pie chart)
// ---------------------------------------------------------------------------

/// GDP per capita for year 2020, sorted descending by value.
/// The sort is stable: equal values keep their source order.
pub fn load_gdp_data(config: &DataConfig) -> Result<Table, DataError> {
    let path = config.source_path(Dataset::Gdp);
    let source = read_table(&path)?;
    for column in ["Country or Area", "Year", "Value"] {
        require_column(&source, &path, column)?;
    }

    let mut rows = Vec::new();
    for record in &source.rows {
        if record.get("Year").and_then(Value::as_i64) != Some(2020) {
            continue;
        }
        let Some(country) = record.get("Country or Area").and_then(Value::as_str) else {
            continue;
        };
        let Some(gdp) = record.get("Value").cloned().filter(|v| v.as_f64().is_some()) else {
            continue;
        };
        let mut row = Record::new();
        row.insert("Country".into(), Value::String(country.to_string()));
        row.insert("GDP".into(), gdp);
        rows.push(row);
    }
    rows.sort_by(|a, b| {
        let ga = a.get("GDP").and_then(Value::as_f64).unwrap_or(f64::NEG_INFINITY);
        let gb = b.get("GDP").and_then(Value::as_f64).unwrap_or(f64::NEG_INFINITY);
        gb.total_cmp(&ga)
    });
    Ok(Table::new(vec!["Country".into(), "GDP".into()], rows))
}

// ---------------------------------------------------------------------------
// Population (choropleth map)
// ---------------------------------------------------------------------------

/// Population for 2020, medium projection variant. All source columns pass
/// through untouched.
pub fn load_population_data(config: &DataConfig) -> Result<Table, DataError> {
    let path = config.source_path(Dataset::Population);
    let source = read_table(&path)?;
    for column in ["Year(s)", "Variant"] {
        require_column(&source, &path, column)?;
    }

    let rows = source
        .rows
        .iter()
        .filter(|record| {
            record.get("Year(s)").and_then(Value::as_i64) == Some(2020)
                && record.get("Variant").and_then(Value::as_str) == Some("Medium")
        })
        .cloned()
        .collect();
    Ok(Table::new(source.columns.clone(), rows))
}

// ---------------------------------------------------------------------------
// Air transport: freight (symbol map) and passengers (dot map)
// ---------------------------------------------------------------------------

const FREIGHT_COUNTRIES: [&str; 5] = ["India", "Russia", "China", "Canada", "United States"];

/// Air freight for the five focus countries in 2020.
pub fn load_freight_data(config: &DataConfig) -> Result<Table, DataError> {
    let path = config.source_path(Dataset::Freight);
    let source = read_table(&path)?;
    for column in ["Country or Area", "Year"] {
        require_column(&source, &path, column)?;
    }

    let rows = source
        .rows
        .iter()
        .filter(|record| {
            let country = record.get("Country or Area").and_then(Value::as_str);
            country.is_some_and(|c| FREIGHT_COUNTRIES.contains(&c))
                && record.get("Year").and_then(Value::as_i64) == Some(2020)
        })
        .cloned()
        .collect();
    Ok(Table::new(source.columns.clone(), rows))
}

/// Air passengers in 2021 (the dot-map year), all columns pass through.
pub fn load_passenger_data(config: &DataConfig) -> Result<Table, DataError> {
    let path = config.source_path(Dataset::Passengers);
    let source = read_table(&path)?;
    require_column(&source, &path, "Year")?;

    let rows = source
        .rows
        .iter()
        .filter(|record| record.get("Year").and_then(Value::as_i64) == Some(2021))
        .cloned()
        .collect();
    Ok(Table::new(source.columns.clone(), rows))
}

// ---------------------------------------------------------------------------
// Electricity production (stacked bar chart)
// ---------------------------------------------------------------------------

/// Pivot the long-format electricity table to one wide row per country.
///
/// Source layout: one row per country × commodity-transaction, one numeric
/// column per year (all-digit header). Output field names are
/// `{year}_{kind}` where `kind` comes from [`commodity_kind`]. Combinations
/// absent from the source are Null so every row carries the full field set.
pub fn load_electricity_data(config: &DataConfig) -> Result<Table, DataError> {
    let path = config.source_path(Dataset::Electricity);
    let source = read_table(&path)?;
    require_column(&source, &path, "Country")?;
    require_column(&source, &path, "Commodity - Transaction")?;

    let year_columns: Vec<String> = source
        .columns
        .iter()
        .filter(|c| !c.is_empty() && c.bytes().all(|b| b.is_ascii_digit()))
        .cloned()
        .collect();
    if year_columns.is_empty() {
        return Err(DataError::schema(&path, "no all-digit year columns found"));
    }

    // First pass: commodity kinds in first-appearance order, validating the
    // label grammar before any output is built.
    let mut kinds: Vec<String> = Vec::new();
    for record in &source.rows {
        let Some(label) = record.get("Commodity - Transaction").and_then(Value::as_str) else {
            continue;
        };
        let kind = commodity_kind(label).map_err(|message| DataError::schema(&path, message))?;
        if !kinds.contains(&kind) {
            kinds.push(kind);
        }
    }

    // Second pass: fill the wide rows, keyed by country (sorted, as the
    // pivoted index is).
    let mut wide: BTreeMap<String, Record> = BTreeMap::new();
    for record in &source.rows {
        let Some(country) = record.get("Country").and_then(Value::as_str) else {
            continue;
        };
        let Some(label) = record.get("Commodity - Transaction").and_then(Value::as_str) else {
            continue;
        };
        let kind = commodity_kind(label).map_err(|message| DataError::schema(&path, message))?;

        let row = wide.entry(country.to_string()).or_insert_with(|| {
            let mut row = Record::new();
            row.insert("Country".into(), Value::String(country.to_string()));
            for year in &year_columns {
                for kind in &kinds {
                    row.insert(format!("{year}_{kind}"), Value::Null);
                }
            }
            row
        });
        for year in &year_columns {
            let field = format!("{year}_{kind}");
            let value = record.get(year.as_str()).cloned().unwrap_or(Value::Null);
            if row.get(&field).is_some_and(Value::is_null) && !value.is_null() {
                row.insert(field, value);
            }
        }
    }

    let mut columns = vec!["Country".to_string()];
    for year in &year_columns {
        for kind in &kinds {
            columns.push(format!("{year}_{kind}"));
        }
    }
    Ok(Table::new(columns, wide.into_values().collect()))
}

/// Extract the commodity kind from a `Commodity - Transaction` label.
///
/// Expected grammar: at least two whitespace-delimited tokens, the
/// second-to-last naming the kind (`"Electricity - total solar production"`
/// → `solar`). Anything shorter is an unexpected-schema condition, never a
/// best-effort split.
fn commodity_kind(label: &str) -> Result<String, String> {
    let tokens: Vec<&str> = label.split_whitespace().collect();
    if tokens.len() < 2 {
        return Err(format!(
            "commodity label {label:?} does not match \"... <kind> <measure>\""
        ));
    }
    Ok(tokens[tokens.len() - 2].to_ascii_lowercase())
}

// ---------------------------------------------------------------------------
// Pass-through datasets
// ---------------------------------------------------------------------------

/// Business extent-of-disclosure values; the year slider filters downstream.
pub fn load_disclosure_data(config: &DataConfig) -> Result<Table, DataError> {
    let path = config.source_path(Dataset::Disclosure);
    let source = read_table(&path)?;
    require_column(&source, &path, "Year")?;
    Ok(source)
}

/// State-of-children indicators (parallel coordinates), as-is.
pub fn load_childrens_data(config: &DataConfig) -> Result<Table, DataError> {
    read_table(&config.source_path(Dataset::Childrens))
}

// ---------------------------------------------------------------------------
// Expenditure (sunburst chart)
// ---------------------------------------------------------------------------

/// Group expenditure rows by (Country, Year, Category), summing every numeric
/// column within each group. Non-numeric non-key columns are dropped. Output
/// rows are ordered by group key.
pub fn load_expenditure_data(config: &DataConfig) -> Result<Table, DataError> {
    let path = config.source_path(Dataset::Expenditure);
    let source = read_table(&path)?;
    const KEYS: [&str; 3] = ["Country", "Year", "Category"];
    for column in KEYS {
        require_column(&source, &path, column)?;
    }

    // A column is summable when any of its cells is numeric; missing cells
    // contribute nothing to the group total.
    let numeric_columns: Vec<String> = source
        .columns
        .iter()
        .filter(|c| !KEYS.contains(&c.as_str()))
        .filter(|c| {
            source
                .rows
                .iter()
                .any(|r| r.get(c.as_str()).is_some_and(|v| v.as_f64().is_some()))
        })
        .cloned()
        .collect();

    let mut groups: BTreeMap<(Value, Value, Value), Record> = BTreeMap::new();
    for record in &source.rows {
        let key = (
            record.get("Country").cloned().unwrap_or(Value::Null),
            record.get("Year").cloned().unwrap_or(Value::Null),
            record.get("Category").cloned().unwrap_or(Value::Null),
        );
        let row = groups.entry(key.clone()).or_insert_with(|| {
            let mut row = Record::new();
            row.insert("Country".into(), key.0.clone());
            row.insert("Year".into(), key.1.clone());
            row.insert("Category".into(), key.2.clone());
            for column in &numeric_columns {
                row.insert(column.clone(), Value::Float(0.0));
            }
            row
        });
        for column in &numeric_columns {
            if let Some(v) = record.get(column.as_str()).and_then(Value::as_f64) {
                let total = row.get(column.as_str()).and_then(Value::as_f64).unwrap_or(0.0);
                row.insert(column.clone(), Value::Float(total + v));
            }
        }
    }

    let mut columns: Vec<String> = KEYS.iter().map(|k| k.to_string()).collect();
    columns.extend(numeric_columns);
    Ok(Table::new(columns, groups.into_values().collect()))
}

// ---------------------------------------------------------------------------
// Healthcare / life-expectancy differences (difference chart)
// ---------------------------------------------------------------------------

/// Year-over-year deltas of healthcare expenditure and life expectancy,
/// per country. Pure: no I/O. Rows whose numeric fields fail coercion are
/// dropped before differencing; the first year of each country is 0.
pub fn compute_differences(source: &Table) -> Table {
    let mut rows: Vec<(String, i64, f64, f64)> = Vec::new();
    for record in &source.rows {
        let Some(country) = record.get("Country").and_then(Value::as_str) else {
            continue;
        };
        let Some(year) = record.get("Year").and_then(Value::as_i64) else {
            continue;
        };
        let Some(healthcare) = record.get("Healthcare expenditure").and_then(Value::as_f64)
        else {
            continue;
        };
        let Some(life) = record.get("Life Expectency").and_then(Value::as_f64) else {
            continue;
        };
        rows.push((country.to_string(), year, healthcare, life));
    }
    rows.sort_by(|a, b| a.0.cmp(&b.0).then(a.1.cmp(&b.1)));

    let mut out_rows = Vec::with_capacity(rows.len());
    for (i, (country, year, healthcare, life)) in rows.iter().enumerate() {
        let previous = if i > 0 { rows.get(i - 1) } else { None };
        let (healthcare_diff, life_diff) = match previous {
            Some((prev_country, _, prev_healthcare, prev_life)) if prev_country == country => {
                (healthcare - prev_healthcare, life - prev_life)
            }
            _ => (0.0, 0.0),
        };
        let mut row = Record::new();
        row.insert("Country".into(), Value::String(country.clone()));
        row.insert("Year".into(), Value::Integer(*year));
        row.insert("Healthcare_diff".into(), Value::Float(healthcare_diff));
        row.insert("LifeExpectancy_diff".into(), Value::Float(life_diff));
        out_rows.push(row);
    }
    Table::new(
        vec![
            "Country".into(),
            "Year".into(),
            "Healthcare_diff".into(),
            "LifeExpectancy_diff".into(),
        ],
        out_rows,
    )
}

/// Load the source, compute the deltas, and persist the snapshot CSV.
/// The snapshot is write-only: nothing ever reads it back.
pub fn load_difference_data(config: &DataConfig) -> Result<Table, DataError> {
    let path = config.source_path(Dataset::Difference);
    let source = read_table(&path)?;
    for column in ["Country", "Year", "Healthcare expenditure", "Life Expectency"] {
        require_column(&source, &path, column)?;
    }
    let table = compute_differences(&source);
    write_table_csv(&table, &config.snapshot_path)?;
    log::debug!(
        "difference: snapshot of {} rows written to {}",
        table.len(),
        config.snapshot_path.display()
    );
    Ok(table)
}

/// Write a table as CSV, overwriting any previous content.
pub fn write_table_csv(table: &Table, path: &Path) -> Result<(), DataError> {
    let mut writer = csv::Writer::from_path(path).map_err(|e| DataError::csv(path, e))?;
    writer
        .write_record(&table.columns)
        .map_err(|e| DataError::csv(path, e))?;
    for row in &table.rows {
        let cells: Vec<String> = table
            .columns
            .iter()
            .map(|column| row.get(column.as_str()).map(ToString::to_string).unwrap_or_default())
            .collect();
        writer
            .write_record(&cells)
            .map_err(|e| DataError::csv(path, e))?;
    }
    writer.flush().map_err(|e| DataError::io(path, e))?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Commodity trade (treemap)
// ---------------------------------------------------------------------------

/// Trade values with `Trade (USD)` coerced numeric; rows where it is missing
/// or unparseable are dropped. Everything else passes through.
pub fn load_trade_data(config: &DataConfig) -> Result<Table, DataError> {
    let path = config.source_path(Dataset::Trade);
    let source = read_table(&path)?;
    require_column(&source, &path, "Trade (USD)")?;

    let rows = source
        .rows
        .iter()
        .filter(|record| {
            record
                .get("Trade (USD)")
                .is_some_and(|v| v.as_f64().is_some())
        })
        .cloned()
        .collect();
    Ok(Table::new(source.columns.clone(), rows))
}

// ---------------------------------------------------------------------------
// Tourism (circle packing) and diplomacy (force-directed graph)
// ---------------------------------------------------------------------------

/// Tourism revenue rows, as-is; [`hierarchy::build_hierarchy`] nests them.
pub fn load_tourism_data(config: &DataConfig) -> Result<Table, DataError> {
    let path = config.source_path(Dataset::Tourism);
    let source = read_table(&path)?;
    for column in hierarchy::TOURISM_COLUMNS {
        require_column(&source, &path, column)?;
    }
    Ok(source)
}

/// The nested country → region → tourism-type tree the chart consumes.
pub fn load_tourism_hierarchy(config: &DataConfig) -> Result<HierarchyNode, DataError> {
    Ok(hierarchy::build_hierarchy(&load_tourism_data(config)?))
}

/// Diplomatic-post relations between the five focus countries and host
/// cities.
pub fn load_diplomacy_data(config: &DataConfig) -> Result<DiplomacyGraph, DataError> {
    let path = config.source_path(Dataset::Diplomacy);
    let source = read_table(&path)?;
    require_column(&source, &path, "City")?;
    for country in graph::DIPLOMACY_COUNTRIES {
        require_column(&source, &path, country)?;
    }
    Ok(graph::build_graph(&source))
}
