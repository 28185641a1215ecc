use std::fs;

use tempfile::TempDir;

use country_dash::data::loader::{
    load_dataset, load_diplomacy_data, load_difference_data, load_electricity_data,
    load_expenditure_data, load_freight_data, load_gdp_data, load_mobile_data,
    load_population_data, load_tourism_hierarchy, load_trade_data,
};
use country_dash::data::model::Value;
use country_dash::{DataConfig, DataError, Dataset};

fn fixture_config(dir: &TempDir) -> DataConfig {
    DataConfig::new(dir.path())
        .with_snapshot_path(dir.path().join("prepared_difference_data.csv"))
}

fn write_fixture(dir: &TempDir, name: &str, content: &str) {
    fs::write(dir.path().join(name), content).unwrap();
}

#[test]
fn mobile_restricts_years_and_renames_columns() {
    let dir = TempDir::new().unwrap();
    write_fixture(
        &dir,
        "mobile-subscriptions.csv",
        "Country or Area,Year,Value\n\
         Chile,2009,55.0\n\
         Chile,2010,60.0\n\
         Chile,2020,130.0\n\
         Chile,2021,140.0\n\
         Norway,2015,not a number\n\
         Norway,2016,110.5\n",
    );

    let table = load_mobile_data(&fixture_config(&dir)).unwrap();
    assert_eq!(table.columns, ["Country", "Year", "Subscriptions"]);
    assert_eq!(table.len(), 3);
    for row in &table.rows {
        let year = row.get("Year").and_then(Value::as_i64).unwrap();
        assert!((2010..=2020).contains(&year));
        assert_eq!(row.len(), 3);
    }
}

#[test]
fn gdp_keeps_2020_sorts_descending_and_drops_blanks() {
    let dir = TempDir::new().unwrap();
    write_fixture(
        &dir,
        "gdp_per_capita.csv",
        "Country or Area,Year,Value\n\
         Chile,2020,13000\n\
         Norway,2020,67000\n\
         Ghana,2020,\n\
         Japan,2019,40000\n\
         Sweden,2020,52000\n\
         Peru,2020,13000\n",
    );

    let table = load_gdp_data(&fixture_config(&dir)).unwrap();
    let countries: Vec<&str> = table
        .rows
        .iter()
        .map(|r| r.get("Country").and_then(Value::as_str).unwrap())
        .collect();
    // Stable descending sort: Chile appears before Peru on the tied value.
    assert_eq!(countries, ["Norway", "Sweden", "Chile", "Peru"]);
    for row in &table.rows {
        assert!(row.get("GDP").and_then(Value::as_f64).is_some());
    }
}

#[test]
fn population_keeps_medium_variant_2020() {
    let dir = TempDir::new().unwrap();
    write_fixture(
        &dir,
        "Population.csv",
        "Country or Area,Year(s),Variant,Value\n\
         Chile,2020,Medium,19.0\n\
         Chile,2020,High,20.0\n\
         Chile,2019,Medium,18.5\n",
    );

    let table = load_population_data(&fixture_config(&dir)).unwrap();
    assert_eq!(table.len(), 1);
    assert_eq!(
        table.rows[0].get("Variant"),
        Some(&Value::String("Medium".into()))
    );
}

#[test]
fn freight_applies_country_allowlist_and_year() {
    let dir = TempDir::new().unwrap();
    write_fixture(
        &dir,
        "freight.csv",
        "Country or Area,Year,Value\n\
         India,2020,100\n\
         France,2020,50\n\
         India,2019,80\n",
    );

    let table = load_freight_data(&fixture_config(&dir)).unwrap();
    assert_eq!(table.len(), 1);
    assert_eq!(
        table.rows[0].get("Country or Area"),
        Some(&Value::String("India".into()))
    );
}

#[test]
fn electricity_pivots_long_to_wide() {
    let dir = TempDir::new().unwrap();
    write_fixture(
        &dir,
        "electricity.csv",
        "Country,Commodity - Transaction,2018,2019\n\
         Chile,Electricity - total solar production,1.5,2.5\n\
         Chile,Electricity - total wind production,3.0,\n\
         Peru,Electricity - total solar production,7.0,8.0\n",
    );

    let table = load_electricity_data(&fixture_config(&dir)).unwrap();
    assert_eq!(
        table.columns,
        ["Country", "2018_solar", "2018_wind", "2019_solar", "2019_wind"]
    );
    // One row per distinct country, each carrying the full field set.
    assert_eq!(table.len(), 2);
    for row in &table.rows {
        assert_eq!(row.len(), 5);
    }
    let chile = &table.rows[0];
    assert_eq!(chile.get("Country"), Some(&Value::String("Chile".into())));
    assert_eq!(chile.get("2018_solar"), Some(&Value::Float(1.5)));
    assert_eq!(chile.get("2019_wind"), Some(&Value::Null));
    let peru = &table.rows[1];
    assert_eq!(peru.get("2018_wind"), Some(&Value::Null));
    assert_eq!(peru.get("2019_solar"), Some(&Value::Float(8.0)));
}

#[test]
fn electricity_rejects_malformed_commodity_label() {
    let dir = TempDir::new().unwrap();
    write_fixture(
        &dir,
        "electricity.csv",
        "Country,Commodity - Transaction,2018\n\
         Chile,Electricity,1.0\n",
    );

    let error = load_electricity_data(&fixture_config(&dir)).unwrap_err();
    assert!(matches!(error, DataError::UnexpectedSchema { .. }));
}

#[test]
fn electricity_requires_year_columns() {
    let dir = TempDir::new().unwrap();
    write_fixture(
        &dir,
        "electricity.csv",
        "Country,Commodity - Transaction\n\
         Chile,Electricity - total solar production\n",
    );

    let error = load_electricity_data(&fixture_config(&dir)).unwrap_err();
    assert!(matches!(error, DataError::UnexpectedSchema { .. }));
}

#[test]
fn expenditure_groups_and_sums_numeric_columns() {
    let dir = TempDir::new().unwrap();
    write_fixture(
        &dir,
        "expenditure.csv",
        "Country,Year,Category,Expenditure (% of GDP),Notes\n\
         Chile,2020,Health,2.5,primary\n\
         Chile,2020,Health,1.5,secondary\n\
         Chile,2020,Education,4.0,\n\
         Peru,2020,Health,3.0,x\n",
    );

    let table = load_expenditure_data(&fixture_config(&dir)).unwrap();
    // Non-numeric Notes column is dropped; one row per group.
    assert_eq!(
        table.columns,
        ["Country", "Year", "Category", "Expenditure (% of GDP)"]
    );
    assert_eq!(table.len(), 3);
    let chile_health = table
        .rows
        .iter()
        .find(|r| {
            r.get("Country").and_then(Value::as_str) == Some("Chile")
                && r.get("Category").and_then(Value::as_str) == Some("Health")
        })
        .unwrap();
    assert_eq!(
        chile_health.get("Expenditure (% of GDP)"),
        Some(&Value::Float(4.0))
    );
}

#[test]
fn difference_first_year_is_zero_and_snapshot_is_written() {
    let dir = TempDir::new().unwrap();
    write_fixture(
        &dir,
        "difference.csv",
        "Country,Year,Healthcare expenditure,Life Expectency\n\
         Beta,2011,1000,70.0\n\
         Beta,2010,900,69.5\n\
         Alpha,2010,500,60\n\
         Alpha,2011,450,60.5\n\
         Alpha,2012,bad,61\n",
    );

    let config = fixture_config(&dir);
    let table = load_difference_data(&config).unwrap();
    assert_eq!(
        table.columns,
        ["Country", "Year", "Healthcare_diff", "LifeExpectancy_diff"]
    );
    // The unparseable Alpha 2012 row is dropped before differencing.
    assert_eq!(table.len(), 4);

    let diffs: Vec<(i64, f64, f64)> = table
        .rows
        .iter()
        .map(|r| {
            (
                r.get("Year").and_then(Value::as_i64).unwrap(),
                r.get("Healthcare_diff").and_then(Value::as_f64).unwrap(),
                r.get("LifeExpectancy_diff").and_then(Value::as_f64).unwrap(),
            )
        })
        .collect();
    // Alpha sorted first: 2010 is its first year, 2011 diffs may be negative.
    assert_eq!(diffs[0], (2010, 0.0, 0.0));
    assert_eq!(diffs[1], (2011, -50.0, 0.5));
    // Beta restarts at zero; its rows were out of order in the source.
    assert_eq!(diffs[2], (2010, 0.0, 0.0));
    assert_eq!(diffs[3], (2011, 100.0, 0.5));

    let snapshot = fs::read_to_string(&config.snapshot_path).unwrap();
    assert!(snapshot.starts_with("Country,Year,Healthcare_diff,LifeExpectancy_diff"));
    assert!(snapshot.contains("Alpha,2011,-50,0.5"));

    // Re-running overwrites rather than appends.
    load_difference_data(&config).unwrap();
    assert_eq!(fs::read_to_string(&config.snapshot_path).unwrap(), snapshot);
}

#[test]
fn trade_drops_rows_without_numeric_trade_value() {
    let dir = TempDir::new().unwrap();
    write_fixture(
        &dir,
        "Trade.csv",
        "Country or Area,Year,Commodity,Trade (USD)\n\
         Chile,2020,Cereals,100000\n\
         Chile,2020,Fuels,n/a\n\
         Chile,2020,Machinery,\n",
    );

    let table = load_trade_data(&fixture_config(&dir)).unwrap();
    assert_eq!(table.len(), 1);
    assert_eq!(
        table.columns,
        ["Country or Area", "Year", "Commodity", "Trade (USD)"]
    );
}

#[test]
fn tourism_missing_column_is_a_schema_error() {
    let dir = TempDir::new().unwrap();
    write_fixture(
        &dir,
        "tourism.csv",
        "Country,Tourism Type,Tourist Revenue (billion USD)\n\
         Spain,Inbound,12.5\n",
    );

    let error = load_tourism_hierarchy(&fixture_config(&dir)).unwrap_err();
    assert!(matches!(
        error,
        DataError::MissingColumn { ref column, .. } if column == "Region"
    ));
}

#[test]
fn diplomacy_builds_edges_and_city_nodes() {
    let dir = TempDir::new().unwrap();
    // Padded header exercises the whitespace trim.
    write_fixture(
        &dir,
        "Book2.csv",
        "City, Canada ,China,India,Russia,United States\n\
         Ottawa,Embassy,,,,\n\
         Geneva,,,,,\n",
    );

    let graph = load_diplomacy_data(&fixture_config(&dir)).unwrap();
    assert_eq!(graph.edges.len(), 1);
    assert_eq!(graph.edges[0].source, "Canada");
    assert_eq!(graph.edges[0].target, "Ottawa");
    // 5 countries + 2 cities, edge or no edge.
    assert_eq!(graph.nodes.len(), 7);
    assert!(graph.nodes.iter().any(|n| n.name == "Geneva"));
}

#[test]
fn missing_source_file_is_an_io_error() {
    let dir = TempDir::new().unwrap();
    let error = load_gdp_data(&fixture_config(&dir)).unwrap_err();
    assert!(matches!(error, DataError::Io { .. }));
}

#[test]
fn every_loader_is_deterministic() {
    let dir = TempDir::new().unwrap();
    write_all_fixtures(&dir);
    let config = fixture_config(&dir);

    for dataset in Dataset::ALL {
        let first = serde_json::to_string(&load_dataset(&config, dataset).unwrap()).unwrap();
        let second = serde_json::to_string(&load_dataset(&config, dataset).unwrap()).unwrap();
        assert_eq!(first, second, "dataset {} not deterministic", dataset.name());
    }
}

fn write_all_fixtures(dir: &TempDir) {
    write_fixture(
        dir,
        "mobile-subscriptions.csv",
        "Country or Area,Year,Value\nChile,2015,90.0\n",
    );
    write_fixture(
        dir,
        "gdp_per_capita.csv",
        "Country or Area,Year,Value\nChile,2020,13000\nNorway,2020,67000\n",
    );
    write_fixture(
        dir,
        "Population.csv",
        "Country or Area,Year(s),Variant,Value\nChile,2020,Medium,19.0\n",
    );
    write_fixture(dir, "freight.csv", "Country or Area,Year,Value\nIndia,2020,100\n");
    write_fixture(
        dir,
        "passengers.csv",
        "Country or Area,Year,Value\nIndia,2021,500000\n",
    );
    write_fixture(
        dir,
        "electricity.csv",
        "Country,Commodity - Transaction,2018,2019\n\
         Chile,Electricity - total solar production,1.5,2.5\n",
    );
    write_fixture(dir, "disclosure_extent.csv", "Country,Year,Value\nChile,2015,7\n");
    write_fixture(
        dir,
        "Childrens_state.csv",
        "Country,Infant Mortality\nChile,6.2\n",
    );
    write_fixture(
        dir,
        "expenditure.csv",
        "Country,Year,Category,Expenditure (% of GDP)\nChile,2020,Health,2.5\n",
    );
    write_fixture(
        dir,
        "difference.csv",
        "Country,Year,Healthcare expenditure,Life Expectency\n\
         Chile,2010,500,75.0\nChile,2011,550,75.4\n",
    );
    write_fixture(
        dir,
        "Book2.csv",
        "City,Canada,China,India,Russia,United States\nOttawa,Embassy,,,,\n",
    );
    write_fixture(
        dir,
        "Trade.csv",
        "Country or Area,Year,Commodity,Trade (USD)\nChile,2020,Cereals,100000\n",
    );
    write_fixture(
        dir,
        "tourism.csv",
        "Country,Region,Tourism Type,Tourist Revenue (billion USD)\n\
         Spain,Catalonia,Inbound,12.5\n",
    );
}
