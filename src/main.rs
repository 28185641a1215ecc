use std::fs;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;

use country_dash::{load_dataset, ChartData, DataConfig, Dataset};

/// Export dashboard chart data as JSON, one file per dataset.
#[derive(Debug, Parser)]
#[command(name = "country-dash", version)]
struct Cli {
    /// Directory containing the source CSV files.
    #[arg(long, default_value = "data")]
    data_dir: PathBuf,

    /// Directory the per-chart JSON files are written to.
    #[arg(long, default_value = "out")]
    out_dir: PathBuf,

    /// Datasets to export (default: all).
    datasets: Vec<String>,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let selected: Vec<Dataset> = if cli.datasets.is_empty() {
        Dataset::ALL.to_vec()
    } else {
        let mut selected = Vec::new();
        for name in &cli.datasets {
            match Dataset::from_name(name) {
                Some(dataset) => selected.push(dataset),
                None => bail!("unknown dataset {name:?}"),
            }
        }
        selected
    };

    let config = DataConfig::new(&cli.data_dir);
    fs::create_dir_all(&cli.out_dir)
        .with_context(|| format!("creating {}", cli.out_dir.display()))?;

    for dataset in selected {
        let data = load_dataset(&config, dataset)
            .with_context(|| format!("loading dataset {:?}", dataset.name()))?;
        let out_path = cli.out_dir.join(format!("{}.json", dataset.name()));
        let json = serde_json::to_string_pretty(&data).context("serializing chart data")?;
        fs::write(&out_path, json).with_context(|| format!("writing {}", out_path.display()))?;

        let summary = match &data {
            ChartData::Table(table) => format!("{} rows", table.len()),
            ChartData::Hierarchy(root) => format!("{} countries", root.children.len()),
            ChartData::Graph(graph) => {
                format!("{} nodes, {} edges", graph.nodes.len(), graph.edges.len())
            }
        };
        log::info!("{}: {} → {}", dataset.name(), summary, out_path.display());
    }
    Ok(())
}
