use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// Dataset registry
// ---------------------------------------------------------------------------

/// The datasets the dashboard knows about, one per chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dataset {
    Mobile,
    Gdp,
    Population,
    Freight,
    Passengers,
    Electricity,
    Disclosure,
    Childrens,
    Expenditure,
    Difference,
    Diplomacy,
    Trade,
    Tourism,
}

impl Dataset {
    pub const ALL: [Dataset; 13] = [
        Dataset::Mobile,
        Dataset::Gdp,
        Dataset::Population,
        Dataset::Freight,
        Dataset::Passengers,
        Dataset::Electricity,
        Dataset::Disclosure,
        Dataset::Childrens,
        Dataset::Expenditure,
        Dataset::Difference,
        Dataset::Diplomacy,
        Dataset::Trade,
        Dataset::Tourism,
    ];

    /// Stable name used for CLI selection and output file names.
    pub fn name(&self) -> &'static str {
        match self {
            Dataset::Mobile => "mobile",
            Dataset::Gdp => "gdp",
            Dataset::Population => "population",
            Dataset::Freight => "freight",
            Dataset::Passengers => "passengers",
            Dataset::Electricity => "electricity",
            Dataset::Disclosure => "disclosure",
            Dataset::Childrens => "childrens",
            Dataset::Expenditure => "expenditure",
            Dataset::Difference => "difference",
            Dataset::Diplomacy => "diplomacy",
            Dataset::Trade => "trade",
            Dataset::Tourism => "tourism",
        }
    }

    /// Expected file name under the data directory. A renamed source file is
    /// a breaking change, not a recoverable condition.
    pub fn file_name(&self) -> &'static str {
        match self {
            Dataset::Mobile => "mobile-subscriptions.csv",
            Dataset::Gdp => "gdp_per_capita.csv",
            Dataset::Population => "Population.csv",
            Dataset::Freight => "freight.csv",
            Dataset::Passengers => "passengers.csv",
            Dataset::Electricity => "electricity.csv",
            Dataset::Disclosure => "disclosure_extent.csv",
            Dataset::Childrens => "Childrens_state.csv",
            Dataset::Expenditure => "expenditure.csv",
            Dataset::Difference => "difference.csv",
            Dataset::Diplomacy => "Book2.csv",
            Dataset::Trade => "Trade.csv",
            Dataset::Tourism => "tourism.csv",
        }
    }

    /// Look a dataset up by its CLI name.
    pub fn from_name(name: &str) -> Option<Dataset> {
        Dataset::ALL.iter().copied().find(|d| d.name() == name)
    }
}

// ---------------------------------------------------------------------------
// DataConfig – where the source files live
// ---------------------------------------------------------------------------

/// Injected source locations, so tests can substitute fixture directories
/// instead of the real `data/` extracts.
#[derive(Debug, Clone)]
pub struct DataConfig {
    /// Directory holding one CSV per dataset.
    pub data_dir: PathBuf,
    /// Where the difference loader writes its derived snapshot.
    pub snapshot_path: PathBuf,
}

impl DataConfig {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            snapshot_path: PathBuf::from("prepared_difference_data.csv"),
        }
    }

    pub fn with_snapshot_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.snapshot_path = path.into();
        self
    }

    /// Source file for a dataset.
    pub fn source_path(&self, dataset: Dataset) -> PathBuf {
        self.data_dir.join(dataset.file_name())
    }
}

impl Default for DataConfig {
    fn default() -> Self {
        Self::new(Path::new("data"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_dataset_resolves_by_name() {
        for dataset in Dataset::ALL {
            assert_eq!(Dataset::from_name(dataset.name()), Some(dataset));
        }
        assert_eq!(Dataset::from_name("unknown"), None);
    }

    #[test]
    fn source_path_joins_data_dir() {
        let config = DataConfig::new("/tmp/fixtures");
        assert_eq!(
            config.source_path(Dataset::Gdp),
            PathBuf::from("/tmp/fixtures/gdp_per_capita.csv")
        );
    }
}
