use std::path::PathBuf;

/// Errors surfaced by the data layer.
///
/// A failing loader is fatal to its own chart only; callers must never
/// substitute empty data for an error.
#[derive(Debug, thiserror::Error)]
pub enum DataError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse CSV {path}: {message}")]
    Csv { path: PathBuf, message: String },

    #[error("missing column {column:?} in {path}")]
    MissingColumn { path: PathBuf, column: String },

    #[error("unexpected schema in {path}: {message}")]
    UnexpectedSchema { path: PathBuf, message: String },
}

impl DataError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn csv(path: impl Into<PathBuf>, error: csv::Error) -> Self {
        Self::Csv {
            path: path.into(),
            message: error.to_string(),
        }
    }

    pub(crate) fn schema(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::UnexpectedSchema {
            path: path.into(),
            message: message.into(),
        }
    }
}
