// src/error.rs

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, PickstatError>;

#[derive(Error, Debug)]
pub enum PickstatError {
    /// Source file missing or unreadable.
    #[error("failed to load {}: {source}", path.display())]
    DataLoad {
        path: PathBuf,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("no more questions in category '{0}'")]
    EmptyPool(String),

    /// Normalization produced no usable rows; usually a format mismatch.
    #[error("no data rows found in {0}")]
    EmptyResult(String),

    #[error("select at least one year and one household type")]
    EmptySelection,

    #[error("invalid config {}: {source}", path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl PickstatError {
    pub fn data_load(
        path: impl Into<PathBuf>,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        PickstatError::DataLoad {
            path: path.into(),
            source: source.into(),
        }
    }

    /// Errors the user can act on without restarting the view.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            PickstatError::EmptyPool(_) | PickstatError::EmptySelection
        )
    }
}
