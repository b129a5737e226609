//! Error types for loading data and building the dashboard.

use crate::models::ViewId;
use std::path::PathBuf;
use thiserror::Error;

/// Failures that abort startup or reject a request.
#[derive(Debug, Error)]
pub enum DashboardError {
    /// The CSV file could not be opened or its header row read.
    #[error("failed to open data file {}: {source}", path.display())]
    DataOpen {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// A required column is absent from the CSV header.
    #[error("data file {} is missing required column `{column}`", path.display())]
    MissingColumn { path: PathBuf, column: &'static str },

    /// A row could not be deserialized into a transaction.
    #[error("failed to parse {} at line {line}: {source}", path.display())]
    DataLoad {
        path: PathBuf,
        line: u64,
        #[source]
        source: csv::Error,
    },

    /// The CSV parsed but held no rows.
    #[error("data file {} contains no transactions", path.display())]
    EmptyDataset { path: PathBuf },

    /// A chart artifact could not be read.
    #[error("failed to read chart for '{view}' from {}: {source}", path.display())]
    ArtifactRead {
        view: ViewId,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A wire id did not name one of the five views.
    #[error("unknown view id: {0}")]
    UnknownView(String),
}

pub type Result<T> = std::result::Result<T, DashboardError>;
