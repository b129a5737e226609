//! CSV transaction loader.
//!
//! Reads the input CSV once at startup into an immutable [`Dataset`].
//! Expected columns (others are ignored):
//!   customer_id, month, tran_amount

use crate::error::{DashboardError, Result};
use crate::models::{Dataset, Transaction};
use chrono::Utc;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info};

/// Columns that must be present in the header row.
pub const REQUIRED_COLUMNS: [&str; 3] = ["customer_id", "month", "tran_amount"];

/// Load transactions from a CSV file.
pub fn load_transactions(path: &Path) -> Result<Dataset> {
    info!("Loading transactions from {}", path.display());

    let file = std::fs::File::open(path).map_err(|e| DashboardError::DataOpen {
        path: path.to_path_buf(),
        source: e.into(),
    })?;

    load_from_reader(file, path)
}

/// Load transactions from any reader. `origin` is used in errors and
/// recorded as the dataset source.
pub fn load_from_reader<R: Read>(reader: R, origin: &Path) -> Result<Dataset> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = csv_reader
        .headers()
        .map_err(|e| DashboardError::DataOpen {
            path: origin.to_path_buf(),
            source: e,
        })?
        .clone();

    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == column) {
            return Err(DashboardError::MissingColumn {
                path: origin.to_path_buf(),
                column,
            });
        }
    }

    let mut transactions = Vec::new();
    for result in csv_reader.deserialize::<Transaction>() {
        let transaction = result.map_err(|e| DashboardError::DataLoad {
            path: origin.to_path_buf(),
            line: e.position().map(|p| p.line()).unwrap_or(0),
            source: e,
        })?;
        transactions.push(transaction);
    }

    let dataset = Dataset {
        source: origin.to_path_buf(),
        transactions,
        loaded_at: Utc::now(),
    };

    if dataset.is_empty() {
        return Err(DashboardError::EmptyDataset {
            path: origin.to_path_buf(),
        });
    }

    debug!(
        "Loaded {} transactions from {}",
        dataset.len(),
        origin.display()
    );

    Ok(dataset)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn load_str(csv: &str) -> Result<Dataset> {
        load_from_reader(csv.as_bytes(), Path::new("test.csv"))
    }

    #[test]
    fn test_load_basic_table() {
        let dataset =
            load_str("customer_id,month,tran_amount\n1,Jan,100\n2,Jan,50\n1,Feb,200\n").unwrap();

        assert!(!dataset.is_empty());
        assert_eq!(dataset.len(), 3);
        assert_eq!(dataset.transactions[0].customer_id, "1");
        assert_eq!(dataset.transactions[2].month, "Feb");
        assert_eq!(dataset.transactions[2].tran_amount, 200.0);
    }

    #[test]
    fn test_extra_columns_and_whitespace_ignored() {
        let dataset = load_str(
            "store, customer_id , month, tran_amount\nA, CS1112 , 2011-06 , 56.5\n",
        )
        .unwrap();

        let t = &dataset.transactions[0];
        assert_eq!(t.customer_id, "CS1112");
        assert_eq!(t.month, "2011-06");
        assert_eq!(t.tran_amount, 56.5);
    }

    #[test]
    fn test_missing_column_rejected() {
        let err = load_str("customer_id,tran_amount\n1,100\n").unwrap_err();
        assert!(matches!(
            err,
            DashboardError::MissingColumn {
                column: "month",
                ..
            }
        ));
    }

    #[test]
    fn test_bad_amount_reports_line() {
        let err = load_str("customer_id,month,tran_amount\n1,Jan,100\n2,Jan,lots\n").unwrap_err();
        match err {
            DashboardError::DataLoad { line, .. } => assert_eq!(line, 3),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_empty_table_rejected() {
        let err = load_str("customer_id,month,tran_amount\n").unwrap_err();
        assert!(matches!(err, DashboardError::EmptyDataset { .. }));

        let dataset = Dataset {
            source: std::path::PathBuf::from("none.csv"),
            transactions: Vec::new(),
            loaded_at: Utc::now(),
        };
        assert!(dataset.is_empty());
        assert_eq!(dataset.len(), 0);
    }

    #[test]
    fn test_load_from_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("sales.csv");
        std::fs::write(&path, "customer_id,month,tran_amount\n7,Mar,12\n").unwrap();

        let dataset = load_transactions(&path).unwrap();
        assert_eq!(dataset.source, path);
        assert_eq!(dataset.len(), 1);
    }

    #[test]
    fn test_missing_file_is_open_error() {
        let temp_dir = TempDir::new().unwrap();
        let err = load_transactions(&temp_dir.path().join("nope.csv")).unwrap_err();
        assert!(matches!(err, DashboardError::DataOpen { .. }));
    }
}
