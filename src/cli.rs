//! Command-line interface argument parsing.
//!
//! This module handles all CLI argument parsing using clap,
//! including validation. Options left unset fall back to the config file
//! and then to built-in defaults.

use clap::Parser;
use std::path::PathBuf;

/// SalesDash - sales performance dashboard
///
/// Loads a CSV of transactions, computes monthly totals, monthly averages,
/// top customers, top orders and monthly counts, and serves them as
/// collapsible chart cards.
///
/// Examples:
///   salesdash --data projectds.csv
///   salesdash --data sales.csv --charts-dir charts --port 8080
///   salesdash --data sales.csv --check
///   salesdash --init-config
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Args {
    /// Transactions CSV (columns: customer_id, month, tran_amount)
    ///
    /// Default: from config or projectds.csv
    #[arg(short, long, value_name = "FILE")]
    pub data: Option<PathBuf>,

    /// Directory containing the pre-rendered chart HTML files
    #[arg(long, value_name = "DIR")]
    pub charts_dir: Option<PathBuf>,

    /// Address to bind the server to
    #[arg(long, value_name = "HOST")]
    pub host: Option<String>,

    /// Port to listen on
    #[arg(short, long, value_name = "PORT")]
    pub port: Option<u16>,

    /// Debug mode: trace every request and log at debug level
    #[arg(long)]
    pub debug: bool,

    /// Path to configuration file
    ///
    /// If not specified, looks for .salesdash.toml in the current directory
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,

    /// Run in quiet mode (errors only)
    #[arg(short, long)]
    pub quiet: bool,

    /// Load the data and charts, print the insights and exit without serving
    #[arg(long)]
    pub check: bool,

    /// Generate a default .salesdash.toml configuration file
    #[arg(long)]
    pub init_config: bool,
}

impl Args {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate the parsed arguments.
    pub fn validate(&self) -> Result<(), String> {
        if self.init_config {
            return Ok(());
        }

        if self.verbose && self.quiet {
            return Err("Cannot use both --verbose and --quiet".to_string());
        }

        if self.port == Some(0) {
            return Err("Port must be between 1 and 65535".to_string());
        }

        if let Some(ref data) = self.data {
            if !data.is_file() {
                return Err(format!("Data file does not exist: {}", data.display()));
            }
        }

        if let Some(ref dir) = self.charts_dir {
            if !dir.is_dir() {
                return Err(format!(
                    "Charts directory does not exist: {}",
                    dir.display()
                ));
            }
        }

        Ok(())
    }
}
