//! SalesDash - sales performance dashboard
//!
//! Loads a CSV of sales transactions, computes five aggregate views and
//! serves them as collapsible chart cards on a single page.
//!
//! Exit codes:
//!   0 - Success (server stopped cleanly, or --check / --init-config done)
//!   1 - Startup error (bad arguments, unreadable data or chart files, bind failure)

mod analysis;
mod cli;
mod config;
mod dashboard;
mod error;
mod loader;
mod models;
mod report;
mod server;
mod toggle;

use anyhow::{Context, Result};
use cli::Args;
use config::{Config, DEFAULT_CONFIG_FILE};
use dashboard::Dashboard;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, error, info, warn};
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command-line arguments
    let args = Args::parse_args();

    // Validate arguments
    if let Err(e) = args.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    // Handle --init-config early (no logging needed)
    if args.init_config {
        return handle_init_config();
    }

    // Config is resolved before logging so `[server] debug` can raise the level
    let (mut config, origin) = match load_config(&args) {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
    };
    config.merge_with_args(&args);

    init_logging(config.log_level(&args));

    info!("SalesDash v{}", env!("CARGO_PKG_VERSION"));
    debug!("Arguments: {:?}", args);
    log_config_origin(&origin);

    if let Err(e) = run(config, args.check).await {
        error!("Startup failed: {:#}", e);
        eprintln!("\n❌ Error: {:#}", e);
        std::process::exit(1);
    }

    Ok(())
}

/// Handle --init-config: generate a default .salesdash.toml.
fn handle_init_config() -> Result<()> {
    let path = std::path::Path::new(DEFAULT_CONFIG_FILE);

    if path.exists() {
        eprintln!(
            "⚠️  {} already exists. Remove it first or edit it manually.",
            DEFAULT_CONFIG_FILE
        );
        std::process::exit(1);
    }

    let content = Config::default_toml();
    std::fs::write(path, &content)
        .with_context(|| format!("Failed to write {}", DEFAULT_CONFIG_FILE))?;

    println!("✅ Created {} with default settings.", DEFAULT_CONFIG_FILE);
    println!("   Edit it to set the data file, chart directory, host and port.");
    Ok(())
}

/// Initialize logging at the given level.
fn init_logging(level: tracing::Level) {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
    }
}

/// Load everything once, then serve (or print and exit with --check).
async fn run(config: Config, check: bool) -> Result<()> {
    let dataset = loader::load_transactions(&config.data.path)?;
    let charts = report::load_charts(&config.charts)?;
    let dashboard = Dashboard::build(&dataset, charts, config.page.clone());

    if check {
        print_check(&dashboard);
        return Ok(());
    }

    server::serve(Arc::new(dashboard), &config.server).await
}

/// Handle --check: print the insights that would be served.
fn print_check(dashboard: &Dashboard) {
    println!(
        "\n📊 {} transactions from {}\n",
        dashboard.transaction_count,
        dashboard.source.display()
    );

    for (view, insights) in dashboard.insights.iter() {
        println!("   {} [{}]", view.title(), view.id());
        for line in insights.lines() {
            println!("     - {}", line);
        }
    }

    println!("\n✅ Data and charts loaded. Nothing was served.");
}

/// Where the configuration came from, reported once logging is up.
enum ConfigOrigin {
    Explicit(PathBuf),
    DefaultFile,
    Builtin,
    Fallback(anyhow::Error),
}

/// Load configuration from file or use defaults.
///
/// An explicit `--config` that cannot be read or parsed is an error; a broken
/// default file falls back to built-in defaults.
fn load_config(args: &Args) -> Result<(Config, ConfigOrigin)> {
    // Try explicit config path
    if let Some(ref config_path) = args.config {
        let config = Config::load(config_path)?;
        return Ok((config, ConfigOrigin::Explicit(config_path.clone())));
    }

    // Try default location
    match Config::load_default() {
        Ok(Some(config)) => Ok((config, ConfigOrigin::DefaultFile)),
        Ok(None) => Ok((Config::default(), ConfigOrigin::Builtin)),
        Err(e) => Ok((Config::default(), ConfigOrigin::Fallback(e))),
    }
}

fn log_config_origin(origin: &ConfigOrigin) {
    match origin {
        ConfigOrigin::Explicit(path) => info!("Loaded config from: {}", path.display()),
        ConfigOrigin::DefaultFile => info!("Loaded default config from {}", DEFAULT_CONFIG_FILE),
        ConfigOrigin::Builtin => debug!("No config file found, using defaults"),
        ConfigOrigin::Fallback(e) => warn!("Failed to load config: {:#}", e),
    }
}
