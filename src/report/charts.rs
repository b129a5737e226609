//! Chart artifact loading.
//!
//! Each view has one pre-rendered HTML chart. The files are read once at
//! startup and embedded verbatim; their contents are never parsed.

use crate::config::ChartsConfig;
use crate::error::{DashboardError, Result};
use crate::models::{PerView, ViewId};
use std::path::PathBuf;
use tracing::{debug, warn};

/// Resolve the chart path for every view.
pub fn chart_paths(config: &ChartsConfig) -> PerView<PathBuf> {
    for key in config.files.keys() {
        if key.parse::<ViewId>().is_err() {
            warn!("Ignoring chart override for unknown view '{}'", key);
        }
    }

    PerView::from_fn(|view| {
        let file = config
            .files
            .get(view.id())
            .map(String::as_str)
            .unwrap_or(view.chart_file());
        config.dir.join(file)
    })
}

/// Read every chart artifact. Any missing file is an error.
pub fn load_charts(config: &ChartsConfig) -> Result<PerView<String>> {
    let paths = chart_paths(config);
    let mut charts = PerView::<String>::default();

    for (view, path) in paths.iter() {
        let content =
            std::fs::read_to_string(path).map_err(|source| DashboardError::ArtifactRead {
                view,
                path: path.clone(),
                source,
            })?;

        debug!(
            "Loaded chart for '{}' from {} ({} bytes)",
            view,
            path.display(),
            content.len()
        );
        charts[view] = content;
    }

    Ok(charts)
}
