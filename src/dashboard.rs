//! The assembled dashboard.
//!
//! Everything the page needs is computed once at startup into a
//! [`Dashboard`] and shared read-only with every request.

use crate::analysis::{compute_aggregates, generate_insights};
use crate::config::PageConfig;
use crate::models::{Aggregates, Dataset, Insights, PerView};
use chrono::{DateTime, Utc};
use std::path::PathBuf;
use tracing::info;

#[derive(Debug, Clone)]
pub struct Dashboard {
    /// Data file the views were computed from.
    pub source: PathBuf,
    /// When the data was loaded.
    pub loaded_at: DateTime<Utc>,
    /// Number of input transactions.
    pub transaction_count: usize,
    pub aggregates: Aggregates,
    pub insights: PerView<Insights>,
    /// Raw chart HTML per view.
    pub charts: PerView<String>,
    pub page: PageConfig,
}

impl Dashboard {
    /// Compute the views and insights and pair them with the loaded charts.
    pub fn build(dataset: &Dataset, charts: PerView<String>, page: PageConfig) -> Self {
        let aggregates = compute_aggregates(dataset);
        let insights = generate_insights(&aggregates);

        info!(
            "Dashboard ready: {} transactions, {} months, {} views",
            dataset.len(),
            aggregates.sales_by_month.len(),
            insights.values().len()
        );

        Self {
            source: dataset.source.clone(),
            loaded_at: dataset.loaded_at,
            transaction_count: dataset.len(),
            aggregates,
            insights,
            charts,
            page,
        }
    }
}
