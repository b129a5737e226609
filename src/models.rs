//! Data models for the sales dashboard.
//!
//! This module contains the core data structures shared by the loader,
//! the aggregator and the renderer: transaction records, the fixed set of
//! dashboard views, and the derived aggregate tables.

use crate::error::DashboardError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Index, IndexMut};
use std::path::PathBuf;
use std::str::FromStr;

/// A single sales transaction as read from the input CSV.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Customer identifier, kept verbatim from the file.
    pub customer_id: String,
    /// Month label the transaction belongs to.
    pub month: String,
    /// Transaction amount (assumed non-negative).
    pub tran_amount: f64,
}

/// The immutable table of transactions loaded at startup.
#[derive(Debug, Clone)]
pub struct Dataset {
    /// File the transactions were read from.
    pub source: PathBuf,
    /// Rows in file order.
    pub transactions: Vec<Transaction>,
    /// When the file was loaded.
    pub loaded_at: DateTime<Utc>,
}

impl Dataset {
    /// Number of transactions.
    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }
}

/// One of the five dashboard views, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ViewId {
    /// Sum of amount by month.
    #[serde(rename = "scatter")]
    SalesByMonth,
    /// Mean of amount by month.
    #[serde(rename = "to_3_month")]
    AverageByMonth,
    /// Five customers with the largest total spend.
    #[serde(rename = "top_5_cust")]
    TopCustomers,
    /// Five largest individual transactions.
    #[serde(rename = "top_5_order")]
    TopOrders,
    /// Number of transactions by month.
    #[serde(rename = "transaction")]
    CountByMonth,
}

impl ViewId {
    /// Every view, in the order the cards are stacked.
    pub const ALL: [ViewId; 5] = [
        ViewId::SalesByMonth,
        ViewId::AverageByMonth,
        ViewId::TopCustomers,
        ViewId::TopOrders,
        ViewId::CountByMonth,
    ];

    /// Identifier used in element ids, query strings and config keys.
    pub fn id(&self) -> &'static str {
        match self {
            ViewId::SalesByMonth => "scatter",
            ViewId::AverageByMonth => "to_3_month",
            ViewId::TopCustomers => "top_5_cust",
            ViewId::TopOrders => "top_5_order",
            ViewId::CountByMonth => "transaction",
        }
    }

    /// Card header text.
    pub fn title(&self) -> &'static str {
        match self {
            ViewId::SalesByMonth => "Customer Activeness vs. Frequency Monetary",
            ViewId::AverageByMonth => "To 3 Month Plot",
            ViewId::TopCustomers => "Top 5 Customers Plot",
            ViewId::TopOrders => "Top 5 Orders Plot",
            ViewId::CountByMonth => "Transaction Plot",
        }
    }

    /// Default filename of the pre-rendered chart for this view.
    pub fn chart_file(&self) -> &'static str {
        match self {
            ViewId::SalesByMonth => "scatter_plot.html",
            ViewId::AverageByMonth => "to_3_month_plot.html",
            ViewId::TopCustomers => "top_5_cust_plot.html",
            ViewId::TopOrders => "top_5_order_plot.html",
            ViewId::CountByMonth => "transaction_plot.html",
        }
    }

    /// Position in [`ViewId::ALL`].
    pub fn index(&self) -> usize {
        *self as usize
    }
}

impl fmt::Display for ViewId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id())
    }
}

impl FromStr for ViewId {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ViewId::ALL
            .into_iter()
            .find(|view| view.id() == s)
            .ok_or_else(|| DashboardError::UnknownView(s.to_string()))
    }
}

/// One value per view, indexable by [`ViewId`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct PerView<T>([T; 5]);

impl<T> PerView<T> {
    /// Build a value for each view in display order.
    pub fn from_fn(f: impl FnMut(ViewId) -> T) -> Self {
        PerView(ViewId::ALL.map(f))
    }

    /// Iterate `(view, value)` pairs in display order.
    pub fn iter(&self) -> impl Iterator<Item = (ViewId, &T)> {
        ViewId::ALL.into_iter().zip(self.0.iter())
    }

    /// The underlying values in display order.
    pub fn values(&self) -> &[T; 5] {
        &self.0
    }
}

impl<T> Index<ViewId> for PerView<T> {
    type Output = T;

    fn index(&self, view: ViewId) -> &T {
        &self.0[view.index()]
    }
}

impl<T> IndexMut<ViewId> for PerView<T> {
    fn index_mut(&mut self, view: ViewId) -> &mut T {
        &mut self.0[view.index()]
    }
}

/// A row of a grouped view: one key and its reduced amount.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupedRow {
    /// Month label or customer id.
    pub key: String,
    /// Sum, mean or count for the key.
    pub value: f64,
}

/// A row of the top orders view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderRow {
    /// 1-based rank by amount.
    pub rank: usize,
    /// Position of the transaction in the input file (0-based).
    pub row_index: usize,
    /// The transaction itself.
    #[serde(flatten)]
    pub transaction: Transaction,
}

/// The five derived tables, computed once from a [`Dataset`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Aggregates {
    /// Sum of amount by month, ascending month.
    pub sales_by_month: Vec<GroupedRow>,
    /// Mean of amount by month, ascending month.
    pub average_by_month: Vec<GroupedRow>,
    /// Customers with the largest summed amount, largest first.
    pub top_customers: Vec<GroupedRow>,
    /// Individual transactions with the largest amount, largest first.
    pub top_orders: Vec<OrderRow>,
    /// Transaction count by month, ascending month.
    pub count_by_month: Vec<GroupedRow>,
}

/// The two summary lines shown under each chart.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Insights {
    /// Statement over the whole view.
    pub summary: String,
    /// Statement naming the row with the maximum value.
    pub extremum: String,
}

impl Insights {
    /// Both lines in display order.
    pub fn lines(&self) -> [&str; 2] {
        [&self.summary, &self.extremum]
    }
}
