//! Insight text for each view.
//!
//! Every view gets two lines: a statement over the whole view and a
//! statement naming the row that holds the maximum. Means are printed with
//! two decimals; sums and counts use the shortest form, so whole amounts
//! print without a decimal point.

use super::aggregator::max_row;
use crate::models::{Aggregates, GroupedRow, Insights, PerView, ViewId};

/// Build the insight pair for every view.
pub fn generate_insights(aggregates: &Aggregates) -> PerView<Insights> {
    PerView::from_fn(|view| insights_for(view, aggregates))
}

/// Build the insight pair for one view.
pub fn insights_for(view: ViewId, aggregates: &Aggregates) -> Insights {
    match view {
        ViewId::SalesByMonth => {
            let rows = &aggregates.sales_by_month;
            Insights {
                summary: format!("Total transactions per month: {}", total(rows)),
                extremum: extremum_line("Month with the highest transactions", rows, |v| {
                    v.to_string()
                }),
            }
        }
        ViewId::AverageByMonth => {
            let rows = &aggregates.average_by_month;
            let mean = if rows.is_empty() {
                0.0
            } else {
                total(rows) / rows.len() as f64
            };
            Insights {
                summary: format!("Average transaction amount per month: {:.2}", mean),
                extremum: extremum_line(
                    "Month with the highest average transaction",
                    rows,
                    |v| format!("{:.2}", v),
                ),
            }
        }
        ViewId::TopCustomers => {
            let rows = &aggregates.top_customers;
            let ids: Vec<&str> = rows.iter().map(|r| r.key.as_str()).collect();
            Insights {
                summary: format!("Top 5 customers by transaction amount: {}", ids.join(", ")),
                extremum: extremum_line("Highest spending customer", rows, |v| v.to_string()),
            }
        }
        ViewId::TopOrders => {
            let rows = &aggregates.top_orders;
            let amounts: Vec<String> = rows
                .iter()
                .map(|r| r.transaction.tran_amount.to_string())
                .collect();
            let extremum = match rows.first() {
                Some(top) => format!(
                    "Highest transaction amount: {} (rank {}, customer {})",
                    top.transaction.tran_amount, top.rank, top.transaction.customer_id
                ),
                None => "Highest transaction amount: n/a".to_string(),
            };
            Insights {
                summary: format!(
                    "Top 5 orders by transaction amount: {}",
                    amounts.join(", ")
                ),
                extremum,
            }
        }
        ViewId::CountByMonth => {
            let rows = &aggregates.count_by_month;
            Insights {
                summary: format!("Number of transactions per month: {}", total(rows)),
                extremum: extremum_line(
                    "Month with the highest number of transactions",
                    rows,
                    |v| v.to_string(),
                ),
            }
        }
    }
}

fn total(rows: &[GroupedRow]) -> f64 {
    rows.iter().map(|r| r.value).sum()
}

fn extremum_line(label: &str, rows: &[GroupedRow], fmt: impl Fn(f64) -> String) -> String {
    match max_row(rows) {
        Some(row) => format!("{}: {} ({})", label, row.key, fmt(row.value)),
        None => format!("{}: n/a", label),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::compute_aggregates;
    use crate::models::{Dataset, Transaction};
    use chrono::Utc;
    use std::path::PathBuf;

    fn dataset(rows: &[(&str, &str, f64)]) -> Dataset {
        Dataset {
            source: PathBuf::from("test.csv"),
            transactions: rows
                .iter()
                .map(|(c, m, a)| Transaction {
                    customer_id: c.to_string(),
                    month: m.to_string(),
                    tran_amount: *a,
                })
                .collect(),
            loaded_at: Utc::now(),
        }
    }

    fn sample() -> Aggregates {
        compute_aggregates(&dataset(&[
            ("1", "Jan", 100.0),
            ("2", "Jan", 50.0),
            ("1", "Feb", 200.0),
        ]))
    }

    #[test]
    fn test_sales_insights() {
        let insights = insights_for(ViewId::SalesByMonth, &sample());
        assert_eq!(insights.summary, "Total transactions per month: 350");
        assert_eq!(
            insights.extremum,
            "Month with the highest transactions: Feb (200)"
        );
    }

    #[test]
    fn test_average_insights_use_two_decimals() {
        let insights = insights_for(ViewId::AverageByMonth, &sample());
        // Feb = 200, Jan = 75
        assert_eq!(
            insights.summary,
            "Average transaction amount per month: 137.50"
        );
        assert_eq!(
            insights.extremum,
            "Month with the highest average transaction: Feb (200.00)"
        );
    }

    #[test]
    fn test_customer_and_order_insights() {
        let aggregates = sample();

        let customers = insights_for(ViewId::TopCustomers, &aggregates);
        assert_eq!(
            customers.summary,
            "Top 5 customers by transaction amount: 1, 2"
        );
        assert_eq!(customers.extremum, "Highest spending customer: 1 (300)");

        let orders = insights_for(ViewId::TopOrders, &aggregates);
        assert_eq!(
            orders.summary,
            "Top 5 orders by transaction amount: 200, 100, 50"
        );
        assert_eq!(
            orders.extremum,
            "Highest transaction amount: 200 (rank 1, customer 1)"
        );
    }

    #[test]
    fn test_count_insights() {
        let insights = insights_for(ViewId::CountByMonth, &sample());
        assert_eq!(insights.summary, "Number of transactions per month: 3");
        assert_eq!(
            insights.extremum,
            "Month with the highest number of transactions: Jan (2)"
        );
    }

    #[test]
    fn test_every_view_has_two_lines() {
        let all = generate_insights(&sample());
        for (_, insights) in all.iter() {
            assert!(insights.lines().iter().all(|line| !line.is_empty()));
        }
    }

    #[test]
    fn test_insights_are_idempotent() {
        let data = dataset(&[("9", "2011-05", 12.5), ("3", "2011-06", 40.0)]);
        let first = generate_insights(&compute_aggregates(&data));
        let second = generate_insights(&compute_aggregates(&data));
        assert_eq!(first, second);
    }
}
