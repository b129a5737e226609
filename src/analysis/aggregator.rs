//! Transaction aggregation.
//!
//! This module computes the five derived views behind the dashboard cards.
//! Grouped views are ordered by ascending key; ranked views are stable, so
//! ties keep the order in which they were encountered.

use crate::models::{Aggregates, Dataset, GroupedRow, OrderRow, Transaction};
use std::collections::BTreeMap;
use tracing::debug;

/// How many rows the ranked views keep.
pub const TOP_N: usize = 5;

/// Compute all five views from the dataset.
pub fn compute_aggregates(dataset: &Dataset) -> Aggregates {
    let transactions = &dataset.transactions;

    let aggregates = Aggregates {
        sales_by_month: sum_by_month(transactions),
        average_by_month: mean_by_month(transactions),
        top_customers: top_customers(transactions, TOP_N),
        top_orders: top_orders(transactions, TOP_N),
        count_by_month: count_by_month(transactions),
    };

    debug!(
        "Aggregated {} transactions into {} months and {} top customers",
        transactions.len(),
        aggregates.sales_by_month.len(),
        aggregates.top_customers.len()
    );

    aggregates
}

/// Running sum and count per key.
fn group_by<'a>(
    transactions: &'a [Transaction],
    key: impl Fn(&'a Transaction) -> &'a str,
) -> BTreeMap<&'a str, (f64, usize)> {
    let mut grouped: BTreeMap<&str, (f64, usize)> = BTreeMap::new();

    for t in transactions {
        let entry = grouped.entry(key(t)).or_insert((0.0, 0));
        entry.0 += t.tran_amount;
        entry.1 += 1;
    }

    grouped
}

fn reduce(
    grouped: BTreeMap<&str, (f64, usize)>,
    f: impl Fn(f64, usize) -> f64,
) -> Vec<GroupedRow> {
    grouped
        .into_iter()
        .map(|(key, (sum, count))| GroupedRow {
            key: key.to_string(),
            value: f(sum, count),
        })
        .collect()
}

/// Sum of amount grouped by month.
pub fn sum_by_month(transactions: &[Transaction]) -> Vec<GroupedRow> {
    reduce(group_by(transactions, |t| t.month.as_str()), |sum, _| sum)
}

/// Mean of amount grouped by month.
pub fn mean_by_month(transactions: &[Transaction]) -> Vec<GroupedRow> {
    reduce(group_by(transactions, |t| t.month.as_str()), |sum, count| {
        sum / count as f64
    })
}

/// Number of transactions grouped by month.
pub fn count_by_month(transactions: &[Transaction]) -> Vec<GroupedRow> {
    reduce(group_by(transactions, |t| t.month.as_str()), |_, count| count as f64)
}

/// The `n` customers with the largest summed amount.
pub fn top_customers(transactions: &[Transaction], n: usize) -> Vec<GroupedRow> {
    let mut totals = reduce(group_by(transactions, |t| t.customer_id.as_str()), |sum, _| sum);

    // Stable: equal totals stay in ascending customer order
    totals.sort_by(|a, b| b.value.total_cmp(&a.value));
    totals.truncate(n);
    totals
}

/// The `n` individual transactions with the largest amount.
pub fn top_orders(transactions: &[Transaction], n: usize) -> Vec<OrderRow> {
    let mut indexed: Vec<(usize, &Transaction)> = transactions.iter().enumerate().collect();

    indexed.sort_by(|a, b| b.1.tran_amount.total_cmp(&a.1.tran_amount));
    indexed.truncate(n);

    indexed
        .into_iter()
        .enumerate()
        .map(|(rank, (row_index, t))| OrderRow {
            rank: rank + 1,
            row_index,
            transaction: t.clone(),
        })
        .collect()
}

/// First row holding the maximum value.
pub fn max_row(rows: &[GroupedRow]) -> Option<&GroupedRow> {
    rows.iter().fold(None, |best, row| match best {
        Some(b) if b.value >= row.value => Some(b),
        _ => Some(row),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use std::path::PathBuf;

    fn tx(customer: &str, month: &str, amount: f64) -> Transaction {
        Transaction {
            customer_id: customer.to_string(),
            month: month.to_string(),
            tran_amount: amount,
        }
    }

    fn dataset(transactions: Vec<Transaction>) -> Dataset {
        Dataset {
            source: PathBuf::from("test.csv"),
            transactions,
            loaded_at: Utc::now(),
        }
    }

    fn sample() -> Vec<Transaction> {
        vec![tx("1", "Jan", 100.0), tx("2", "Jan", 50.0), tx("1", "Feb", 200.0)]
    }

    fn keys(rows: &[GroupedRow]) -> Vec<(&str, f64)> {
        rows.iter().map(|r| (r.key.as_str(), r.value)).collect()
    }

    #[test]
    fn test_sum_by_month() {
        let rows = sum_by_month(&sample());
        assert_eq!(keys(&rows), vec![("Feb", 200.0), ("Jan", 150.0)]);

        let best = max_row(&rows).unwrap();
        assert_eq!(best.key, "Feb");
        assert_eq!(best.value, 200.0);
    }

    #[test]
    fn test_mean_and_count_by_month() {
        let means = mean_by_month(&sample());
        assert_eq!(keys(&means), vec![("Feb", 200.0), ("Jan", 75.0)]);

        let counts = count_by_month(&sample());
        assert_eq!(keys(&counts), vec![("Feb", 1.0), ("Jan", 2.0)]);
    }

    #[test]
    fn test_top_customers_sums_and_limits() {
        let mut transactions = sample();
        for (i, amount) in [10.0, 20.0, 30.0, 40.0, 5.0].into_iter().enumerate() {
            transactions.push(tx(&format!("c{i}"), "Mar", amount));
        }

        let top = top_customers(&transactions, TOP_N);
        assert_eq!(top.len(), 5);
        assert_eq!(top[0].key, "1");
        assert_eq!(top[0].value, 300.0);
        assert_eq!(top[1].key, "2");
        assert!(top.iter().all(|r| r.key != "c4"));
    }

    #[test]
    fn test_top_customers_ties_keep_key_order() {
        let transactions = vec![tx("b", "Jan", 10.0), tx("a", "Jan", 10.0)];
        let top = top_customers(&transactions, TOP_N);
        assert_eq!(keys(&top), vec![("a", 10.0), ("b", 10.0)]);
    }

    #[test]
    fn test_top_orders_stable_on_ties() {
        let transactions = vec![
            tx("1", "Jan", 10.0),
            tx("2", "Jan", 90.0),
            tx("3", "Feb", 50.0),
            tx("4", "Feb", 90.0),
            tx("5", "Mar", 50.0),
            tx("6", "Mar", 70.0),
        ];

        let top = top_orders(&transactions, TOP_N);

        assert_eq!(top.len(), 5);
        let order: Vec<_> = top.iter().map(|r| r.row_index).collect();
        assert_eq!(order, vec![1, 3, 5, 2, 4]);
        assert_eq!(top[0].rank, 1);
        assert_eq!(top[4].rank, 5);
        assert!(top.iter().all(|r| r.transaction.customer_id != "1"));
    }

    #[test]
    fn test_top_views_on_short_tables() {
        let transactions = sample();
        assert_eq!(top_orders(&transactions, TOP_N).len(), 3);
        assert_eq!(top_customers(&transactions, TOP_N).len(), 2);
    }

    #[test]
    fn test_max_row_prefers_first() {
        let rows = vec![
            GroupedRow {
                key: "a".to_string(),
                value: 5.0,
            },
            GroupedRow {
                key: "b".to_string(),
                value: 5.0,
            },
        ];
        assert_eq!(max_row(&rows).unwrap().key, "a");
        assert!(max_row(&[]).is_none());
    }

    #[test]
    fn test_grouped_views_have_one_row_per_month() {
        let transactions = vec![
            tx("1", "2011-05", 35.0),
            tx("2", "2011-06", 12.0),
            tx("1", "2011-05", 70.0),
            tx("3", "2011-07", 80.0),
            tx("4", "2011-06", 44.0),
        ];
        let aggregates = compute_aggregates(&dataset(transactions));

        assert_eq!(aggregates.sales_by_month.len(), 3);
        assert_eq!(aggregates.average_by_month.len(), 3);
        assert_eq!(aggregates.count_by_month.len(), 3);
        assert!(aggregates.top_customers.len() <= TOP_N);
        assert!(aggregates.top_orders.len() <= TOP_N);
    }

    #[test]
    fn test_compute_is_idempotent() {
        let data = dataset(sample());
        assert_eq!(compute_aggregates(&data), compute_aggregates(&data));
    }
}
