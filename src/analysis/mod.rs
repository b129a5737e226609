//! Analysis modules.
//!
//! Aggregation of the transaction table into the dashboard views, and the
//! insight text derived from them.

pub mod aggregator;
pub mod insights;

pub use aggregator::*;
pub use insights::*;
