//! Dashboard rendering.

pub mod charts;
pub mod generator;

pub use charts::*;
pub use generator::*;
