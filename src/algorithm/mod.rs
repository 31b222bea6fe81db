//! Metric derivation over reconciled records.

pub mod adjust;
pub mod metrics;
pub mod stat;

pub use adjust::{AdjustmentFactor, adjusted_rate, adjusted_score};
pub use metrics::{Correlation, DerivedMetrics, MissingRecord, derive_metrics, generate_summary};
