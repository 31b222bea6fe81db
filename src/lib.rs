//! A Rust library for reconciling county-level health data sources with
//! FIPS normalization, left joins, and derived statistics.

pub mod algorithm;
pub mod async_io;
pub mod config;
pub mod error;
pub mod export;
pub mod filter;
pub mod models;
pub mod pipeline;
pub mod reader;
pub mod reconcile;
pub mod registry;
pub mod utils;

// Re-export the most common types for easier use
// Core types
pub use config::PipelineConfig;
pub use error::{ReconcilerError, Result};
pub use models::{CountyRecord, FipsCode, MissingField};
pub use reconcile::{ReconcileOptions, ReconcileReport, ReconciledSet, reconcile};

// Arrow types
pub use arrow::datatypes::Schema as ArrowSchema;
pub use arrow::record_batch::RecordBatch;

// Derived metrics
pub use algorithm::adjust::{AdjustmentFactor, adjusted_rate, adjusted_score};
pub use algorithm::metrics::{Correlation, DerivedMetrics, derive_metrics, generate_summary};

// Filtering capabilities
pub use filter::FipsFilter;

// Utility functions
pub use reader::{DEFAULT_BATCH_SIZE, read_table};
