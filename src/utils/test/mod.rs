//! Test fixtures shared by the integration tests.
//!
//! Batch builders for the three source shapes, plus temp-file helpers for
//! round-trip tests. Values here are test support: construction failures
//! panic instead of propagating.

use std::path::PathBuf;
use std::sync::Arc;

use arrow::array::{ArrayRef, Float64Array, Int32Array, StringArray};
use arrow::record_batch::RecordBatch;

use crate::registry::{hpsa, pqi, rucc};

/// Build a classification batch from `(fips, county, state, rural_urban)` rows.
#[must_use]
pub fn rucc_batch(rows: &[(&str, &str, &str, Option<i32>)]) -> RecordBatch {
    let fips = StringArray::from(rows.iter().map(|row| Some(row.0)).collect::<Vec<_>>());
    let county = StringArray::from(rows.iter().map(|row| Some(row.1)).collect::<Vec<_>>());
    let state = StringArray::from(rows.iter().map(|row| Some(row.2)).collect::<Vec<_>>());
    let rural_urban = Int32Array::from(rows.iter().map(|row| row.3).collect::<Vec<_>>());

    RecordBatch::try_new(
        rucc::schema::rucc_schema(),
        vec![
            Arc::new(fips) as ArrayRef,
            Arc::new(county),
            Arc::new(state),
            Arc::new(rural_urban),
        ],
    )
    .expect("classification fixture batch")
}

/// Build a shortage batch from `(fips, hpsa_score)` rows.
#[must_use]
pub fn hpsa_batch(rows: &[(&str, Option<f64>)]) -> RecordBatch {
    let fips = StringArray::from(rows.iter().map(|row| Some(row.0)).collect::<Vec<_>>());
    let score = Float64Array::from(rows.iter().map(|row| row.1).collect::<Vec<_>>());

    RecordBatch::try_new(
        hpsa::schema::hpsa_schema(),
        vec![Arc::new(fips) as ArrayRef, Arc::new(score)],
    )
    .expect("shortage fixture batch")
}

/// Build a hospitalization batch from `(fips, hosp_rate)` rows.
#[must_use]
pub fn pqi_batch(rows: &[(&str, Option<f64>)]) -> RecordBatch {
    let fips = StringArray::from(rows.iter().map(|row| Some(row.0)).collect::<Vec<_>>());
    let rate = Float64Array::from(rows.iter().map(|row| row.1).collect::<Vec<_>>());

    RecordBatch::try_new(
        pqi::schema::pqi_schema(),
        vec![Arc::new(fips) as ArrayRef, Arc::new(rate)],
    )
    .expect("hospitalization fixture batch")
}

/// A per-process temp path that will not collide across test binaries.
#[must_use]
pub fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("county_reconciler_{}_{name}", std::process::id()))
}
