//! Deserialize hospitalization batches into raw rows.

use arrow::record_batch::RecordBatch;

use crate::error::Result;
use crate::models::PqiRow;
use crate::utils::arrow::{extract_f64, find_fips_column, key_string_at, resolve_column};

/// Accepted spellings for the hospitalization rate column.
const RATE_COLUMNS: &[&str] = &["hosp_rate", "rate", "prevent_hosp_rate"];

/// Convert one batch into raw hospitalization rows.
///
/// # Errors
/// Returns an error if the key column is missing or the rate column has an
/// incompatible type.
pub fn batch_to_rows(batch: &RecordBatch) -> Result<Vec<PqiRow>> {
    let (_, fips_idx) = find_fips_column(batch)?;
    let keys = batch.column(fips_idx).clone();
    let rate_col = resolve_column(batch, RATE_COLUMNS);

    let mut rows = Vec::with_capacity(batch.num_rows());
    for row in 0..batch.num_rows() {
        rows.push(PqiRow {
            fips: key_string_at(&keys, row)?.unwrap_or_default(),
            hosp_rate: match &rate_col {
                Some(name) => extract_f64(batch, row, name, true)?,
                None => None,
            },
        });
    }
    Ok(rows)
}

/// Convert a sequence of batches into raw hospitalization rows.
///
/// # Errors
/// Propagates the first conversion failure.
pub fn batches_to_rows(batches: &[RecordBatch]) -> Result<Vec<PqiRow>> {
    let mut rows = Vec::new();
    for batch in batches {
        rows.extend(batch_to_rows(batch)?);
    }
    Ok(rows)
}
