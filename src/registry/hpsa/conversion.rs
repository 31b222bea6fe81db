//! Deserialize shortage batches into raw rows.

use arrow::record_batch::RecordBatch;

use crate::error::Result;
use crate::models::HpsaRow;
use crate::utils::arrow::{extract_f64, find_fips_column, key_string_at, resolve_column};

/// Accepted spellings for the shortage score column.
const SCORE_COLUMNS: &[&str] = &["hpsa_score", "score"];

/// Convert one batch into raw shortage rows.
///
/// # Errors
/// Returns an error if the key column is missing or the score column has an
/// incompatible type.
pub fn batch_to_rows(batch: &RecordBatch) -> Result<Vec<HpsaRow>> {
    let (_, fips_idx) = find_fips_column(batch)?;
    let keys = batch.column(fips_idx).clone();
    let score_col = resolve_column(batch, SCORE_COLUMNS);

    let mut rows = Vec::with_capacity(batch.num_rows());
    for row in 0..batch.num_rows() {
        rows.push(HpsaRow {
            fips: key_string_at(&keys, row)?.unwrap_or_default(),
            hpsa_score: match &score_col {
                Some(name) => extract_f64(batch, row, name, true)?,
                None => None,
            },
        });
    }
    Ok(rows)
}

/// Convert a sequence of batches into raw shortage rows.
///
/// # Errors
/// Propagates the first conversion failure.
pub fn batches_to_rows(batches: &[RecordBatch]) -> Result<Vec<HpsaRow>> {
    let mut rows = Vec::new();
    for batch in batches {
        rows.extend(batch_to_rows(batch)?);
    }
    Ok(rows)
}
