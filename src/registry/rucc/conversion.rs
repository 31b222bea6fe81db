//! Deserialize classification batches into raw rows.

use arrow::record_batch::RecordBatch;

use crate::error::Result;
use crate::models::RuccRow;
use crate::utils::arrow::{extract_i32, extract_string, find_fips_column, key_string_at, resolve_column};

/// Accepted spellings for the county name column.
const COUNTY_COLUMNS: &[&str] = &["county", "county_name"];
/// Accepted spellings for the state abbreviation column.
const STATE_COLUMNS: &[&str] = &["state", "state_abbr"];
/// Accepted spellings for the classification code column.
const RUCC_COLUMNS: &[&str] = &["rural_urban", "rucc", "rucc_code", "rucc_2013", "rucc_2023"];

/// Convert one batch into raw classification rows.
///
/// Keys are carried through as raw strings; normalization (and malformed-key
/// accounting) happens during reconciliation. A null key becomes an empty
/// string so the row is counted as malformed rather than vanishing.
///
/// # Errors
/// Returns an error if the key column is missing or a column has an
/// incompatible type.
pub fn batch_to_rows(batch: &RecordBatch) -> Result<Vec<RuccRow>> {
    let (_, fips_idx) = find_fips_column(batch)?;
    let keys = batch.column(fips_idx).clone();

    let county_col = resolve_column(batch, COUNTY_COLUMNS);
    let state_col = resolve_column(batch, STATE_COLUMNS);
    let rucc_col = resolve_column(batch, RUCC_COLUMNS);

    let mut rows = Vec::with_capacity(batch.num_rows());
    for row in 0..batch.num_rows() {
        rows.push(RuccRow {
            fips: key_string_at(&keys, row)?.unwrap_or_default(),
            county: match &county_col {
                Some(name) => extract_string(batch, row, name, true)?,
                None => None,
            },
            state: match &state_col {
                Some(name) => extract_string(batch, row, name, true)?,
                None => None,
            },
            rural_urban: match &rucc_col {
                Some(name) => extract_i32(batch, row, name, true)?,
                None => None,
            },
        });
    }
    Ok(rows)
}

/// Convert a sequence of batches into raw classification rows.
///
/// # Errors
/// Propagates the first conversion failure.
pub fn batches_to_rows(batches: &[RecordBatch]) -> Result<Vec<RuccRow>> {
    let mut rows = Vec::new();
    for batch in batches {
        rows.extend(batch_to_rows(batch)?);
    }
    Ok(rows)
}
