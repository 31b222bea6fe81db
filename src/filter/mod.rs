//! Record-batch filtering by county identifier.
//!
//! A `FipsFilter` restricts loading to a subset of counties. Both the filter
//! values and the batch keys are normalized before comparison, so a filter
//! built from `"1001"` matches a source column holding `"01001"` or the
//! integer `1001`.

use arrow::array::BooleanArray;
use arrow::record_batch::RecordBatch;
use rustc_hash::FxHashSet;

use crate::error::{ReconcilerError, Result};
use crate::models::FipsCode;
use crate::utils::arrow::{find_fips_column, key_string_at};

/// A filter that keeps only rows whose county key is in a fixed set.
#[derive(Debug, Clone)]
pub struct FipsFilter {
    values: FxHashSet<FipsCode>,
    column: Option<String>,
}

impl FipsFilter {
    /// Create a filter from raw county identifiers.
    ///
    /// # Arguments
    /// * `values` - Raw identifiers, any accepted width or type
    /// * `column` - Key column name; auto-detected per batch when `None`
    ///
    /// # Errors
    /// Returns a configuration error if any value cannot be normalized.
    pub fn new<I, S>(values: I, column: Option<String>) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut normalized = FxHashSet::default();
        for value in values {
            let code = FipsCode::new(value.as_ref()).map_err(|_| {
                ReconcilerError::Config(format!(
                    "invalid county identifier in filter: {:?}",
                    value.as_ref()
                ))
            })?;
            normalized.insert(code);
        }
        Ok(Self {
            values: normalized,
            column,
        })
    }

    /// Number of counties the filter keeps.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the filter keeps nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Keep only the rows whose normalized key is in the filter set.
    ///
    /// Rows with null or malformed keys never match.
    ///
    /// # Errors
    /// Returns an error if the key column cannot be found or read.
    pub fn filter(&self, batch: &RecordBatch) -> Result<RecordBatch> {
        let idx = match &self.column {
            Some(name) => batch
                .schema()
                .index_of(name)
                .map_err(|_| ReconcilerError::column_not_found(name.clone()))?,
            None => find_fips_column(batch)?.1,
        };
        let keys = batch.column(idx).clone();

        let mut mask = Vec::with_capacity(batch.num_rows());
        for row in 0..batch.num_rows() {
            let keep = key_string_at(&keys, row)?
                .and_then(|raw| FipsCode::new(&raw).ok())
                .is_some_and(|code| self.values.contains(&code));
            mask.push(keep);
        }

        filter_batch(batch, &BooleanArray::from(mask))
    }
}

/// Apply a boolean mask to every column of a batch.
///
/// # Errors
/// Returns an error if the mask length does not match the batch.
pub fn filter_batch(batch: &RecordBatch, mask: &BooleanArray) -> Result<RecordBatch> {
    arrow::compute::filter_record_batch(batch, mask).map_err(Into::into)
}
