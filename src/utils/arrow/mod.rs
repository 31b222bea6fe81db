//! Typed field extraction from Arrow record batches.
//!
//! Source extracts are inconsistent about column naming and physical types:
//! the county key may arrive as a string or as an integer column, ordinal
//! codes may be 32- or 64-bit, and CSV extracts surface everything the
//! declared schema does not cover as nullable strings. The extractors here
//! absorb those differences so the register conversions stay small.

use arrow::array::{
    Array, ArrayRef, Float32Array, Float64Array, Int8Array, Int16Array, Int32Array, Int64Array,
    LargeStringArray, StringArray, UInt32Array, UInt64Array,
};
use arrow::datatypes::DataType;
use arrow::record_batch::RecordBatch;

use crate::error::{ReconcilerError, Result};

/// Column names accepted as the county identifier across source extracts.
pub const FIPS_COLUMN_CANDIDATES: &[&str] = &["fips", "FIPS", "fips_code", "county_fips"];

/// Find the county identifier column in a record batch.
///
/// # Returns
/// The actual column name and its index.
///
/// # Errors
/// Returns an error if none of the accepted names is present.
pub fn find_fips_column(batch: &RecordBatch) -> Result<(String, usize)> {
    let schema = batch.schema();
    for (idx, field) in schema.fields().iter().enumerate() {
        if FIPS_COLUMN_CANDIDATES
            .iter()
            .any(|candidate| field.name().eq_ignore_ascii_case(candidate))
        {
            return Ok((field.name().clone(), idx));
        }
    }
    Err(ReconcilerError::column_not_found("fips"))
}

/// Resolve the first of `candidates` present in the batch, ignoring case.
///
/// Returns the actual column name as spelled in the batch.
#[must_use]
pub fn resolve_column(batch: &RecordBatch, candidates: &[&str]) -> Option<String> {
    let schema = batch.schema();
    for candidate in candidates {
        for field in schema.fields() {
            if field.name().eq_ignore_ascii_case(candidate) {
                return Some(field.name().clone());
            }
        }
    }
    None
}

/// Get a column by name.
///
/// # Errors
/// Returns an error if the column is required but absent.
pub fn get_column(batch: &RecordBatch, name: &str, required: bool) -> Result<Option<ArrayRef>> {
    match batch.column_by_name(name) {
        Some(column) => Ok(Some(column.clone())),
        None if required => Err(ReconcilerError::column_not_found(name)),
        None => Ok(None),
    }
}

fn downcast<'a, T: 'static>(array: &'a ArrayRef, column: &str, expected: &str) -> Result<&'a T> {
    array
        .as_any()
        .downcast_ref::<T>()
        .ok_or_else(|| ReconcilerError::invalid_data_type(column, expected))
}

/// Extract a string value from a record batch.
///
/// Nulls and empty strings both come back as `None`.
///
/// # Errors
/// Returns an error if the column is required but absent, or is not a
/// string column.
pub fn extract_string(
    batch: &RecordBatch,
    row: usize,
    column: &str,
    required: bool,
) -> Result<Option<String>> {
    let Some(array) = get_column(batch, column, required)? else {
        return Ok(None);
    };
    let value = match array.data_type() {
        DataType::Utf8 => {
            let strings = downcast::<StringArray>(&array, column, "Utf8")?;
            (!strings.is_null(row)).then(|| strings.value(row).to_string())
        }
        DataType::LargeUtf8 => {
            let strings = downcast::<LargeStringArray>(&array, column, "LargeUtf8")?;
            (!strings.is_null(row)).then(|| strings.value(row).to_string())
        }
        _ => return Err(ReconcilerError::invalid_data_type(column, "Utf8")),
    };
    Ok(value.filter(|s| !s.is_empty()))
}

/// Extract an integer value, widening or parsing as needed.
///
/// Integer columns of any width are accepted; string columns are parsed,
/// which covers CSV extracts whose header the declared schema did not
/// anticipate.
///
/// # Errors
/// Returns an error on absent-but-required or incompatible columns.
pub fn extract_i32(
    batch: &RecordBatch,
    row: usize,
    column: &str,
    required: bool,
) -> Result<Option<i32>> {
    let Some(array) = get_column(batch, column, required)? else {
        return Ok(None);
    };
    if array.is_null(row) {
        return Ok(None);
    }
    let value = match array.data_type() {
        DataType::Int8 => i32::from(downcast::<Int8Array>(&array, column, "Int8")?.value(row)),
        DataType::Int16 => i32::from(downcast::<Int16Array>(&array, column, "Int16")?.value(row)),
        DataType::Int32 => downcast::<Int32Array>(&array, column, "Int32")?.value(row),
        DataType::Int64 => {
            let wide = downcast::<Int64Array>(&array, column, "Int64")?.value(row);
            i32::try_from(wide)
                .map_err(|_| ReconcilerError::invalid_data_type(column, "Int32"))?
        }
        DataType::Utf8 | DataType::LargeUtf8 => {
            return match extract_string(batch, row, column, required)? {
                Some(text) => text
                    .trim()
                    .parse()
                    .map(Some)
                    .map_err(|_| ReconcilerError::invalid_data_type(column, "Int32")),
                None => Ok(None),
            };
        }
        _ => return Err(ReconcilerError::invalid_data_type(column, "Int32")),
    };
    Ok(Some(value))
}

/// Extract a floating point value, widening or parsing as needed.
///
/// # Errors
/// Returns an error on absent-but-required or incompatible columns.
pub fn extract_f64(
    batch: &RecordBatch,
    row: usize,
    column: &str,
    required: bool,
) -> Result<Option<f64>> {
    let Some(array) = get_column(batch, column, required)? else {
        return Ok(None);
    };
    if array.is_null(row) {
        return Ok(None);
    }
    let value = match array.data_type() {
        DataType::Float32 => {
            f64::from(downcast::<Float32Array>(&array, column, "Float32")?.value(row))
        }
        DataType::Float64 => downcast::<Float64Array>(&array, column, "Float64")?.value(row),
        DataType::Int32 => f64::from(downcast::<Int32Array>(&array, column, "Int32")?.value(row)),
        DataType::Int64 => downcast::<Int64Array>(&array, column, "Int64")?.value(row) as f64,
        DataType::Utf8 | DataType::LargeUtf8 => {
            return match extract_string(batch, row, column, required)? {
                Some(text) => text
                    .trim()
                    .parse()
                    .map(Some)
                    .map_err(|_| ReconcilerError::invalid_data_type(column, "Float64")),
                None => Ok(None),
            };
        }
        _ => return Err(ReconcilerError::invalid_data_type(column, "Float64")),
    };
    Ok(Some(value))
}

/// Render the county key at `row` as a raw string, whatever the column type.
///
/// The caller decides what a `None` (null) key means; the join treats it as
/// a malformed identifier.
///
/// # Errors
/// Returns an error for column types that cannot carry a county key.
pub fn key_string_at(array: &ArrayRef, row: usize) -> Result<Option<String>> {
    if array.is_null(row) {
        return Ok(None);
    }
    let key = match array.data_type() {
        DataType::Utf8 => downcast::<StringArray>(array, "fips", "Utf8")?
            .value(row)
            .to_string(),
        DataType::LargeUtf8 => downcast::<LargeStringArray>(array, "fips", "LargeUtf8")?
            .value(row)
            .to_string(),
        DataType::Int32 => downcast::<Int32Array>(array, "fips", "Int32")?
            .value(row)
            .to_string(),
        DataType::Int64 => downcast::<Int64Array>(array, "fips", "Int64")?
            .value(row)
            .to_string(),
        DataType::UInt32 => downcast::<UInt32Array>(array, "fips", "UInt32")?
            .value(row)
            .to_string(),
        DataType::UInt64 => downcast::<UInt64Array>(array, "fips", "UInt64")?
            .value(row)
            .to_string(),
        _ => return Err(ReconcilerError::invalid_data_type("fips", "Utf8 or integer")),
    };
    Ok(Some(key))
}
