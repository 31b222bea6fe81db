//! Table file reading.
//!
//! Source extracts arrive either as Parquet files or as delimited CSV; the
//! format is detected from the file extension. Parquet files are projected
//! down to the declared columns. CSV files are read with a per-file schema
//! built from their header row: columns the declared schema knows keep
//! their declared type, everything else is read as a nullable string and
//! ignored downstream.

use std::fs::{self, File};
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use arrow::datatypes::{DataType, Field, Schema};
use arrow::error::ArrowError;
use arrow::record_batch::RecordBatch;
use itertools::Itertools;
use parquet::arrow::{ProjectionMask, arrow_reader::ParquetRecordBatchReaderBuilder};

use crate::error::{ReconcilerError, Result};
use crate::utils::arrow::FIPS_COLUMN_CANDIDATES;
use crate::utils::logging::{log_operation_complete, log_operation_start, log_warning};

/// Default batch size for table reading
pub const DEFAULT_BATCH_SIZE: usize = 16384;

/// Supported source extract formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableFormat {
    Parquet,
    Csv,
}

/// Detect the table format from a file extension.
///
/// # Errors
/// Returns an error for unsupported extensions.
pub fn detect_format(path: &Path) -> Result<TableFormat> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);
    match extension.as_deref() {
        Some("parquet" | "pq") => Ok(TableFormat::Parquet),
        Some("csv") => Ok(TableFormat::Csv),
        _ => Err(ReconcilerError::Metadata(format!(
            "Unsupported table format: {}",
            path.display()
        ))),
    }
}

/// List the table files in a source directory, in a stable order.
///
/// # Errors
/// Returns an error if the directory cannot be read or holds no table files.
pub fn find_table_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files: Vec<PathBuf> = fs::read_dir(dir)?
        .filter_map(std::result::Result::ok)
        .map(|entry| entry.path())
        .filter(|path| path.is_file() && detect_format(path).is_ok())
        .collect_vec();
    files.sort();

    if files.is_empty() {
        return Err(ReconcilerError::Metadata(format!(
            "No table files found in {}",
            dir.display()
        )));
    }
    Ok(files)
}

/// Read a single table file into Arrow record batches.
///
/// # Arguments
/// * `path` - Path to the Parquet or CSV file
/// * `schema` - Declared schema used for projection and column typing
/// * `batch_size` - Rows per record batch
///
/// # Errors
/// Returns an error if the file cannot be opened or decoded.
pub fn read_table(
    path: &Path,
    schema: Option<&Schema>,
    batch_size: usize,
) -> Result<Vec<RecordBatch>> {
    let start = std::time::Instant::now();
    log_operation_start("Reading table", path);

    let batches = match detect_format(path)? {
        TableFormat::Parquet => read_parquet(path, schema, batch_size)?,
        TableFormat::Csv => read_csv(path, schema, batch_size)?,
    };

    let rows: usize = batches.iter().map(RecordBatch::num_rows).sum();
    log_operation_complete("read", path, rows, Some(start.elapsed()));
    Ok(batches)
}

fn read_parquet(
    path: &Path,
    schema: Option<&Schema>,
    batch_size: usize,
) -> Result<Vec<RecordBatch>> {
    let file = File::open(path)?;
    let mut builder = ParquetRecordBatchReaderBuilder::try_new(file)?.with_batch_size(batch_size);

    if let Some(declared) = schema {
        let file_schema = builder.schema().clone();
        let position_of = |name: &str| {
            file_schema
                .fields()
                .iter()
                .position(|field| field.name().eq_ignore_ascii_case(name))
        };

        let mut indices: Vec<usize> = declared
            .fields()
            .iter()
            .filter_map(|field| position_of(field.name()))
            .collect_vec();
        // The key column may be spelled differently than the declared schema.
        for candidate in FIPS_COLUMN_CANDIDATES.iter().copied() {
            if let Some(idx) = position_of(candidate) {
                if !indices.contains(&idx) {
                    indices.push(idx);
                }
            }
        }

        if indices.is_empty() {
            log_warning(
                "No declared columns found in parquet file, reading all columns",
                Some(path),
            );
        } else {
            indices.sort_unstable();
            let mask = ProjectionMask::roots(builder.parquet_schema(), indices);
            builder = builder.with_projection(mask);
        }
    }

    let reader = builder.build()?;
    let batches = reader.collect::<std::result::Result<Vec<_>, ArrowError>>()?;
    Ok(batches)
}

fn read_csv(path: &Path, schema: Option<&Schema>, batch_size: usize) -> Result<Vec<RecordBatch>> {
    let header = read_csv_header(path)?;
    let file_schema = match schema {
        Some(declared) => csv_file_schema(&header, declared),
        None => Schema::new(
            header
                .iter()
                .map(|name| Field::new(name, DataType::Utf8, true))
                .collect_vec(),
        ),
    };

    let file = File::open(path)?;
    let reader = arrow::csv::ReaderBuilder::new(Arc::new(file_schema))
        .with_header(true)
        .with_batch_size(batch_size)
        .build(file)?;
    let batches = reader.collect::<std::result::Result<Vec<_>, ArrowError>>()?;
    Ok(batches)
}

fn read_csv_header(path: &Path) -> Result<Vec<String>> {
    let file = File::open(path)?;
    let mut line = String::new();
    BufReader::new(file).read_line(&mut line)?;
    Ok(line
        .trim_end_matches(['\r', '\n'])
        .split(',')
        .map(|name| name.trim().trim_matches('"').to_string())
        .collect_vec())
}

/// Build a schema for a CSV file from its header, taking column types from
/// the declared schema where names match (ignoring case).
fn csv_file_schema(header: &[String], declared: &Schema) -> Schema {
    Schema::new(
        header
            .iter()
            .map(|name| {
                let declared_type = declared
                    .fields()
                    .iter()
                    .find(|field| field.name().eq_ignore_ascii_case(name))
                    .map(|field| field.data_type().clone());
                Field::new(name, declared_type.unwrap_or(DataType::Utf8), true)
            })
            .collect_vec(),
    )
}
