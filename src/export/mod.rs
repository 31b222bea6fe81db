//! Flat-file export of the reconciled set.
//!
//! The output is a CSV with a fixed column order that the downstream
//! dashboard expects. Absent numeric values are written as empty fields,
//! never as zero, and the file is re-loadable by this same module, so a
//! run's output can seed a later comparison.

use std::fs::{self, File};
use std::path::Path;
use std::sync::Arc;

use arrow::datatypes::{DataType, Field, FieldRef, Schema, SchemaRef};
use arrow::record_batch::RecordBatch;
use serde::{Deserialize, Serialize};

use crate::algorithm::metrics::DerivedMetrics;
use crate::error::Result;
use crate::models::{CountyRecord, FipsCode};
use crate::reader::DEFAULT_BATCH_SIZE;
use crate::reconcile::ReconcileReport;
use crate::utils::logging::{log_operation_complete, log_operation_start};

/// Fixed output column order expected by the downstream dashboard.
#[must_use]
pub fn export_schema() -> SchemaRef {
    Arc::new(Schema::new(vec![
        Field::new("fips", DataType::Utf8, false),
        Field::new("county", DataType::Utf8, true),
        Field::new("state", DataType::Utf8, true),
        Field::new("Rural_Urban", DataType::Int32, true),
        Field::new("hpsa_score", DataType::Float64, true),
        Field::new("hosp_rate", DataType::Float64, true),
    ]))
}

/// Serialization shape of one output row.
#[derive(Debug, Serialize, Deserialize)]
struct ExportRow {
    fips: String,
    county: Option<String>,
    state: Option<String>,
    #[serde(rename = "Rural_Urban")]
    rural_urban: Option<i32>,
    hpsa_score: Option<f64>,
    hosp_rate: Option<f64>,
}

impl From<&CountyRecord> for ExportRow {
    fn from(record: &CountyRecord) -> Self {
        Self {
            fips: record.fips.as_str().to_string(),
            county: Some(record.county.clone()).filter(|name| !name.is_empty()),
            state: Some(record.state.clone()).filter(|state| !state.is_empty()),
            rural_urban: record.rural_urban,
            hpsa_score: record.hpsa_score,
            hosp_rate: record.hosp_rate,
        }
    }
}

impl ExportRow {
    fn into_record(self) -> Result<CountyRecord> {
        Ok(CountyRecord {
            fips: FipsCode::new(&self.fips)?,
            county: self.county.unwrap_or_default(),
            state: self.state.unwrap_or_default(),
            rural_urban: self.rural_urban,
            hpsa_score: self.hpsa_score,
            hosp_rate: self.hosp_rate,
        })
    }
}

/// Build one record batch from reconciled records.
///
/// # Errors
/// Returns an error if serialization into the export schema fails.
pub fn records_to_batch(records: &[CountyRecord]) -> Result<RecordBatch> {
    let fields: Vec<FieldRef> = export_schema().fields().to_vec();
    let rows: Vec<ExportRow> = records.iter().map(ExportRow::from).collect();
    serde_arrow::to_record_batch(&fields, &rows).map_err(Into::into)
}

/// Convert one batch of exported rows back into records.
///
/// # Errors
/// Returns an error on deserialization failure or a malformed key.
pub fn batch_to_records(batch: &RecordBatch) -> Result<Vec<CountyRecord>> {
    let rows: Vec<ExportRow> = serde_arrow::from_record_batch(batch)?;
    rows.into_iter().map(ExportRow::into_record).collect()
}

/// Write the reconciled set to a CSV file.
///
/// # Errors
/// Returns an error if the file cannot be created or written.
pub fn write_output(records: &[CountyRecord], path: &Path) -> Result<()> {
    log_operation_start("Writing output", path);
    let start = std::time::Instant::now();

    let batch = records_to_batch(records)?;
    let file = File::create(path)?;
    let mut writer = arrow::csv::WriterBuilder::new()
        .with_header(true)
        .build(file);
    writer.write(&batch)?;

    log_operation_complete("wrote", path, records.len(), Some(start.elapsed()));
    Ok(())
}

/// Re-load a previously exported CSV into records.
///
/// Round-trip stable with [`write_output`]: what was absent on write is
/// absent after the read, and a zero score is still a zero score.
///
/// # Errors
/// Returns an error if the file cannot be opened, decoded, or holds a
/// malformed key.
pub fn read_output(path: &Path) -> Result<Vec<CountyRecord>> {
    let file = File::open(path)?;
    let reader = arrow::csv::ReaderBuilder::new(export_schema())
        .with_header(true)
        .with_batch_size(DEFAULT_BATCH_SIZE)
        .build(file)?;

    let mut records = Vec::new();
    for batch in reader {
        records.extend(batch_to_records(&batch?)?);
    }
    Ok(records)
}

/// Machine-readable accounting for one pipeline run.
#[derive(Debug, Serialize)]
pub struct RunDiagnostics<'a> {
    pub generated_at: String,
    pub reconcile: &'a ReconcileReport,
    pub metrics: &'a DerivedMetrics,
}

/// Write the run report and derived metrics as pretty-printed JSON.
///
/// # Errors
/// Returns an error if serialization or the write fails.
pub fn write_diagnostics(
    report: &ReconcileReport,
    metrics: &DerivedMetrics,
    path: &Path,
) -> Result<()> {
    let diagnostics = RunDiagnostics {
        generated_at: chrono::Utc::now().to_rfc3339(),
        reconcile: report,
        metrics,
    };
    let json = serde_json::to_string_pretty(&diagnostics)?;
    fs::write(path, json)?;
    Ok(())
}
