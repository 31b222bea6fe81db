//! End-to-end batch run.
//!
//! One call: load the three extracts, reconcile them, derive the metrics,
//! and write the output table (plus optional diagnostics). Each run is a
//! pure function of the source extracts; re-running replaces the output
//! wholesale.

use log::info;

use crate::algorithm::metrics::{self, DerivedMetrics};
use crate::async_io;
use crate::config::PipelineConfig;
use crate::error::Result;
use crate::export;
use crate::models::CountyRecord;
use crate::reconcile::{self, ReconcileOptions, ReconcileReport};
use crate::registry::{hpsa, pqi, rucc};

/// Everything one run produces, for callers that want more than the files.
#[derive(Debug)]
pub struct PipelineOutcome {
    pub records: Vec<CountyRecord>,
    pub report: ReconcileReport,
    pub metrics: DerivedMetrics,
}

/// Run the full pipeline as configured.
///
/// # Errors
/// Returns the first failure from configuration validation, loading,
/// reconciliation, or export.
pub async fn run(config: &PipelineConfig) -> Result<PipelineOutcome> {
    config.validate()?;
    let fips_filter = config.build_fips_filter()?;

    let sources = async_io::load_all_sources(config, fips_filter.as_ref()).await?;
    info!(
        "Loaded {} classification, {} shortage, {} hospitalization batches",
        sources.rucc.len(),
        sources.hpsa.len(),
        sources.pqi.len()
    );

    let classification = rucc::conversion::batches_to_rows(&sources.rucc)?;
    let shortage = hpsa::conversion::batches_to_rows(&sources.hpsa)?;
    let hospitalization = pqi::conversion::batches_to_rows(&sources.pqi)?;

    let options = ReconcileOptions::new(config.excluded_states.iter());
    let reconciled = reconcile::reconcile(classification, shortage, hospitalization, &options)?;
    let derived = metrics::derive_metrics(&reconciled.records);

    export::write_output(&reconciled.records, &config.output_path)?;
    if let Some(diagnostics_path) = &config.diagnostics_path {
        export::write_diagnostics(&reconciled.report, &derived, diagnostics_path)?;
    }

    Ok(PipelineOutcome {
        records: reconciled.records,
        report: reconciled.report,
        metrics: derived,
    })
}
