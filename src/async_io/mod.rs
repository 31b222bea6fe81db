//! Concurrent source loading.
//!
//! The three extracts are independent, so they load on separate blocking
//! tasks and the pipeline proceeds once all three are in memory.

use std::path::PathBuf;
use std::sync::Arc;

use arrow::record_batch::RecordBatch;

use crate::config::PipelineConfig;
use crate::error::{ReconcilerError, Result};
use crate::filter::FipsFilter;
use crate::registry::{RegisterLoader, hpsa, pqi, rucc};

/// Record batches for the three sources of one run.
#[derive(Debug)]
pub struct SourceBatches {
    pub rucc: Vec<RecordBatch>,
    pub hpsa: Vec<RecordBatch>,
    pub pqi: Vec<RecordBatch>,
}

fn spawn_load(
    register: Arc<dyn RegisterLoader>,
    path: PathBuf,
    filter: Option<FipsFilter>,
) -> tokio::task::JoinHandle<Result<Vec<RecordBatch>>> {
    tokio::task::spawn_blocking(move || register.load(&path, filter.as_ref()))
}

fn join_error(error: tokio::task::JoinError) -> ReconcilerError {
    ReconcilerError::Metadata(format!("source loading task failed: {error}"))
}

/// Load all three sources concurrently.
///
/// # Errors
/// Returns the first load failure, or a task failure if a loader panics.
pub async fn load_all_sources(
    config: &PipelineConfig,
    fips_filter: Option<&FipsFilter>,
) -> Result<SourceBatches> {
    let rucc_task = spawn_load(
        Arc::new(rucc::RuccRegister::new().with_batch_size(config.batch_size)),
        config.rucc_path.clone(),
        fips_filter.cloned(),
    );
    let hpsa_task = spawn_load(
        Arc::new(hpsa::HpsaRegister::new().with_batch_size(config.batch_size)),
        config.hpsa_path.clone(),
        fips_filter.cloned(),
    );
    let pqi_task = spawn_load(
        Arc::new(pqi::PqiRegister::new().with_batch_size(config.batch_size)),
        config.pqi_path.clone(),
        fips_filter.cloned(),
    );

    let (rucc, hpsa, pqi) = futures::join!(rucc_task, hpsa_task, pqi_task);
    Ok(SourceBatches {
        rucc: rucc.map_err(join_error)??,
        hpsa: hpsa.map_err(join_error)??,
        pqi: pqi.map_err(join_error)??,
    })
}
