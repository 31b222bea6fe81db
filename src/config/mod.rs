//! Pipeline configuration.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{ReconcilerError, Result};
use crate::filter::FipsFilter;
use crate::reader::DEFAULT_BATCH_SIZE;
use crate::reconcile::DEFAULT_EXCLUDED_STATES;

/// Configuration for one reconciliation run.
///
/// Every field has a default, so a JSON configuration file only needs the
/// values it wants to change.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Classification (rural-urban) extract file or directory.
    pub rucc_path: PathBuf,
    /// Shortage score extract file or directory.
    pub hpsa_path: PathBuf,
    /// Preventable hospitalization extract file or directory.
    pub pqi_path: PathBuf,
    /// Destination for the reconciled CSV.
    pub output_path: PathBuf,
    /// Optional destination for the JSON run diagnostics.
    pub diagnostics_path: Option<PathBuf>,
    /// State abbreviations dropped from the output.
    pub excluded_states: Vec<String>,
    /// Optional subset of counties to load (raw identifiers, any width).
    pub fips_filter: Option<Vec<String>>,
    /// Rows per record batch while loading.
    pub batch_size: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            rucc_path: PathBuf::from("data/rucc.csv"),
            hpsa_path: PathBuf::from("data/hpsa.csv"),
            pqi_path: PathBuf::from("data/pqi.csv"),
            output_path: PathBuf::from("counties.csv"),
            diagnostics_path: None,
            excluded_states: DEFAULT_EXCLUDED_STATES
                .iter()
                .map(ToString::to_string)
                .collect(),
            fips_filter: None,
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }
}

impl PipelineConfig {
    /// Load configuration from a JSON file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(Into::into)
    }

    /// Check that every source path exists before the run starts.
    ///
    /// # Errors
    /// Returns a configuration error naming the first missing source.
    pub fn validate(&self) -> Result<()> {
        for (name, path) in [
            ("classification", &self.rucc_path),
            ("shortage", &self.hpsa_path),
            ("hospitalization", &self.pqi_path),
        ] {
            if !path.exists() {
                return Err(ReconcilerError::Config(format!(
                    "{name} source not found: {}",
                    path.display()
                )));
            }
        }
        if self.batch_size == 0 {
            return Err(ReconcilerError::Config("batch_size must be positive".into()));
        }
        Ok(())
    }

    /// Build the optional county subset filter.
    ///
    /// # Errors
    /// Returns a configuration error if any filter value is malformed.
    pub fn build_fips_filter(&self) -> Result<Option<FipsFilter>> {
        self.fips_filter
            .as_ref()
            .map(|values| FipsFilter::new(values, None))
            .transpose()
    }
}
