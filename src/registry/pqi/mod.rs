//! Preventable hospitalization rate register.

pub mod conversion;
pub mod schema;

use std::path::Path;

use arrow::datatypes::SchemaRef;
use arrow::record_batch::RecordBatch;

use super::{RegisterLoader, TableSource};
use crate::error::Result;
use crate::filter::FipsFilter;

/// Loader for the preventable hospitalization extract.
#[derive(Debug, Clone)]
pub struct PqiRegister {
    source: TableSource,
}

impl PqiRegister {
    /// Create a new hospitalization register loader
    #[must_use]
    pub fn new() -> Self {
        Self {
            source: TableSource::new(schema::pqi_schema()),
        }
    }

    /// Override the loading batch size.
    #[must_use]
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.source = self.source.with_batch_size(batch_size);
        self
    }
}

impl Default for PqiRegister {
    fn default() -> Self {
        Self::new()
    }
}

impl RegisterLoader for PqiRegister {
    fn register_name(&self) -> &'static str {
        "PQI"
    }

    fn schema(&self) -> SchemaRef {
        self.source.schema()
    }

    fn load(&self, path: &Path, fips_filter: Option<&FipsFilter>) -> Result<Vec<RecordBatch>> {
        self.source.load(path, fips_filter)
    }
}
