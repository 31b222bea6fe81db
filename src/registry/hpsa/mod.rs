//! Health professional shortage score register.

pub mod conversion;
pub mod schema;

use std::path::Path;

use arrow::datatypes::SchemaRef;
use arrow::record_batch::RecordBatch;

use super::{RegisterLoader, TableSource};
use crate::error::Result;
use crate::filter::FipsFilter;

/// Loader for the shortage score extract.
#[derive(Debug, Clone)]
pub struct HpsaRegister {
    source: TableSource,
}

impl HpsaRegister {
    /// Create a new shortage register loader
    #[must_use]
    pub fn new() -> Self {
        Self {
            source: TableSource::new(schema::hpsa_schema()),
        }
    }

    /// Override the loading batch size.
    #[must_use]
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.source = self.source.with_batch_size(batch_size);
        self
    }
}

impl Default for HpsaRegister {
    fn default() -> Self {
        Self::new()
    }
}

impl RegisterLoader for HpsaRegister {
    fn register_name(&self) -> &'static str {
        "HPSA"
    }

    fn schema(&self) -> SchemaRef {
        self.source.schema()
    }

    fn load(&self, path: &Path, fips_filter: Option<&FipsFilter>) -> Result<Vec<RecordBatch>> {
        self.source.load(path, fips_filter)
    }
}
