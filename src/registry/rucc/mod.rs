//! Rural-urban continuum classification register.
//!
//! The classification table is the primary table of the reconciliation:
//! every county in the output originates from one of its rows, whether or
//! not the other sources know the county.

pub mod conversion;
pub mod schema;

use std::path::Path;

use arrow::datatypes::SchemaRef;
use arrow::record_batch::RecordBatch;

use super::{RegisterLoader, TableSource};
use crate::error::Result;
use crate::filter::FipsFilter;

/// Loader for the rural-urban continuum code extract.
#[derive(Debug, Clone)]
pub struct RuccRegister {
    source: TableSource,
}

impl RuccRegister {
    /// Create a new classification register loader
    #[must_use]
    pub fn new() -> Self {
        Self {
            source: TableSource::new(schema::rucc_schema()),
        }
    }

    /// Override the loading batch size.
    #[must_use]
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.source = self.source.with_batch_size(batch_size);
        self
    }
}

impl Default for RuccRegister {
    fn default() -> Self {
        Self::new()
    }
}

impl RegisterLoader for RuccRegister {
    fn register_name(&self) -> &'static str {
        "RUCC"
    }

    fn schema(&self) -> SchemaRef {
        self.source.schema()
    }

    fn load(&self, path: &Path, fips_filter: Option<&FipsFilter>) -> Result<Vec<RecordBatch>> {
        self.source.load(path, fips_filter)
    }
}
