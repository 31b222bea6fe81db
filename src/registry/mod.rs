//! Source table registers.
//!
//! Each of the three public-health sources is wrapped in a register that
//! knows its name, its declared schema, and how to load its extract into
//! Arrow record batches. The registers share a `TableSource` that handles
//! files and directories, both Parquet and CSV, with parallel loading for
//! multi-file sources.

pub mod factory;
pub mod hpsa;
pub mod pqi;
pub mod rucc;

use std::future::Future;
use std::path::Path;
use std::pin::Pin;

use arrow::datatypes::SchemaRef;
use arrow::record_batch::RecordBatch;
use rayon::prelude::*;

use crate::error::{ReconcilerError, Result};
use crate::filter::FipsFilter;
use crate::reader::{self, DEFAULT_BATCH_SIZE};
use crate::utils::logging::create_progress_bar;

/// Common interface for the source registers.
pub trait RegisterLoader: Send + Sync {
    /// Get the name of the register
    fn register_name(&self) -> &'static str;

    /// Get the declared schema for this register
    fn schema(&self) -> SchemaRef;

    /// Load records from the register
    ///
    /// # Arguments
    /// * `path` - Extract file, or directory of same-schema extract files
    /// * `fips_filter` - Optional filter to only load specific counties
    ///
    /// # Returns
    /// * `Result<Vec<RecordBatch>>` - Arrow record batches with the loaded data
    fn load(&self, path: &Path, fips_filter: Option<&FipsFilter>) -> Result<Vec<RecordBatch>>;

    /// Load records from the register asynchronously
    fn load_async<'a>(
        &'a self,
        path: &'a Path,
        fips_filter: Option<&'a FipsFilter>,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<RecordBatch>>> + Send + 'a>> {
        Box::pin(async move { self.load(path, fips_filter) })
    }
}

/// Shared loading behavior behind every register.
#[derive(Debug, Clone)]
pub struct TableSource {
    schema: SchemaRef,
    batch_size: usize,
}

impl TableSource {
    /// Create a source with the default batch size.
    #[must_use]
    pub fn new(schema: SchemaRef) -> Self {
        Self {
            schema,
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }

    /// Override the batch size.
    #[must_use]
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    /// The declared schema.
    #[must_use]
    pub fn schema(&self) -> SchemaRef {
        self.schema.clone()
    }

    /// Load an extract file or directory into record batches.
    ///
    /// Multi-file directories load in parallel when more than one CPU is
    /// available, with a progress bar across files.
    ///
    /// # Errors
    /// Returns an error if the path is missing or any file fails to decode.
    pub fn load(&self, path: &Path, fips_filter: Option<&FipsFilter>) -> Result<Vec<RecordBatch>> {
        if !path.exists() {
            return Err(ReconcilerError::Metadata(format!(
                "Source path not found: {}",
                path.display()
            )));
        }

        let files = if path.is_dir() {
            reader::find_table_files(path)?
        } else {
            vec![path.to_path_buf()]
        };

        let batches: Vec<RecordBatch> = if files.len() > 1 && num_cpus::get() > 1 {
            let bar = create_progress_bar(files.len() as u64, "loading source files");
            let nested: Result<Vec<Vec<RecordBatch>>> = files
                .par_iter()
                .map(|file| {
                    let result = reader::read_table(file, Some(&self.schema), self.batch_size);
                    bar.inc(1);
                    result
                })
                .collect();
            bar.finish_and_clear();
            nested?.into_iter().flatten().collect()
        } else {
            let mut all = Vec::new();
            for file in &files {
                all.extend(reader::read_table(file, Some(&self.schema), self.batch_size)?);
            }
            all
        };

        match fips_filter {
            Some(filter) => {
                let filtered: Result<Vec<RecordBatch>> =
                    batches.iter().map(|batch| filter.filter(batch)).collect();
                Ok(filtered?
                    .into_iter()
                    .filter(|batch| batch.num_rows() > 0)
                    .collect())
            }
            None => Ok(batches),
        }
    }
}
