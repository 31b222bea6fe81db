//! Hospitalization source schema.

use std::sync::Arc;

use arrow_schema::{DataType, Field, Schema};

/// Arrow schema for the preventable hospitalization extract.
#[must_use]
pub fn pqi_schema() -> Arc<Schema> {
    Arc::new(Schema::new(vec![
        Field::new("fips", DataType::Utf8, false),
        Field::new("hosp_rate", DataType::Float64, true),
    ]))
}
