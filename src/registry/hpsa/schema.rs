//! Shortage source schema.

use std::sync::Arc;

use arrow_schema::{DataType, Field, Schema};

/// Arrow schema for the shortage score extract.
#[must_use]
pub fn hpsa_schema() -> Arc<Schema> {
    Arc::new(Schema::new(vec![
        Field::new("fips", DataType::Utf8, false),
        Field::new("hpsa_score", DataType::Float64, true),
    ]))
}
