//! Classification source schema.

use std::sync::Arc;

use arrow_schema::{DataType, Field, Schema};

/// Arrow schema for the rural-urban classification extract.
///
/// The key column is declared as a string so zero-padded codes survive;
/// integer-typed extracts are still accepted at extraction time.
#[must_use]
pub fn rucc_schema() -> Arc<Schema> {
    Arc::new(Schema::new(vec![
        Field::new("fips", DataType::Utf8, false),
        Field::new("county", DataType::Utf8, true),
        Field::new("state", DataType::Utf8, true),
        Field::new("rural_urban", DataType::Int32, true),
    ]))
}
