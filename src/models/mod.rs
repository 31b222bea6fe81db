//! Data model for the reconciliation pipeline.

pub mod county;
pub mod fips;

pub use county::{CountyRecord, HpsaRow, MissingField, PqiRow, RuccRow};
pub use fips::FipsCode;
