//! County record models.
//!
//! `CountyRecord` is the reconciled row the pipeline produces; the raw row
//! types mirror the three source tables before key normalization.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::fips::FipsCode;

/// A field that may be absent on a reconciled record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingField {
    RuralUrban,
    HpsaScore,
    HospRate,
}

/// One reconciled row per county.
///
/// Absence of a numeric value is kept as `None` all the way through the
/// pipeline; a shortage score of zero is a real observation and must never
/// collapse into the absent case.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountyRecord {
    pub fips: FipsCode,
    pub county: String,
    pub state: String,
    /// Rural-urban continuum code (ordinal, 1 = most urban).
    pub rural_urban: Option<i32>,
    /// Health professional shortage score. `None` means the county was
    /// absent from the shortage table.
    pub hpsa_score: Option<f64>,
    /// Preventable hospitalization rate per 1,000 enrollees.
    pub hosp_rate: Option<f64>,
}

impl CountyRecord {
    /// The fields this record is missing, in diagnostic order.
    #[must_use]
    pub fn missing_fields(&self) -> SmallVec<[MissingField; 3]> {
        let mut fields = SmallVec::new();
        if self.rural_urban.is_none() {
            fields.push(MissingField::RuralUrban);
        }
        if self.hpsa_score.is_none() {
            fields.push(MissingField::HpsaScore);
        }
        if self.hosp_rate.is_none() {
            fields.push(MissingField::HospRate);
        }
        fields
    }

    /// Whether classification, score, and rate are all present.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.rural_urban.is_some() && self.hpsa_score.is_some() && self.hosp_rate.is_some()
    }
}

/// A classification-table row as loaded, key not yet normalized.
#[derive(Debug, Clone, PartialEq)]
pub struct RuccRow {
    pub fips: String,
    pub county: Option<String>,
    pub state: Option<String>,
    pub rural_urban: Option<i32>,
}

/// A shortage-table row as loaded.
#[derive(Debug, Clone, PartialEq)]
pub struct HpsaRow {
    pub fips: String,
    pub hpsa_score: Option<f64>,
}

/// A hospitalization-table row as loaded.
#[derive(Debug, Clone, PartialEq)]
pub struct PqiRow {
    pub fips: String,
    pub hosp_rate: Option<f64>,
}
