//! On-demand presentation adjustments.
//!
//! The dashboard exposes a single slider r in [0, 0.5] that scales both
//! displayed measures by (1 - r). Adjusted values are computed per request
//! and never persisted; a county with an absent measure has an absent
//! adjusted measure at every r.

use std::ops::RangeInclusive;

use crate::error::{ReconcilerError, Result};
use crate::models::CountyRecord;

/// A validated adjustment parameter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AdjustmentFactor(f64);

impl AdjustmentFactor {
    /// Valid range for the adjustment parameter.
    pub const RANGE: RangeInclusive<f64> = 0.0..=0.5;

    /// Validate and wrap an adjustment parameter.
    ///
    /// # Errors
    /// Returns a configuration error for values outside [0, 0.5] or
    /// non-finite values.
    pub fn new(r: f64) -> Result<Self> {
        if r.is_finite() && Self::RANGE.contains(&r) {
            Ok(Self(r))
        } else {
            Err(ReconcilerError::Config(format!(
                "adjustment factor {r} outside [0, 0.5]"
            )))
        }
    }

    /// The raw parameter value.
    #[must_use]
    pub fn value(self) -> f64 {
        self.0
    }
}

/// Shortage score scaled by (1 - r); absent stays absent.
#[must_use]
pub fn adjusted_score(record: &CountyRecord, factor: AdjustmentFactor) -> Option<f64> {
    record.hpsa_score.map(|score| score * (1.0 - factor.0))
}

/// Hospitalization rate scaled by (1 - r); absent stays absent.
#[must_use]
pub fn adjusted_rate(record: &CountyRecord, factor: AdjustmentFactor) -> Option<f64> {
    record.hosp_rate.map(|rate| rate * (1.0 - factor.0))
}
