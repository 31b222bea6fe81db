//! County identifier normalization.
//!
//! All three source tables key their rows by a county FIPS code, but the raw
//! extracts disagree on formatting: integer-typed columns, strings with the
//! leading zero stripped, or already zero-padded strings. `FipsCode` is the
//! single normalized form the rest of the pipeline joins on.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{ReconcilerError, Result};

/// Largest representable county code: two state digits plus three county digits.
const MAX_FIPS: u32 = 99_999;

/// A normalized, 5-character zero-padded county FIPS code.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FipsCode(String);

impl FipsCode {
    /// Normalize a raw county identifier.
    ///
    /// Accepts any textual representation of a non-negative integer of up to
    /// five digits and pads it to the canonical 5-character form.
    /// Normalization is idempotent: feeding an already normalized code back
    /// in returns the same value.
    ///
    /// # Errors
    /// Returns `MalformedKey` for empty, non-numeric, negative, or
    /// too-wide input.
    pub fn new(raw: &str) -> Result<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ReconcilerError::MalformedKey(raw.to_string()));
        }
        let numeric: u32 = trimmed
            .parse()
            .map_err(|_| ReconcilerError::MalformedKey(raw.to_string()))?;
        Self::from_numeric(numeric).map_err(|_| ReconcilerError::MalformedKey(raw.to_string()))
    }

    /// Build a code directly from its numeric value.
    ///
    /// # Errors
    /// Returns `MalformedKey` when the value has more than five digits.
    pub fn from_numeric(value: u32) -> Result<Self> {
        if value > MAX_FIPS {
            return Err(ReconcilerError::MalformedKey(value.to_string()));
        }
        Ok(Self(format!("{value:05}")))
    }

    /// The normalized 5-character form.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FipsCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for FipsCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
