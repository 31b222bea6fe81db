//! Key normalization and the three-way left join.
//!
//! The classification table drives the join: every classification row with a
//! well-formed key and a non-excluded state yields exactly one output
//! record. Secondary tables contribute values only where their normalized
//! key matches; counties they do not know stay in the output with absent
//! values.
//!
//! Rows that cannot participate are counted, never silently dropped:
//! malformed keys are tallied per source with their raw values, and
//! duplicate keys in a secondary table are resolved by letting the last
//! occurrence win while tallying the overwrites. A duplicate key in the
//! classification table breaks the uniqueness invariant and fails the run.

use rustc_hash::{FxHashMap, FxHashSet};
use serde::Serialize;

use crate::error::{ReconcilerError, Result};
use crate::models::{CountyRecord, FipsCode, HpsaRow, PqiRow, RuccRow};

/// State abbreviations excluded from the output by default (non-continental
/// jurisdictions).
pub const DEFAULT_EXCLUDED_STATES: &[&str] = &["AK", "HI"];

/// Join options: which jurisdictions to drop.
#[derive(Debug, Clone)]
pub struct ReconcileOptions {
    excluded_states: FxHashSet<String>,
}

impl ReconcileOptions {
    /// Build options from state abbreviations (compared case-insensitively).
    pub fn new<I, S>(excluded_states: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            excluded_states: excluded_states
                .into_iter()
                .map(|state| state.as_ref().trim().to_ascii_uppercase())
                .collect(),
        }
    }

    /// Whether a state abbreviation is excluded.
    #[must_use]
    pub fn is_excluded(&self, state: &str) -> bool {
        self.excluded_states
            .contains(&state.trim().to_ascii_uppercase())
    }
}

impl Default for ReconcileOptions {
    fn default() -> Self {
        Self::new(DEFAULT_EXCLUDED_STATES.iter().copied())
    }
}

/// Per-source tallies of rows that could not participate in the join.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SourceAnomalies {
    /// Raw key values whose normalization failed.
    pub malformed_keys: Vec<String>,
    /// Rows whose normalized key repeated an earlier row.
    pub duplicate_keys: usize,
}

/// Accounting for one reconciliation run.
#[derive(Debug, Clone, Serialize)]
pub struct ReconcileReport {
    /// Rows read from the classification table.
    pub classification_rows: usize,
    /// Classification rows dropped because their state is excluded.
    pub excluded_rows: usize,
    /// Output records with a shortage-table match.
    pub score_matches: usize,
    /// Output records with a hospitalization-table match.
    pub rate_matches: usize,
    pub classification: SourceAnomalies,
    pub shortage: SourceAnomalies,
    pub hospitalization: SourceAnomalies,
}

/// The reconciled records plus the run accounting.
#[derive(Debug, Clone)]
pub struct ReconciledSet {
    pub records: Vec<CountyRecord>,
    pub report: ReconcileReport,
}

/// Index a secondary table by normalized key.
///
/// Last occurrence wins on duplicates; each overwrite is tallied.
fn index_rows<I>(rows: I) -> (FxHashMap<FipsCode, Option<f64>>, SourceAnomalies)
where
    I: IntoIterator<Item = (String, Option<f64>)>,
{
    let mut index = FxHashMap::default();
    let mut anomalies = SourceAnomalies::default();
    for (raw, value) in rows {
        match FipsCode::new(&raw) {
            Ok(code) => {
                if index.insert(code, value).is_some() {
                    anomalies.duplicate_keys += 1;
                }
            }
            Err(_) => anomalies.malformed_keys.push(raw),
        }
    }
    (index, anomalies)
}

/// Left-join the three sources on the normalized county key.
///
/// # Errors
/// Returns `DuplicateKey` if the classification table repeats a normalized
/// key.
pub fn reconcile(
    classification: Vec<RuccRow>,
    shortage: Vec<HpsaRow>,
    hospitalization: Vec<PqiRow>,
    options: &ReconcileOptions,
) -> Result<ReconciledSet> {
    let classification_rows = classification.len();

    let (score_index, shortage_anomalies) =
        index_rows(shortage.into_iter().map(|row| (row.fips, row.hpsa_score)));
    let (rate_index, hospitalization_anomalies) = index_rows(
        hospitalization
            .into_iter()
            .map(|row| (row.fips, row.hosp_rate)),
    );

    let mut seen: FxHashSet<FipsCode> = FxHashSet::default();
    let mut classification_anomalies = SourceAnomalies::default();
    let mut records = Vec::with_capacity(classification_rows);
    let mut excluded_rows = 0;
    let mut score_matches = 0;
    let mut rate_matches = 0;

    for row in classification {
        let code = match FipsCode::new(&row.fips) {
            Ok(code) => code,
            Err(_) => {
                classification_anomalies.malformed_keys.push(row.fips);
                continue;
            }
        };
        if !seen.insert(code.clone()) {
            return Err(ReconcilerError::DuplicateKey(code.to_string()));
        }

        let state = row.state.unwrap_or_default();
        if options.is_excluded(&state) {
            excluded_rows += 1;
            continue;
        }

        let hpsa_score = match score_index.get(&code) {
            Some(value) => {
                score_matches += 1;
                *value
            }
            None => None,
        };
        let hosp_rate = match rate_index.get(&code) {
            Some(value) => {
                rate_matches += 1;
                *value
            }
            None => None,
        };

        records.push(CountyRecord {
            fips: code,
            county: row.county.unwrap_or_default(),
            state,
            rural_urban: row.rural_urban,
            hpsa_score,
            hosp_rate,
        });
    }

    Ok(ReconciledSet {
        records,
        report: ReconcileReport {
            classification_rows,
            excluded_rows,
            score_matches,
            rate_matches,
            classification: classification_anomalies,
            shortage: shortage_anomalies,
            hospitalization: hospitalization_anomalies,
        },
    })
}
