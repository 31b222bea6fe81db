//! Derived metrics over the reconciled set.
//!
//! Three diagnostics drive the downstream narrative: which counties are
//! missing data, how many shortage scores are legitimately zero, and how
//! shortage relates to preventable hospitalization. The zero-score bucket
//! and the missing-score bucket are deliberately separate counts.

use serde::Serialize;
use smallvec::SmallVec;

use super::stat;
use crate::models::{CountyRecord, FipsCode, MissingField};
use crate::reconcile::ReconcileReport;

/// A county flagged for missing data, with the fields it lacks.
#[derive(Debug, Clone, Serialize)]
pub struct MissingRecord {
    pub fips: FipsCode,
    pub fields: SmallVec<[MissingField; 3]>,
}

/// Correlation between shortage score and hospitalization rate.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Correlation {
    /// A defined coefficient with its significance test.
    Defined {
        r: f64,
        /// Number of complete pairs behind the coefficient.
        n: usize,
        t_statistic: f64,
        /// Two-sided p-value for r != 0.
        p_value: f64,
        /// 95% confidence interval; absent when n <= 3 or |r| = 1.
        #[serde(skip_serializing_if = "Option::is_none")]
        ci95: Option<(f64, f64)>,
    },
    /// The statistic cannot be computed; the reason says why.
    Undefined { reason: String },
}

/// Diagnostics and statistics derived from the reconciled records.
#[derive(Debug, Clone, Serialize)]
pub struct DerivedMetrics {
    pub total_records: usize,
    pub complete_records: usize,
    /// Counties missing classification, score, or rate.
    pub incomplete: Vec<MissingRecord>,
    /// Counties whose shortage score is exactly zero (a real observation,
    /// not missing data).
    pub zero_score_count: usize,
    /// Counties with both a score and a rate.
    pub complete_pairs: usize,
    pub correlation: Correlation,
}

/// Compute diagnostics and the score/rate correlation.
#[must_use]
pub fn derive_metrics(records: &[CountyRecord]) -> DerivedMetrics {
    let mut incomplete = Vec::new();
    let mut zero_score_count = 0;
    let mut pairs = Vec::new();

    for record in records {
        let fields = record.missing_fields();
        if !fields.is_empty() {
            incomplete.push(MissingRecord {
                fips: record.fips.clone(),
                fields,
            });
        }
        if record.hpsa_score == Some(0.0) {
            zero_score_count += 1;
        }
        if let (Some(score), Some(rate)) = (record.hpsa_score, record.hosp_rate) {
            pairs.push((score, rate));
        }
    }

    let correlation = correlate(&pairs);
    DerivedMetrics {
        total_records: records.len(),
        complete_records: records.len() - incomplete.len(),
        incomplete,
        zero_score_count,
        complete_pairs: pairs.len(),
        correlation,
    }
}

/// Correlation over pairwise-complete score/rate pairs.
///
/// Zero scores count as real observations here; only the downstream scatter
/// view hides them, and that view is not this crate's concern.
#[must_use]
pub fn correlate(pairs: &[(f64, f64)]) -> Correlation {
    if pairs.len() < 2 {
        return Correlation::Undefined {
            reason: format!(
                "fewer than two complete score/rate pairs (found {})",
                pairs.len()
            ),
        };
    }
    match stat::pearson(pairs) {
        Some(r) => {
            let n = pairs.len();
            let t = stat::t_statistic(r, n);
            Correlation::Defined {
                r,
                n,
                t_statistic: t,
                p_value: stat::two_sided_p(t, (n - 2) as f64),
                ci95: stat::fisher_ci95(r, n),
            }
        }
        None => Correlation::Undefined {
            reason: "zero variance in scores or rates".to_string(),
        },
    }
}

/// Generate a human-readable run summary.
#[must_use]
pub fn generate_summary(report: &ReconcileReport, metrics: &DerivedMetrics) -> String {
    use itertools::Itertools;

    let mut summary = String::new();
    summary.push_str("Reconciliation Summary:\n");
    summary.push_str(&format!(
        "  Classification Rows: {}\n",
        report.classification_rows
    ));
    summary.push_str(&format!("  Excluded Jurisdictions: {}\n", report.excluded_rows));
    summary.push_str(&format!("  Output Counties: {}\n", metrics.total_records));
    summary.push_str(&format!(
        "  With Shortage Match: {} / With Hospitalization Match: {}\n",
        report.score_matches, report.rate_matches
    ));

    let malformed_total = report.classification.malformed_keys.len()
        + report.shortage.malformed_keys.len()
        + report.hospitalization.malformed_keys.len();
    if malformed_total > 0 {
        summary.push_str(&format!(
            "  Malformed Keys: {} (classification {}, shortage {}, hospitalization {})\n",
            malformed_total,
            report.classification.malformed_keys.len(),
            report.shortage.malformed_keys.len(),
            report.hospitalization.malformed_keys.len()
        ));
    }
    let duplicate_total = report.shortage.duplicate_keys + report.hospitalization.duplicate_keys;
    if duplicate_total > 0 {
        summary.push_str(&format!(
            "  Duplicate Secondary Keys (last occurrence kept): {duplicate_total}\n"
        ));
    }

    summary.push_str("\nData Completeness:\n");
    summary.push_str(&format!(
        "  Complete Counties: {}\n",
        metrics.complete_records
    ));
    summary.push_str(&format!(
        "  Incomplete Counties: {}\n",
        metrics.incomplete.len()
    ));
    if !metrics.incomplete.is_empty() {
        let preview = metrics
            .incomplete
            .iter()
            .take(10)
            .map(|record| record.fips.as_str())
            .join(", ");
        summary.push_str(&format!("  First Flagged: {preview}\n"));
    }
    summary.push_str(&format!(
        "  Zero Shortage Scores: {}\n",
        metrics.zero_score_count
    ));

    summary.push_str("\nShortage vs. Preventable Hospitalization:\n");
    match &metrics.correlation {
        Correlation::Defined {
            r,
            n,
            t_statistic,
            p_value,
            ci95,
        } => {
            summary.push_str(&format!("  r = {r:.4} over {n} counties\n"));
            summary.push_str(&format!(
                "  t = {t_statistic:.4}, two-sided p = {p_value:.4}\n"
            ));
            if let Some((lo, hi)) = ci95 {
                summary.push_str(&format!("  95% CI: [{lo:.4}, {hi:.4}]\n"));
            }
        }
        Correlation::Undefined { reason } => {
            summary.push_str(&format!("  Correlation undefined: {reason}\n"));
        }
    }

    summary
}
