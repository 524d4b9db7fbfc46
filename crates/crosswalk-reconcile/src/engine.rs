//! Reconciliation algorithm
//!
//! Pairs original- and converted-system records by identifier, compares
//! every shared attribute, and produces a [`ReconciliationReport`] with the
//! aggregate mismatch ratio and tolerance verdict.
//!
//! # Invariants
//! - Deterministic: a fixed pair of record sets always yields the same
//!   report (attribute order follows the original record, converted-only
//!   attributes appended in converted order).
//! - Empty input never divides by zero; the ratio is 0.0.
//! - Unpaired records are surfaced, not silently dropped, but only paired
//!   records contribute attributes to the ratio.

use crate::record::DataRecord;
use crate::report::{
    AttributeComparison, MatchStatus, ReconciliationReport, RecordValidation,
};
use indexmap::IndexMap;

/// Configuration for one reconciliation run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReconcileConfig {
    /// Maximum acceptable mismatch ratio, in percent
    pub tolerance_pct: f64,
    /// When set, attributes that parse as numbers on both sides match if
    /// they differ by at most this epsilon. Default is exact equality.
    pub numeric_epsilon: Option<f64>,
}

impl ReconcileConfig {
    /// Default configuration: zero tolerance, exact matching
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With an operator-configured tolerance percentage
    #[inline]
    #[must_use]
    pub fn with_tolerance(mut self, tolerance_pct: f64) -> Self {
        self.tolerance_pct = tolerance_pct.max(0.0);
        self
    }

    /// With numeric epsilon matching
    #[inline]
    #[must_use]
    pub fn with_numeric_epsilon(mut self, epsilon: f64) -> Self {
        self.numeric_epsilon = Some(epsilon.abs());
        self
    }
}

impl Default for ReconcileConfig {
    fn default() -> Self {
        Self {
            tolerance_pct: 0.0,
            numeric_epsilon: None,
        }
    }
}

/// Compare two attribute values under the configured rules
fn values_match(original: &str, converted: &str, config: &ReconcileConfig) -> bool {
    if original == converted {
        return true;
    }
    if let Some(epsilon) = config.numeric_epsilon {
        if let (Ok(a), Ok(b)) = (original.trim().parse::<f64>(), converted.trim().parse::<f64>()) {
            return (a - b).abs() <= epsilon;
        }
    }
    false
}

/// Compare one paired record attribute-by-attribute
fn compare_record(
    original: &DataRecord,
    converted: &DataRecord,
    config: &ReconcileConfig,
) -> RecordValidation {
    let mut attributes = Vec::with_capacity(original.attributes.len());

    for (name, orig_value) in &original.attributes {
        let conv_value = converted.attributes.get(name);
        let status = match conv_value {
            Some(v) if values_match(orig_value, v, config) => MatchStatus::Match,
            _ => MatchStatus::Mismatch,
        };
        attributes.push(AttributeComparison {
            name: name.clone(),
            original: Some(orig_value.clone()),
            converted: conv_value.cloned(),
            status,
            classification: None,
            notes: None,
        });
    }

    // Converted-only attributes count as mismatches with an empty original side.
    for (name, conv_value) in &converted.attributes {
        if !original.attributes.contains_key(name) {
            attributes.push(AttributeComparison {
                name: name.clone(),
                original: None,
                converted: Some(conv_value.clone()),
                status: MatchStatus::Mismatch,
                classification: None,
                notes: None,
            });
        }
    }

    RecordValidation {
        record_id: original.id.clone(),
        attributes,
        classification: None,
        notes: None,
    }
}

/// Run attribute-level reconciliation over two record sets.
///
/// Records are paired by identifier; the report keeps the original set's
/// order. Recomputing over the same inputs yields an identical report.
#[must_use]
pub fn reconcile(
    original: &[DataRecord],
    converted: &[DataRecord],
    config: &ReconcileConfig,
) -> ReconciliationReport {
    let converted_by_id: IndexMap<&str, &DataRecord> =
        converted.iter().map(|r| (r.id.as_str(), r)).collect();

    let mut records = Vec::new();
    let mut missing_in_converted = Vec::new();

    for orig in original {
        match converted_by_id.get(orig.id.as_str()) {
            Some(conv) => records.push(compare_record(orig, conv, config)),
            None => missing_in_converted.push(orig.id.clone()),
        }
    }

    let original_ids: IndexMap<&str, ()> =
        original.iter().map(|r| (r.id.as_str(), ())).collect();
    let missing_in_original: Vec<String> = converted
        .iter()
        .filter(|r| !original_ids.contains_key(r.id.as_str()))
        .map(|r| r.id.clone())
        .collect();

    let total_attributes: usize = records.iter().map(|r| r.attributes.len()).sum();
    let mismatched_attributes: usize = records.iter().map(RecordValidation::mismatch_count).sum();

    let mismatch_ratio = if total_attributes == 0 {
        0.0
    } else {
        mismatched_attributes as f64 / total_attributes as f64 * 100.0
    };

    let report = ReconciliationReport {
        records,
        missing_in_converted,
        missing_in_original,
        total_attributes,
        mismatched_attributes,
        mismatch_ratio,
        tolerance_pct: config.tolerance_pct,
    };

    if !report.within_tolerance() {
        tracing::warn!(
            mismatch_ratio = report.mismatch_ratio,
            tolerance_pct = report.tolerance_pct,
            "reconciliation exceeds tolerance"
        );
    }
    if report.has_unpaired_records() {
        tracing::warn!(
            missing_in_converted = report.missing_in_converted.len(),
            missing_in_original = report.missing_in_original.len(),
            "reconciliation found unpaired records"
        );
    }

    report
}
