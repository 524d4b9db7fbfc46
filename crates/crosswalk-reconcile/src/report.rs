//! Reconciliation report types
//!
//! The report is the transient output of one run, owned by the caller.
//! Operator classification mutates the report in place; the tolerance
//! verdict is advisory and never blocks classification.

use serde::{Deserialize, Serialize};

/// Comparison status of one attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStatus {
    /// Values are equal under the configured comparison
    Match,
    /// Values differ (or one side is absent)
    Mismatch,
}

/// Operator judgment on a mismatch (or a whole record)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Classification {
    /// Difference is acceptable
    Acceptable,
    /// Difference is a defect
    Rejected,
    /// Needs investigation before judgment
    NeedsInvestigation,
}

/// One attribute compared across the two systems
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeComparison {
    /// Attribute name
    pub name: String,
    /// Original-system value; `None` when absent on that side
    pub original: Option<String>,
    /// Converted-system value; `None` when absent on that side
    pub converted: Option<String>,
    /// Comparison status
    pub status: MatchStatus,
    /// Operator classification, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub classification: Option<Classification>,
    /// Operator notes, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl AttributeComparison {
    /// Whether the attribute mismatched
    #[inline]
    #[must_use]
    pub fn is_mismatch(&self) -> bool {
        self.status == MatchStatus::Mismatch
    }
}

/// Reconciliation result for one paired record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordValidation {
    /// Record identifier
    pub record_id: String,
    /// Ordered attribute comparisons
    pub attributes: Vec<AttributeComparison>,
    /// Record-level operator classification, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub classification: Option<Classification>,
    /// Record-level operator notes, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl RecordValidation {
    /// Count of mismatched attributes in this record
    #[must_use]
    pub fn mismatch_count(&self) -> usize {
        self.attributes.iter().filter(|a| a.is_mismatch()).count()
    }
}

/// Classification/report lookup failures
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReconcileError {
    /// Record id not present in the report
    #[error("record not in report: {0}")]
    UnknownRecord(String),

    /// Attribute not present in the record's comparison list
    #[error("attribute {attribute:?} not in record {record_id:?}")]
    UnknownAttribute {
        /// Record identifier
        record_id: String,
        /// Attribute name
        attribute: String,
    },
}

/// Full result of one reconciliation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReconciliationReport {
    /// Per-record results for records present on both sides
    pub records: Vec<RecordValidation>,
    /// Ids present only in the original output
    pub missing_in_converted: Vec<String>,
    /// Ids present only in the converted output
    pub missing_in_original: Vec<String>,
    /// Total attributes compared across paired records
    pub total_attributes: usize,
    /// Mismatched attributes across paired records
    pub mismatched_attributes: usize,
    /// `mismatched / total * 100`; 0.0 when nothing was compared
    pub mismatch_ratio: f64,
    /// Tolerance the run was evaluated against
    pub tolerance_pct: f64,
}

impl ReconciliationReport {
    /// Whether the run's mismatch ratio is within the configured tolerance.
    ///
    /// Advisory only: individual classification stays available either way.
    #[inline]
    #[must_use]
    pub fn within_tolerance(&self) -> bool {
        self.mismatch_ratio <= self.tolerance_pct
    }

    /// Whether any record existed on only one side
    #[inline]
    #[must_use]
    pub fn has_unpaired_records(&self) -> bool {
        !self.missing_in_converted.is_empty() || !self.missing_in_original.is_empty()
    }

    /// Classify one attribute of one record.
    ///
    /// Permitted for matched and mismatched attributes alike, and regardless
    /// of the tolerance verdict.
    pub fn classify_attribute(
        &mut self,
        record_id: &str,
        attribute: &str,
        classification: Classification,
        notes: Option<String>,
    ) -> Result<(), ReconcileError> {
        let record = self
            .records
            .iter_mut()
            .find(|r| r.record_id == record_id)
            .ok_or_else(|| ReconcileError::UnknownRecord(record_id.to_string()))?;

        let attr = record
            .attributes
            .iter_mut()
            .find(|a| a.name == attribute)
            .ok_or_else(|| ReconcileError::UnknownAttribute {
                record_id: record_id.to_string(),
                attribute: attribute.to_string(),
            })?;

        attr.classification = Some(classification);
        attr.notes = notes;
        Ok(())
    }

    /// Classify a whole record
    pub fn classify_record(
        &mut self,
        record_id: &str,
        classification: Classification,
        notes: Option<String>,
    ) -> Result<(), ReconcileError> {
        let record = self
            .records
            .iter_mut()
            .find(|r| r.record_id == record_id)
            .ok_or_else(|| ReconcileError::UnknownRecord(record_id.to_string()))?;

        record.classification = Some(classification);
        record.notes = notes;
        Ok(())
    }

    /// Mismatched attributes still lacking an operator classification
    #[must_use]
    pub fn unclassified_mismatches(&self) -> usize {
        self.records
            .iter()
            .flat_map(|r| r.attributes.iter())
            .filter(|a| a.is_mismatch() && a.classification.is_none())
            .count()
    }
}
