//! Migration object entity
//!
//! One independently convertible unit of the legacy system (a class,
//! procedure, module, etc.). Conversion artifacts and reconciliation state
//! live here; test cases reference objects by id from the project level.

use crate::ids::ObjectId;
use crate::status::{validate_transition, TransitionError, ValidationStatus};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Confidence scores below this threshold flag the object for review
pub const REVIEW_THRESHOLD: u8 = 85;

/// One migratable unit within a project
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectObject {
    /// Stable identifier
    pub id: ObjectId,
    /// Object name (unique within the project, case-sensitive)
    pub name: String,
    /// Type tag (class, procedure, module, ...)
    pub object_type: String,
    /// Original source text; non-empty, immutable except by explicit edit
    pub original_code: String,
    /// Converted source text; absent until the pipeline has run
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub converted_code: Option<String>,
    /// Generated documentation, if requested
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub documentation: Option<String>,
    /// Extracted business rules, if requested
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub business_rules: Option<String>,
    /// Conversion confidence in 0..=100
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<u8>,
    /// True iff confidence is present and below [`REVIEW_THRESHOLD`]
    #[serde(default)]
    pub needs_review: bool,
    /// Reconciliation lifecycle state
    #[serde(default)]
    pub validation_status: ValidationStatus,
    /// Reconciliation completion percentage in 0..=100
    #[serde(default)]
    pub validation_completion: u8,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

impl ProjectObject {
    /// Create a new object with empty conversion state
    #[inline]
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        object_type: impl Into<String>,
        original_code: impl Into<String>,
    ) -> Self {
        Self {
            id: ObjectId::new(),
            name: name.into(),
            object_type: object_type.into(),
            original_code: original_code.into(),
            converted_code: None,
            documentation: None,
            business_rules: None,
            confidence: None,
            needs_review: false,
            validation_status: ValidationStatus::NotStarted,
            validation_completion: 0,
            created_at: Utc::now(),
        }
    }

    /// Whether the conversion pipeline has produced output for this object
    #[inline]
    #[must_use]
    pub fn is_converted(&self) -> bool {
        self.converted_code
            .as_deref()
            .is_some_and(|c| !c.is_empty())
    }

    /// Record a conversion result, overwriting any previous one.
    ///
    /// Confidence is clamped to 100 and `needs_review` is re-derived.
    pub fn record_conversion(&mut self, converted_code: impl Into<String>, confidence: u8) {
        let confidence = confidence.min(100);
        self.converted_code = Some(converted_code.into());
        self.confidence = Some(confidence);
        self.needs_review = confidence < REVIEW_THRESHOLD;
    }

    /// Apply a validated (automatic) status transition.
    ///
    /// Completion is reset to the new state's default.
    pub fn transition_status(&mut self, to: ValidationStatus) -> Result<(), TransitionError> {
        validate_transition(self.validation_status, to)?;
        self.validation_status = to;
        self.validation_completion = to.default_completion();
        Ok(())
    }

    /// Operator override: force any status, bypassing the transition table.
    ///
    /// The UI must allow manual correction at any time, so this never fails.
    pub fn force_status(&mut self, to: ValidationStatus) {
        self.validation_status = to;
        self.validation_completion = to.default_completion();
    }

    /// Operator- or system-supplied completion for the intermediate states.
    ///
    /// `NotStarted` and `Completed` pin completion to 0 and 100; the value is
    /// ignored in those states. Clamped to 100.
    pub fn set_validation_completion(&mut self, completion: u8) {
        self.validation_completion = match self.validation_status {
            ValidationStatus::NotStarted => 0,
            ValidationStatus::Completed => 100,
            _ => completion.min(100),
        };
    }
}
