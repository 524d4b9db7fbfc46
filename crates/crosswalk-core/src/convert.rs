//! Conversion pipeline options and batch report
//!
//! The pipeline itself lives on the engine; these are its input/output
//! types. Failures are per-object: one bad object never aborts the batch.

use crosswalk_types::{ConversionStrategy, ObjectId};
use serde::{Deserialize, Serialize};

/// Options for one conversion batch
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ConvertOptions {
    /// Invoke the documentation capability per object
    pub generate_documentation: bool,
    /// Invoke the rule-extraction capability per object
    pub extract_business_rules: bool,
    /// Strategy passed to the conversion capability
    pub strategy: ConversionStrategy,
}

impl ConvertOptions {
    /// Default options: refactor strategy, no extras
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Also generate documentation
    #[inline]
    #[must_use]
    pub fn with_documentation(mut self) -> Self {
        self.generate_documentation = true;
        self
    }

    /// Also extract business rules
    #[inline]
    #[must_use]
    pub fn with_business_rules(mut self) -> Self {
        self.extract_business_rules = true;
        self
    }

    /// With an explicit strategy
    #[inline]
    #[must_use]
    pub fn with_strategy(mut self, strategy: ConversionStrategy) -> Self {
        self.strategy = strategy;
        self
    }
}

/// One successfully converted object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectConversion {
    /// The converted object
    pub object_id: ObjectId,
    /// Confidence reported by the capability
    pub confidence: u8,
    /// Whether the confidence fell below the review threshold
    pub needs_review: bool,
}

/// One failed object within a batch
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectFailure {
    /// The failed object
    pub object_id: ObjectId,
    /// Failure description
    pub error: String,
    /// Whether a retry could plausibly succeed
    pub retryable: bool,
}

/// Result of one conversion batch
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConversionReport {
    /// Objects converted, in batch order
    pub succeeded: Vec<ObjectConversion>,
    /// Objects that failed, in batch order
    pub failed: Vec<ObjectFailure>,
    /// Project completion percentage after the batch
    pub completion_percentage: u8,
}

impl ConversionReport {
    /// Whether every selected object converted
    #[inline]
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}
