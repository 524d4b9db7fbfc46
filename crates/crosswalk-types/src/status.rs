//! Closed state enums
//!
//! The source of record for every lifecycle state in the engine:
//! - [`ValidationStatus`] and its transition table
//! - [`Outcome`] for test-case execution results
//! - [`Category`] for the fixed test-case taxonomy
//! - [`ConversionStrategy`] for the conversion capability
//!
//! Free-form status strings are deliberately unrepresentable; parsing from
//! external input goes through `FromStr` and fails loudly.

use serde::{Deserialize, Serialize};

/// Reconciliation lifecycle state of one migration object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationStatus {
    /// No reconciliation run has been started
    NotStarted,
    /// A reconciliation run is underway
    InProgress,
    /// Flagged for operator review (reachable only by operator action)
    UnderReview,
    /// Reconciliation finished
    Completed,
}

impl ValidationStatus {
    /// Default completion percentage for this state
    #[inline]
    #[must_use]
    pub fn default_completion(&self) -> u8 {
        match self {
            Self::NotStarted => 0,
            Self::InProgress => 50,
            Self::UnderReview => 75,
            Self::Completed => 100,
        }
    }

    /// Stable lowercase name
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NotStarted => "not_started",
            Self::InProgress => "in_progress",
            Self::UnderReview => "under_review",
            Self::Completed => "completed",
        }
    }
}

impl Default for ValidationStatus {
    fn default() -> Self {
        Self::NotStarted
    }
}

impl std::fmt::Display for ValidationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// States reachable from `from` by automatic transition.
///
/// Operator overrides bypass this table entirely; see
/// `ProjectObject::force_status`.
#[must_use]
pub fn allowed_transitions(from: ValidationStatus) -> Vec<ValidationStatus> {
    use ValidationStatus::*;
    match from {
        NotStarted => vec![InProgress, Completed],
        InProgress => vec![UnderReview, Completed],
        UnderReview => vec![InProgress, Completed],
        Completed => vec![NotStarted],
    }
}

/// Validates an automatic state transition
pub fn validate_transition(
    from: ValidationStatus,
    to: ValidationStatus,
) -> Result<(), TransitionError> {
    if allowed_transitions(from).into_iter().any(|s| s == to) {
        Ok(())
    } else {
        Err(TransitionError::IllegalTransition { from, to })
    }
}

/// State-machine violations
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum TransitionError {
    /// Transition not in the allowed table
    #[error("illegal validation transition: {from} -> {to}")]
    IllegalTransition {
        /// Current state
        from: ValidationStatus,
        /// Requested state
        to: ValidationStatus,
    },
}

/// Execution outcome of a test case
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// Test passed
    Pass,
    /// Test failed
    Fail,
    /// Test blocked by an external condition
    Blocked,
    /// Test has not been run
    NotExecuted,
}

impl Outcome {
    /// Stable display name (import/export column value)
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pass => "Pass",
            Self::Fail => "Fail",
            Self::Blocked => "Blocked",
            Self::NotExecuted => "Not Executed",
        }
    }
}

impl Default for Outcome {
    fn default() -> Self {
        Self::NotExecuted
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Outcome {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pass" | "passed" => Ok(Self::Pass),
            "fail" | "failed" => Ok(Self::Fail),
            "blocked" => Ok(Self::Blocked),
            "not executed" | "not_executed" | "" => Ok(Self::NotExecuted),
            other => Err(ParseEnumError {
                kind: "outcome",
                value: other.to_string(),
            }),
        }
    }
}

/// Test-case category (fixed taxonomy)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Functional behavior
    Functional,
    /// Negative/error-path behavior
    Negative,
    /// Boundary values
    Boundary,
    /// Regression protection
    Regression,
    /// Cross-component integration
    Integration,
    /// UI/UX behavior
    UiUx,
    /// Performance characteristics
    Performance,
}

/// Categories produced by test-case auto-generation, in generation order
pub const GENERATED_CATEGORIES: [Category; 4] = [
    Category::Functional,
    Category::Negative,
    Category::Boundary,
    Category::Regression,
];

impl Category {
    /// Stable display name (import/export column value)
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Functional => "Functional",
            Self::Negative => "Negative",
            Self::Boundary => "Boundary",
            Self::Regression => "Regression",
            Self::Integration => "Integration",
            Self::UiUx => "UI/UX",
            Self::Performance => "Performance",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Category {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "functional" => Ok(Self::Functional),
            "negative" => Ok(Self::Negative),
            "boundary" => Ok(Self::Boundary),
            "regression" => Ok(Self::Regression),
            "integration" => Ok(Self::Integration),
            "ui/ux" | "uiux" | "ui_ux" => Ok(Self::UiUx),
            "performance" => Ok(Self::Performance),
            other => Err(ParseEnumError {
                kind: "category",
                value: other.to_string(),
            }),
        }
    }
}

/// Conversion strategy passed to the conversion capability
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConversionStrategy {
    /// Structure-preserving translation
    Refactor,
    /// Simplifying rewrite
    Rationalize,
}

impl ConversionStrategy {
    /// Stable lowercase name
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Refactor => "refactor",
            Self::Rationalize => "rationalize",
        }
    }
}

impl Default for ConversionStrategy {
    fn default() -> Self {
        Self::Refactor
    }
}

impl std::fmt::Display for ConversionStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Failed parse of a closed enum from external input
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unrecognized {kind}: {value:?}")]
pub struct ParseEnumError {
    /// Which enum was being parsed
    pub kind: &'static str,
    /// The offending input
    pub value: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn transition_table_allows_normal_flow() {
        use ValidationStatus::*;
        assert!(validate_transition(NotStarted, InProgress).is_ok());
        assert!(validate_transition(InProgress, Completed).is_ok());
        assert!(validate_transition(InProgress, UnderReview).is_ok());
        assert!(validate_transition(UnderReview, Completed).is_ok());
    }

    #[test]
    fn transition_table_allows_direct_override_pair() {
        use ValidationStatus::*;
        assert!(validate_transition(NotStarted, Completed).is_ok());
        assert!(validate_transition(Completed, NotStarted).is_ok());
    }

    #[test]
    fn transition_table_rejects_backwards_jump() {
        use ValidationStatus::*;
        assert!(matches!(
            validate_transition(Completed, InProgress),
            Err(TransitionError::IllegalTransition { .. })
        ));
        assert!(validate_transition(NotStarted, UnderReview).is_err());
    }

    #[test]
    fn default_completion_tracks_state() {
        assert_eq!(ValidationStatus::NotStarted.default_completion(), 0);
        assert_eq!(ValidationStatus::InProgress.default_completion(), 50);
        assert_eq!(ValidationStatus::UnderReview.default_completion(), 75);
        assert_eq!(ValidationStatus::Completed.default_completion(), 100);
    }

    #[test]
    fn outcome_parse_is_forgiving_about_case() {
        assert_eq!(Outcome::from_str("PASS").unwrap(), Outcome::Pass);
        assert_eq!(Outcome::from_str("not executed").unwrap(), Outcome::NotExecuted);
        assert!(Outcome::from_str("maybe").is_err());
    }

    #[test]
    fn category_parse_round_trips_display() {
        for cat in [
            Category::Functional,
            Category::Negative,
            Category::Boundary,
            Category::Regression,
            Category::Integration,
            Category::UiUx,
            Category::Performance,
        ] {
            assert_eq!(Category::from_str(cat.as_str()).unwrap(), cat);
        }
    }

    #[test]
    fn generated_categories_are_the_fixed_four() {
        assert_eq!(GENERATED_CATEGORIES.len(), 4);
        assert_eq!(GENERATED_CATEGORIES[0], Category::Functional);
        assert_eq!(GENERATED_CATEGORIES[3], Category::Regression);
    }
}
