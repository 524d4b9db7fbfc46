//! Engine error taxonomy
//!
//! Four recovery classes, none process-fatal:
//! - validation errors: rejected before any mutation, caller fixes input
//! - capability errors: scoped to one object, recorded in the batch report
//! - concurrency conflicts: retry after backoff
//! - state errors: caller mistakes, surfaced as typed variants

use crate::guard::OperationKind;
use crosswalk_capability::CapabilityError;
use crosswalk_store::StoreError;
use crosswalk_testcase::CorpusError;
use crosswalk_types::{ObjectId, ProjectId, TransitionError};

/// Main engine error type
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Another object in the project already uses this name
    #[error("duplicate object name: {0:?}")]
    DuplicateName(String),

    /// Original code must be non-empty
    #[error("original code is empty")]
    EmptyOriginalCode,

    /// Structurally invalid input
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Project does not exist
    #[error("project not found: {0}")]
    ProjectNotFound(ProjectId),

    /// Object does not exist in the project
    #[error("object not found: {0}")]
    ObjectNotFound(ObjectId),

    /// External conversion capability failed for one object
    #[error("conversion failed for object {object_id}: {source}")]
    ConversionFailed {
        /// The object being converted
        object_id: ObjectId,
        /// Underlying capability failure
        #[source]
        source: CapabilityError,
    },

    /// Another operation is already in flight for this object
    #[error("{operation} already in progress for object {object_id}")]
    OperationInProgress {
        /// The busy object
        object_id: ObjectId,
        /// The operation currently holding the object
        operation: OperationKind,
    },

    /// Reconciliation requested for an object that was never converted
    #[error("object {0} has no converted output")]
    MissingConvertedOutput(ObjectId),

    /// Illegal automatic status transition
    #[error("status transition rejected: {0}")]
    Transition(#[from] TransitionError),

    /// Test-case corpus failure
    #[error("corpus error: {0}")]
    Corpus(#[from] CorpusError),

    /// Persistence failure
    #[error("storage error: {0}")]
    Storage(#[from] StoreError),

    /// Capability call exceeded the configured timeout
    #[error("capability call timed out after {duration_secs}s")]
    Timeout {
        /// Configured timeout
        duration_secs: u64,
    },
}

impl EngineError {
    /// Whether a retry of the same call could plausibly succeed
    #[inline]
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::OperationInProgress { .. } | Self::Timeout { .. } | Self::Storage(_) => true,
            Self::ConversionFailed { source, .. } => source.is_retryable(),
            _ => false,
        }
    }

    /// Whether the error is a synchronous input-validation rejection
    #[inline]
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::DuplicateName(_)
                | Self::EmptyOriginalCode
                | Self::InvalidInput(_)
                | Self::Corpus(
                    CorpusError::DuplicateCaseKey(_)
                        | CorpusError::EmptyCaseKey
                        | CorpusError::EmptySteps
                )
        )
    }
}
