//! Corpus error taxonomy
//!
//! Validation errors reject the single operation before any mutation;
//! import-row problems are never surfaced here — they are collected per row
//! in the import report instead.

use crosswalk_types::{CaseId, ObjectId};

/// Test-case corpus failures
#[derive(Debug, thiserror::Error)]
pub enum CorpusError {
    /// Another case in the project already uses this key
    #[error("duplicate test case key: {0:?}")]
    DuplicateCaseKey(String),

    /// Case key must be non-empty
    #[error("test case key is empty")]
    EmptyCaseKey,

    /// Step list must be non-empty
    #[error("test case has no steps")]
    EmptySteps,

    /// Referenced case does not exist
    #[error("test case not found: {0}")]
    CaseNotFound(CaseId),

    /// Referenced object does not exist in the project
    #[error("object not found: {0}")]
    ObjectNotFound(ObjectId),

    /// CSV-level failure (unreadable input, broken writer)
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// Export buffer could not be finalized
    #[error("export failed: {0}")]
    Export(String),
}
