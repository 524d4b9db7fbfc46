//! Manual corpus operations
//!
//! Single-case create/edit/delete plus outcome updates. All operations
//! validate before mutating, so a rejected call leaves the project intact.

use crate::error::CorpusError;
use crosswalk_types::{CaseId, Category, ObjectId, Outcome, Project, TestCase};

/// Fields for a new test case
#[derive(Debug, Clone)]
pub struct CaseDraft {
    /// Optional object scope
    pub object_id: Option<ObjectId>,
    /// Human identifier, unique within the project
    pub case_key: String,
    /// Free-text description
    pub description: String,
    /// Category from the fixed taxonomy
    pub category: Category,
    /// Ordered, non-empty steps
    pub steps: Vec<String>,
    /// Expected-results text
    pub expected_results: String,
    /// Free-form parameters
    pub parameters: Option<String>,
}

impl CaseDraft {
    /// Create a minimal draft
    #[must_use]
    pub fn new(
        case_key: impl Into<String>,
        description: impl Into<String>,
        category: Category,
        steps: Vec<String>,
        expected_results: impl Into<String>,
    ) -> Self {
        Self {
            object_id: None,
            case_key: case_key.into(),
            description: description.into(),
            category,
            steps,
            expected_results: expected_results.into(),
            parameters: None,
        }
    }

    /// Scope to an object
    #[inline]
    #[must_use]
    pub fn for_object(mut self, object_id: ObjectId) -> Self {
        self.object_id = Some(object_id);
        self
    }

    /// With free-form parameters
    #[inline]
    #[must_use]
    pub fn with_parameters(mut self, parameters: impl Into<String>) -> Self {
        self.parameters = Some(parameters.into());
        self
    }
}

/// Partial update for an existing case.
///
/// Outcome updates go through [`set_outcome`]; everything else is here.
#[derive(Debug, Clone, Default)]
pub struct CasePatch {
    /// Replace the description
    pub description: Option<String>,
    /// Replace the category
    pub category: Option<Category>,
    /// Replace the steps (must stay non-empty)
    pub steps: Option<Vec<String>>,
    /// Replace the expected results
    pub expected_results: Option<String>,
    /// Replace the parameters (`Some(None)` clears them)
    pub parameters: Option<Option<String>>,
    /// Re-scope to an object (`Some(None)` demotes to project level)
    pub object_id: Option<Option<ObjectId>>,
}

/// Add a test case to the project.
///
/// # Errors
/// - `EmptyCaseKey` / `EmptySteps` on structurally invalid drafts
/// - `DuplicateCaseKey` when the key is already used in this project
/// - `ObjectNotFound` when the draft is scoped to an unknown object
pub fn add_case(project: &mut Project, draft: CaseDraft) -> Result<CaseId, CorpusError> {
    if draft.case_key.trim().is_empty() {
        return Err(CorpusError::EmptyCaseKey);
    }
    if draft.steps.is_empty() {
        return Err(CorpusError::EmptySteps);
    }
    if project.has_case_key(&draft.case_key) {
        return Err(CorpusError::DuplicateCaseKey(draft.case_key));
    }
    if let Some(object_id) = draft.object_id {
        if project.object(object_id).is_none() {
            return Err(CorpusError::ObjectNotFound(object_id));
        }
    }

    let mut case = TestCase::new(
        project.id,
        draft.case_key,
        draft.description,
        draft.category,
        draft.steps,
        draft.expected_results,
    );
    case.object_id = draft.object_id;
    case.parameters = draft.parameters;

    let id = case.id;
    tracing::debug!(project_id = %project.id, case_key = %case.case_key, "test case added");
    project.test_cases.push(case);
    Ok(id)
}

/// Apply a partial update to an existing case
pub fn update_case(
    project: &mut Project,
    id: CaseId,
    patch: CasePatch,
) -> Result<(), CorpusError> {
    if let Some(steps) = &patch.steps {
        if steps.is_empty() {
            return Err(CorpusError::EmptySteps);
        }
    }
    if let Some(Some(object_id)) = patch.object_id {
        if project.object(object_id).is_none() {
            return Err(CorpusError::ObjectNotFound(object_id));
        }
    }

    let case = project
        .test_case_mut(id)
        .ok_or(CorpusError::CaseNotFound(id))?;

    if let Some(description) = patch.description {
        case.description = description;
    }
    if let Some(category) = patch.category {
        case.category = category;
    }
    if let Some(steps) = patch.steps {
        case.steps = steps;
    }
    if let Some(expected_results) = patch.expected_results {
        case.expected_results = expected_results;
    }
    if let Some(parameters) = patch.parameters {
        case.parameters = parameters;
    }
    if let Some(object_id) = patch.object_id {
        case.object_id = object_id;
    }
    case.updated_at = chrono::Utc::now();
    Ok(())
}

/// Remove a test case, returning it
pub fn remove_case(project: &mut Project, id: CaseId) -> Result<TestCase, CorpusError> {
    let idx = project
        .test_cases
        .iter()
        .position(|c| c.id == id)
        .ok_or(CorpusError::CaseNotFound(id))?;
    Ok(project.test_cases.remove(idx))
}

/// Record an execution outcome.
///
/// Deliberately decoupled from the owning object's validation status.
pub fn set_outcome(project: &mut Project, id: CaseId, outcome: Outcome) -> Result<(), CorpusError> {
    let case = project
        .test_case_mut(id)
        .ok_or(CorpusError::CaseNotFound(id))?;
    case.set_outcome(outcome);
    Ok(())
}
