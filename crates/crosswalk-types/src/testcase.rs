//! Test-case entity
//!
//! A certification check scoped to a project or to one object. Entry paths
//! (manual, bulk import, auto-generation) all converge on this type.

use crate::ids::{CaseId, ObjectId, ProjectId};
use crate::status::{Category, Outcome};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Default steps for auto-generated test cases
pub const DEFAULT_STEPS: [&str; 3] = ["execute", "verify behavior", "validate results"];

/// One certification test case
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestCase {
    /// Stable identifier
    pub id: CaseId,
    /// Owning project
    pub project_id: ProjectId,
    /// Owning object; `None` means project-level
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub object_id: Option<ObjectId>,
    /// Human test-case identifier, unique within the project
    pub case_key: String,
    /// Free-text description
    pub description: String,
    /// Category from the fixed taxonomy
    pub category: Category,
    /// Ordered, non-empty test steps
    pub steps: Vec<String>,
    /// Expected-results text
    pub expected_results: String,
    /// Free-form parameters
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameters: Option<String>,
    /// Execution outcome; the only field expected to change post-creation
    #[serde(default)]
    pub outcome: Outcome,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last-update timestamp
    pub updated_at: DateTime<Utc>,
}

impl TestCase {
    /// Create a new test case with outcome `NotExecuted`
    #[must_use]
    pub fn new(
        project_id: ProjectId,
        case_key: impl Into<String>,
        description: impl Into<String>,
        category: Category,
        steps: Vec<String>,
        expected_results: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: CaseId::new(),
            project_id,
            object_id: None,
            case_key: case_key.into(),
            description: description.into(),
            category,
            steps,
            expected_results: expected_results.into(),
            parameters: None,
            outcome: Outcome::NotExecuted,
            created_at: now,
            updated_at: now,
        }
    }

    /// Scope to a specific object
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

    /// Record an execution outcome, bumping `updated_at`
    pub fn set_outcome(&mut self, outcome: Outcome) {
        self.outcome = outcome;
        self.updated_at = Utc::now();
    }

    /// Demote to project scope (cascade target of object removal)
    pub fn demote_to_project(&mut self) {
        self.object_id = None;
        self.updated_at = Utc::now();
    }
}
