//! Project entity and complexity classification
//!
//! A project owns an ordered collection of migration objects and a test-case
//! corpus. Complexity is derived from the source technology at creation via
//! a fixed classification table and only recomputed on explicit request.

use crate::ids::{CaseId, ObjectId, ProjectId};
use crate::object::ProjectObject;
use crate::testcase::TestCase;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Derived project complexity tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComplexityTier {
    /// Modern source stack
    Low,
    /// Aging but structured source stack
    Medium,
    /// Legacy mainframe-era source stack
    High,
}

impl std::fmt::Display for ComplexityTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        };
        f.write_str(s)
    }
}

/// Technologies classified as legacy (High complexity)
const LEGACY_TECHNOLOGIES: [&str; 5] = ["cobol", "fortran", "rpg", "assembler", "pl/i"];

/// Technologies classified as medium complexity
const MEDIUM_TECHNOLOGIES: [&str; 4] = ["vb6", "delphi", "powerbuilder", "perl"];

/// Classify a source technology label against the fixed table.
///
/// Matching is case-insensitive and substring-based, so "IBM COBOL 85"
/// classifies as High.
#[must_use]
pub fn classify_technology(source_technology: &str) -> ComplexityTier {
    let tech = source_technology.to_ascii_lowercase();
    if LEGACY_TECHNOLOGIES.iter().any(|t| tech.contains(t)) {
        ComplexityTier::High
    } else if MEDIUM_TECHNOLOGIES.iter().any(|t| tech.contains(t)) {
        ComplexityTier::Medium
    } else {
        ComplexityTier::Low
    }
}

/// One migration engagement
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    /// Stable identifier
    pub id: ProjectId,
    /// Engagement name
    pub name: String,
    /// Source technology label
    pub source_technology: String,
    /// Target technology label, if already chosen
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_technology: Option<String>,
    /// Complexity tier, derived at creation
    pub complexity: ComplexityTier,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Migration objects, in insertion order
    #[serde(default)]
    pub objects: Vec<ProjectObject>,
    /// Test-case corpus
    #[serde(default)]
    pub test_cases: Vec<TestCase>,
}

impl Project {
    /// Create a new project, deriving complexity from the source technology
    #[must_use]
    pub fn new(name: impl Into<String>, source_technology: impl Into<String>) -> Self {
        let source_technology = source_technology.into();
        let complexity = classify_technology(&source_technology);
        Self {
            id: ProjectId::new(),
            name: name.into(),
            source_technology,
            target_technology: None,
            complexity,
            created_at: Utc::now(),
            objects: Vec::new(),
            test_cases: Vec::new(),
        }
    }

    /// With a target technology
    #[inline]
    #[must_use]
    pub fn with_target(mut self, target_technology: impl Into<String>) -> Self {
        self.target_technology = Some(target_technology.into());
        self
    }

    /// Re-derive complexity from the current source technology.
    ///
    /// Never invoked automatically; offered as an explicit operation.
    pub fn recompute_complexity(&mut self) {
        self.complexity = classify_technology(&self.source_technology);
    }

    /// Find an object by id
    #[must_use]
    pub fn object(&self, id: ObjectId) -> Option<&ProjectObject> {
        self.objects.iter().find(|o| o.id == id)
    }

    /// Find an object by id, mutably
    pub fn object_mut(&mut self, id: ObjectId) -> Option<&mut ProjectObject> {
        self.objects.iter_mut().find(|o| o.id == id)
    }

    /// Find a test case by id
    #[must_use]
    pub fn test_case(&self, id: CaseId) -> Option<&TestCase> {
        self.test_cases.iter().find(|c| c.id == id)
    }

    /// Find a test case by id, mutably
    pub fn test_case_mut(&mut self, id: CaseId) -> Option<&mut TestCase> {
        self.test_cases.iter_mut().find(|c| c.id == id)
    }

    /// Whether any object in the project uses this name (case-sensitive)
    #[must_use]
    pub fn has_object_named(&self, name: &str) -> bool {
        self.objects.iter().any(|o| o.name == name)
    }

    /// Whether any test case in the project uses this key
    #[must_use]
    pub fn has_case_key(&self, case_key: &str) -> bool {
        self.test_cases.iter().any(|c| c.case_key == case_key)
    }

    /// Count of objects with conversion output
    #[must_use]
    pub fn converted_count(&self) -> usize {
        self.objects.iter().filter(|o| o.is_converted()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classification_table() {
        assert_eq!(classify_technology("COBOL"), ComplexityTier::High);
        assert_eq!(classify_technology("IBM COBOL 85"), ComplexityTier::High);
        assert_eq!(classify_technology("PL/I"), ComplexityTier::High);
        assert_eq!(classify_technology("VB6"), ComplexityTier::Medium);
        assert_eq!(classify_technology("Delphi 7"), ComplexityTier::Medium);
        assert_eq!(classify_technology("Java 8"), ComplexityTier::Low);
        assert_eq!(classify_technology(""), ComplexityTier::Low);
    }

    #[test]
    fn project_derives_complexity_at_creation() {
        let project = Project::new("ledger rewrite", "COBOL").with_target("Rust");
        assert_eq!(project.complexity, ComplexityTier::High);
        assert_eq!(project.target_technology.as_deref(), Some("Rust"));
        assert!(project.objects.is_empty());
    }

    #[test]
    fn recompute_follows_edited_source_technology() {
        let mut project = Project::new("p", "COBOL");
        project.source_technology = "Java".to_string();
        // Not automatic.
        assert_eq!(project.complexity, ComplexityTier::High);
        project.recompute_complexity();
        assert_eq!(project.complexity, ComplexityTier::Low);
    }

    #[test]
    fn converted_count_ignores_empty_output() {
        let mut project = Project::new("p", "Perl");
        project.objects.push(ProjectObject::new("a", "module", "code"));
        project.objects.push(ProjectObject::new("b", "module", "code"));
        project.objects[0].record_conversion("out", 90);
        assert_eq!(project.converted_count(), 1);
    }

    #[test]
    fn project_round_trips_through_json() {
        let mut project = Project::new("p", "COBOL").with_target("Rust");
        let mut obj = ProjectObject::new("a", "module", "code");
        obj.record_conversion("converted", 80);
        obj.documentation = Some("docs".into());
        obj.business_rules = Some("rules".into());
        project.objects.push(obj);

        let json = serde_json::to_string(&project).unwrap();
        let back: Project = serde_json::from_str(&json).unwrap();
        assert_eq!(project, back);
    }
}
