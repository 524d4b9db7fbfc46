//! Test-case auto-generation
//!
//! Produces, for every object in a project, one case per category in the
//! fixed generation set {Functional, Negative, Boundary, Regression}. Keys
//! are deterministic (`<objectName>-<category>-<sequence>`) and the sequence
//! continues past existing keys, so repeated generation never collides.

use crosswalk_types::{CaseId, Project, TestCase, DEFAULT_STEPS, GENERATED_CATEGORIES};

/// Result of one auto-generation pass
#[derive(Debug, Clone, Default)]
pub struct GenerationReport {
    /// Ids of the cases created, in generation order
    pub created: Vec<CaseId>,
}

impl GenerationReport {
    /// Number of cases created
    #[inline]
    #[must_use]
    pub fn count(&self) -> usize {
        self.created.len()
    }
}

/// Next free sequence number for `<object>-<category>-` keys
fn next_sequence(project: &Project, prefix: &str) -> u32 {
    project
        .test_cases
        .iter()
        .filter_map(|c| c.case_key.strip_prefix(prefix))
        .filter_map(|suffix| suffix.parse::<u32>().ok())
        .max()
        .map_or(1, |n| n + 1)
}

/// Generate certification test cases for every object in the project.
///
/// Produces exactly `4 x N` new cases for a project with `N` objects, each
/// with default steps, default expected results, and outcome `NotExecuted`.
pub fn generate_for_project(project: &mut Project) -> GenerationReport {
    let mut report = GenerationReport::default();

    let object_meta: Vec<_> = project
        .objects
        .iter()
        .map(|o| (o.id, o.name.clone()))
        .collect();

    for (object_id, object_name) in object_meta {
        for category in GENERATED_CATEGORIES {
            let prefix = format!("{object_name}-{category}-");
            let sequence = next_sequence(project, &prefix);
            let case_key = format!("{prefix}{sequence:03}");

            let case = TestCase::new(
                project.id,
                case_key,
                format!("{category} coverage for {object_name}"),
                category,
                DEFAULT_STEPS.iter().map(|s| (*s).to_string()).collect(),
                format!("{object_name} behaves identically after migration"),
            )
            .for_object(object_id);

            report.created.push(case.id);
            project.test_cases.push(case);
        }
    }

    tracing::info!(
        project_id = %project.id,
        created = report.count(),
        "auto-generated test cases"
    );
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crosswalk_types::{Category, Outcome, ProjectObject};
    use std::collections::HashSet;

    fn project_with_objects(n: usize) -> Project {
        let mut project = Project::new("p", "COBOL");
        for i in 0..n {
            project
                .objects
                .push(ProjectObject::new(format!("OBJ{i}"), "module", "code"));
        }
        project
    }

    #[test]
    fn generates_four_per_object_with_unique_keys() {
        let mut project = project_with_objects(3);
        let report = generate_for_project(&mut project);

        assert_eq!(report.count(), 12);
        assert_eq!(project.test_cases.len(), 12);

        let keys: HashSet<&str> = project
            .test_cases
            .iter()
            .map(|c| c.case_key.as_str())
            .collect();
        assert_eq!(keys.len(), 12);
        assert!(keys.contains("OBJ0-Functional-001"));
        assert!(keys.contains("OBJ2-Regression-001"));
    }

    #[test]
    fn generated_cases_use_defaults() {
        let mut project = project_with_objects(1);
        generate_for_project(&mut project);

        let case = &project.test_cases[0];
        assert_eq!(case.category, Category::Functional);
        assert_eq!(case.outcome, Outcome::NotExecuted);
        assert_eq!(
            case.steps,
            vec!["execute", "verify behavior", "validate results"]
        );
        assert_eq!(case.object_id, Some(project.objects[0].id));
    }

    #[test]
    fn repeated_generation_continues_the_sequence() {
        let mut project = project_with_objects(1);
        generate_for_project(&mut project);
        generate_for_project(&mut project);

        assert_eq!(project.test_cases.len(), 8);
        let keys: Vec<&str> = project
            .test_cases
            .iter()
            .map(|c| c.case_key.as_str())
            .collect();
        assert!(keys.contains(&"OBJ0-Functional-001"));
        assert!(keys.contains(&"OBJ0-Functional-002"));

        let unique: HashSet<&&str> = keys.iter().collect();
        assert_eq!(unique.len(), keys.len());
    }

    #[test]
    fn empty_project_generates_nothing() {
        let mut project = project_with_objects(0);
        let report = generate_for_project(&mut project);
        assert_eq!(report.count(), 0);
        assert!(project.test_cases.is_empty());
    }
}
