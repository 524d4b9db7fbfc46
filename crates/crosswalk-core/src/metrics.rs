//! Metrics aggregation
//!
//! Pure read-time projections over project state. Nothing here stores
//! anything; every number is re-derivable from the project document.

use crosswalk_types::{ComplexityTier, ObjectId, Outcome, Project, ProjectId, ValidationStatus};
use serde::{Deserialize, Serialize};

/// Per-status object counts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusCounts {
    /// Objects with no reconciliation started
    pub not_started: usize,
    /// Objects mid-run
    pub in_progress: usize,
    /// Objects flagged for review
    pub under_review: usize,
    /// Objects with reconciliation finished
    pub completed: usize,
}

/// Project-level metrics snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectMetrics {
    /// Project the snapshot was taken from
    pub project_id: ProjectId,
    /// Derived complexity tier
    pub complexity: ComplexityTier,
    /// Total objects
    pub total_objects: usize,
    /// Objects with non-empty converted code
    pub converted_objects: usize,
    /// `round(converted / total * 100)`; 0 for an empty project
    pub completion_percentage: u8,
    /// Mean per-object validation completion, rounded; 0 for an empty project
    pub validation_completion: u8,
    /// Per-status object counts
    pub status_counts: StatusCounts,
    /// Total test cases in the corpus
    pub total_test_cases: usize,
    /// Test cases with outcome `Pass`
    pub passed_test_cases: usize,
    /// `passed / total * 100`; `None` when the corpus is empty ("no data")
    pub pass_rate: Option<f64>,
}

/// Object-level metrics snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectMetrics {
    /// Object the snapshot was taken from
    pub object_id: ObjectId,
    /// Whether the pipeline has produced output
    pub converted: bool,
    /// Conversion confidence, if converted
    pub confidence: Option<u8>,
    /// Whether the object is flagged for review
    pub needs_review: bool,
    /// Reconciliation state
    pub validation_status: ValidationStatus,
    /// Reconciliation completion percentage
    pub validation_completion: u8,
    /// Test cases scoped to this object
    pub total_test_cases: usize,
    /// Scoped test cases with outcome `Pass`
    pub passed_test_cases: usize,
    /// Scoped pass rate; `None` when no scoped cases exist
    pub pass_rate: Option<f64>,
}

/// Conversion completion percentage, rounded; 0 for an empty project
#[must_use]
pub fn completion_percentage(project: &Project) -> u8 {
    let total = project.objects.len();
    if total == 0 {
        return 0;
    }
    let converted = project.converted_count();
    (converted as f64 / total as f64 * 100.0).round() as u8
}

/// Pass rate over an outcome iterator; `None` when it yields nothing
fn pass_rate<I: IntoIterator<Item = Outcome>>(outcomes: I) -> (usize, usize, Option<f64>) {
    let mut total = 0usize;
    let mut passed = 0usize;
    for outcome in outcomes {
        total += 1;
        if outcome == Outcome::Pass {
            passed += 1;
        }
    }
    let rate = if total == 0 {
        None
    } else {
        Some(passed as f64 / total as f64 * 100.0)
    };
    (total, passed, rate)
}

/// Take a project-level metrics snapshot
#[must_use]
pub fn project_metrics(project: &Project) -> ProjectMetrics {
    let mut status_counts = StatusCounts::default();
    let mut completion_sum: u64 = 0;
    for object in &project.objects {
        completion_sum += u64::from(object.validation_completion);
        match object.validation_status {
            ValidationStatus::NotStarted => status_counts.not_started += 1,
            ValidationStatus::InProgress => status_counts.in_progress += 1,
            ValidationStatus::UnderReview => status_counts.under_review += 1,
            ValidationStatus::Completed => status_counts.completed += 1,
        }
    }

    let validation_completion = if project.objects.is_empty() {
        0
    } else {
        (completion_sum as f64 / project.objects.len() as f64).round() as u8
    };

    let (total_test_cases, passed_test_cases, rate) =
        pass_rate(project.test_cases.iter().map(|c| c.outcome));

    ProjectMetrics {
        project_id: project.id,
        complexity: project.complexity,
        total_objects: project.objects.len(),
        converted_objects: project.converted_count(),
        completion_percentage: completion_percentage(project),
        validation_completion,
        status_counts,
        total_test_cases,
        passed_test_cases,
        pass_rate: rate,
    }
}

/// Take an object-level metrics snapshot
#[must_use]
pub fn object_metrics(project: &Project, object_id: ObjectId) -> Option<ObjectMetrics> {
    let object = project.object(object_id)?;
    let (total_test_cases, passed_test_cases, rate) = pass_rate(
        project
            .test_cases
            .iter()
            .filter(|c| c.object_id == Some(object_id))
            .map(|c| c.outcome),
    );

    Some(ObjectMetrics {
        object_id,
        converted: object.is_converted(),
        confidence: object.confidence,
        needs_review: object.needs_review,
        validation_status: object.validation_status,
        validation_completion: object.validation_completion,
        total_test_cases,
        passed_test_cases,
        pass_rate: rate,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crosswalk_types::{Category, ProjectObject, TestCase};

    fn project_two_objects_one_converted() -> Project {
        let mut project = Project::new("p", "COBOL");
        let mut converted = ProjectObject::new("a", "module", "code");
        converted.record_conversion("out", 92);
        project.objects.push(converted);
        project.objects.push(ProjectObject::new("b", "module", "code"));
        project
    }

    #[test]
    fn completion_is_exact_ratio_rounded() {
        let project = project_two_objects_one_converted();
        assert_eq!(completion_percentage(&project), 50);
    }

    #[test]
    fn empty_project_reports_zero_not_nan() {
        let project = Project::new("p", "COBOL");
        assert_eq!(completion_percentage(&project), 0);

        let metrics = project_metrics(&project);
        assert_eq!(metrics.completion_percentage, 0);
        assert_eq!(metrics.validation_completion, 0);
        assert_eq!(metrics.pass_rate, None);
    }

    #[test]
    fn pass_rate_none_without_cases_some_with() {
        let mut project = project_two_objects_one_converted();
        assert_eq!(project_metrics(&project).pass_rate, None);

        for (key, outcome) in [
            ("K-1", Outcome::Pass),
            ("K-2", Outcome::Pass),
            ("K-3", Outcome::Fail),
            ("K-4", Outcome::NotExecuted),
        ] {
            let mut case = TestCase::new(
                project.id,
                key,
                "desc",
                Category::Functional,
                vec!["step".into()],
                "expected",
            );
            case.outcome = outcome;
            project.test_cases.push(case);
        }

        let metrics = project_metrics(&project);
        assert_eq!(metrics.total_test_cases, 4);
        assert_eq!(metrics.passed_test_cases, 2);
        assert_eq!(metrics.pass_rate, Some(50.0));
    }

    #[test]
    fn object_scope_filters_cases() {
        let mut project = project_two_objects_one_converted();
        let a = project.objects[0].id;
        let b = project.objects[1].id;

        let mut case = TestCase::new(
            project.id,
            "K-A",
            "desc",
            Category::Functional,
            vec!["step".into()],
            "expected",
        )
        .for_object(a);
        case.outcome = Outcome::Pass;
        project.test_cases.push(case);

        let a_metrics = object_metrics(&project, a).unwrap();
        assert_eq!(a_metrics.pass_rate, Some(100.0));
        assert!(a_metrics.converted);
        assert_eq!(a_metrics.confidence, Some(92));

        let b_metrics = object_metrics(&project, b).unwrap();
        assert_eq!(b_metrics.pass_rate, None);
        assert!(!b_metrics.converted);
    }

    #[test]
    fn status_counts_partition_the_objects() {
        let mut project = project_two_objects_one_converted();
        project.objects[0].force_status(ValidationStatus::Completed);

        let metrics = project_metrics(&project);
        assert_eq!(metrics.status_counts.completed, 1);
        assert_eq!(metrics.status_counts.not_started, 1);
        assert_eq!(
            metrics.status_counts.completed
                + metrics.status_counts.not_started
                + metrics.status_counts.in_progress
                + metrics.status_counts.under_review,
            metrics.total_objects
        );
        // Mean of 100 and 0.
        assert_eq!(metrics.validation_completion, 50);
    }

    #[test]
    fn unknown_object_yields_none() {
        let project = project_two_objects_one_converted();
        assert!(object_metrics(&project, ObjectId::new()).is_none());
    }
}
