//! Functional tests for the end-to-end migration lifecycle.
//!
//! These tests exercise the MigrationEngine across a whole engagement:
//! - project creation with derived complexity
//! - object registry and the conversion pipeline
//! - completion metrics as exact converted/total ratios
//! - a reconciliation run with operator classification on the report

use crosswalk_capability::SubstitutionConverter;
use crosswalk_core::{ConvertOptions, EngineConfig, EngineError, MigrationEngine};
use crosswalk_reconcile::{Classification, DataRecord, ReconcileConfig};
use crosswalk_store::MemoryRepository;
use crosswalk_types::{ComplexityTier, ValidationStatus};
use std::sync::Arc;

/// Helper: engine over in-memory storage with the deterministic converter.
fn make_engine() -> MigrationEngine {
    MigrationEngine::new(
        EngineConfig::new(),
        Arc::new(MemoryRepository::new()),
        Arc::new(SubstitutionConverter::new()),
    )
    .with_documenter(Arc::new(SubstitutionConverter::new()))
    .with_rule_extractor(Arc::new(SubstitutionConverter::new()))
}

/// Helper: a record with five attributes, two of them overridable.
fn record(id: &str, amount: &str, status: &str) -> DataRecord {
    DataRecord::new(id)
        .with_attribute("amount", amount)
        .with_attribute("status", status)
        .with_attribute("currency", "USD")
        .with_attribute("region", "EMEA")
        .with_attribute("batch", "B-77")
}

/// Tenet: complexity is derived from the source technology at creation and
/// completion is the exact converted/total ratio, not an estimate.
#[tokio::test]
async fn conversion_completion_is_exact_ratio() {
    let engine = make_engine();
    let project = engine
        .create_project("ledger rewrite", "IBM COBOL 85", Some("Rust"))
        .await
        .unwrap();
    assert_eq!(
        engine.project(project).await.unwrap().complexity,
        ComplexityTier::High
    );

    let loader = engine
        .add_object(project, "CUST-LOAD", "procedure", "PERFORM LOAD.")
        .await
        .unwrap();
    engine
        .add_object(project, "CUST-REPORT", "procedure", "PERFORM REPORT.")
        .await
        .unwrap();

    // Convert one of two objects.
    let report = engine
        .convert(project, &[loader], "Rust", ConvertOptions::new())
        .await
        .unwrap();
    assert!(report.is_complete());
    assert_eq!(report.completion_percentage, 50);

    let metrics = engine.metrics(project).await.unwrap();
    assert_eq!(metrics.total_objects, 2);
    assert_eq!(metrics.converted_objects, 1);
    assert_eq!(metrics.completion_percentage, 50);
}

/// Tenet: the conversion pipeline stages documentation and business rules on
/// the object alongside the converted code, in one atomic update.
#[tokio::test]
async fn conversion_attaches_requested_artifacts() {
    let engine = make_engine();
    let project = engine
        .create_project("ledger", "COBOL", Some("Rust"))
        .await
        .unwrap();
    let object = engine
        .add_object(project, "CUST-LOAD", "procedure", "PERFORM LOAD.\nDISPLAY OK.")
        .await
        .unwrap();

    engine
        .convert(
            project,
            &[object],
            "Rust",
            ConvertOptions::new()
                .with_documentation()
                .with_business_rules(),
        )
        .await
        .unwrap();

    let snapshot = engine.project(project).await.unwrap();
    let converted = snapshot.object(object).unwrap();
    assert!(converted.is_converted());
    assert!(converted.confidence.is_some());
    assert!(converted.documentation.is_some());
    assert!(converted.business_rules.is_some());
}

/// Tenet: a reconciliation run computes the mismatch ratio as
/// mismatched/total over paired records; the tolerance verdict is advisory
/// and flips with the configured tolerance, never with the data.
///
/// Worked scenario: 3 records x 5 attributes = 15 comparisons, 2 mismatches,
/// ratio 13.33. Tolerance 10 fails the verdict; tolerance 15 passes it.
#[tokio::test]
async fn mismatch_ratio_and_tolerance_verdict() {
    let engine = make_engine();
    let project = engine
        .create_project("ledger", "COBOL", Some("Rust"))
        .await
        .unwrap();
    let object = engine
        .add_object(project, "CUST-LOAD", "procedure", "PERFORM LOAD.")
        .await
        .unwrap();
    engine
        .convert(project, &[object], "Rust", ConvertOptions::new())
        .await
        .unwrap();

    let original = vec![
        record("r1", "100.00", "OPEN"),
        record("r2", "250.50", "OPEN"),
        record("r3", "75.25", "CLOSED"),
    ];
    let converted = vec![
        record("r1", "100.00", "OPEN"),
        record("r2", "250.49", "OPEN"),   // amount drifted
        record("r3", "75.25", "ARCHIVED"), // status remapped
    ];

    let strict = engine
        .reconcile(
            project,
            object,
            &original,
            &converted,
            Some(ReconcileConfig::new().with_tolerance(10.0)),
        )
        .await
        .unwrap();
    assert_eq!(strict.total_attributes, 15);
    assert_eq!(strict.mismatched_attributes, 2);
    assert!((strict.mismatch_ratio - 13.33).abs() < 0.01);
    assert!(!strict.within_tolerance());
    assert!(!strict.has_unpaired_records());

    let lenient = engine
        .reconcile(
            project,
            object,
            &original,
            &converted,
            Some(ReconcileConfig::new().with_tolerance(15.0)),
        )
        .await
        .unwrap();
    assert!((lenient.mismatch_ratio - strict.mismatch_ratio).abs() < f64::EPSILON);
    assert!(lenient.within_tolerance());
}

/// Tenet: the run advances the object's lifecycle to completed, and the
/// operator classifies mismatches on the report regardless of the verdict.
#[tokio::test]
async fn run_completes_lifecycle_and_operator_classifies() {
    let engine = make_engine();
    let project = engine
        .create_project("ledger", "COBOL", Some("Rust"))
        .await
        .unwrap();
    let object = engine
        .add_object(project, "CUST-LOAD", "procedure", "PERFORM LOAD.")
        .await
        .unwrap();
    engine
        .convert(project, &[object], "Rust", ConvertOptions::new())
        .await
        .unwrap();

    let original = vec![record("r1", "100.00", "OPEN")];
    let converted = vec![record("r1", "100.00", "ARCHIVED")];

    let mut report = engine
        .reconcile(project, object, &original, &converted, None)
        .await
        .unwrap();

    let snapshot = engine.project(project).await.unwrap();
    let state = snapshot.object(object).unwrap();
    assert_eq!(state.validation_status, ValidationStatus::Completed);
    assert_eq!(state.validation_completion, 100);

    // Classification is available even though the strict default verdict failed.
    assert!(!report.within_tolerance());
    assert_eq!(report.unclassified_mismatches(), 1);
    report
        .classify_attribute(
            "r1",
            "status",
            Classification::Acceptable,
            Some("status vocabulary remapped by design".into()),
        )
        .unwrap();
    assert_eq!(report.unclassified_mismatches(), 0);
}

/// Tenet: reconciliation refuses objects without converted output, so a run
/// can never certify code that does not exist.
#[tokio::test]
async fn unconverted_object_cannot_be_reconciled() {
    let engine = make_engine();
    let project = engine
        .create_project("ledger", "COBOL", None)
        .await
        .unwrap();
    let object = engine
        .add_object(project, "CUST-LOAD", "procedure", "PERFORM LOAD.")
        .await
        .unwrap();

    let err = engine
        .reconcile(project, object, &[], &[], None)
        .await
        .unwrap_err();
    match err {
        EngineError::MissingConvertedOutput(id) => assert_eq!(id, object),
        other => panic!("expected MissingConvertedOutput, got {other:?}"),
    }
}

/// Tenet: removing an object demotes its test cases to project scope rather
/// than deleting them, preserving authored history.
#[tokio::test]
async fn object_removal_demotes_scoped_cases() {
    let engine = make_engine();
    let project = engine
        .create_project("ledger", "COBOL", None)
        .await
        .unwrap();
    engine
        .add_object(project, "CUST-LOAD", "procedure", "PERFORM LOAD.")
        .await
        .unwrap();
    let doomed = engine
        .add_object(project, "CUST-PURGE", "procedure", "PERFORM PURGE.")
        .await
        .unwrap();

    // 4 generated cases per object, 8 total.
    let generated = engine.generate_test_cases(project).await.unwrap();
    assert_eq!(generated.count(), 8);

    engine.remove_object(project, doomed).await.unwrap();

    let snapshot = engine.project(project).await.unwrap();
    assert_eq!(snapshot.test_cases.len(), 8);
    let demoted = snapshot
        .test_cases
        .iter()
        .filter(|c| c.object_id.is_none())
        .count();
    assert_eq!(demoted, 4);
}
