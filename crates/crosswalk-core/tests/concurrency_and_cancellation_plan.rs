//! Functional tests for per-object concurrency control and cancellation.
//!
//! These tests exercise the engine's in-flight guards and staging rules:
//! - a busy object fails fast with OperationInProgress instead of queueing
//! - an abandoned conversion leaves its object entirely unmodified and
//!   releases the guard
//! - capability calls are bounded by the configured timeout

use crosswalk_capability::{
    CapabilityError, ConversionCapability, ConversionOutput, SubstitutionConverter,
};
use crosswalk_core::{
    ConvertOptions, EngineConfig, EngineError, MigrationEngine, OperationKind,
};
use crosswalk_store::MemoryRepository;
use crosswalk_types::ConversionStrategy;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Notify;

/// Converter that signals entry and then blocks until released.
#[derive(Debug, Default)]
struct GatedConverter {
    entered: Notify,
    release: Notify,
}

#[async_trait::async_trait]
impl ConversionCapability for GatedConverter {
    async fn convert(
        &self,
        _source_code: &str,
        _source_tech: &str,
        _target_tech: &str,
        _strategy: ConversionStrategy,
    ) -> Result<ConversionOutput, CapabilityError> {
        self.entered.notify_one();
        self.release.notified().await;
        Ok(ConversionOutput::new("released", 90))
    }

    fn name(&self) -> &'static str {
        "gated"
    }
}

/// Converter that never returns.
#[derive(Debug)]
struct StalledConverter;

#[async_trait::async_trait]
impl ConversionCapability for StalledConverter {
    async fn convert(
        &self,
        _source_code: &str,
        _source_tech: &str,
        _target_tech: &str,
        _strategy: ConversionStrategy,
    ) -> Result<ConversionOutput, CapabilityError> {
        std::future::pending().await
    }

    fn name(&self) -> &'static str {
        "stalled"
    }
}

/// Tenet: while a conversion holds an object, a reconciliation request for
/// the same object is rejected immediately, naming the holder.
#[tokio::test]
async fn busy_object_fails_fast_with_the_holder() {
    let gate = Arc::new(GatedConverter::default());
    let engine = Arc::new(MigrationEngine::new(
        EngineConfig::new(),
        Arc::new(MemoryRepository::new()),
        Arc::clone(&gate) as Arc<dyn ConversionCapability>,
    ));

    let project = engine
        .create_project("ledger", "COBOL", Some("Rust"))
        .await
        .unwrap();
    let object = engine
        .add_object(project, "CUST-LOAD", "procedure", "PERFORM LOAD.")
        .await
        .unwrap();

    let background = {
        let engine = Arc::clone(&engine);
        tokio::spawn(async move {
            engine
                .convert(project, &[object], "Rust", ConvertOptions::new())
                .await
        })
    };

    // Deterministic: wait until the conversion has claimed the object.
    gate.entered.notified().await;

    let err = engine
        .reconcile(project, object, &[], &[], None)
        .await
        .unwrap_err();
    match err {
        EngineError::OperationInProgress { operation, .. } => {
            assert_eq!(operation, OperationKind::Conversion);
        }
        other => panic!("expected OperationInProgress, got {other:?}"),
    }
    assert!(err.is_retryable());

    gate.release.notify_one();
    let report = background.await.unwrap().unwrap();
    assert!(report.is_complete());
}

/// Tenet: dropping an in-flight conversion is safe. The object shows no
/// partial output and the guard is released, so the next operation on the
/// object proceeds.
#[tokio::test]
async fn abandoned_conversion_leaves_no_trace() {
    let engine = MigrationEngine::new(
        EngineConfig::new(),
        Arc::new(MemoryRepository::new()),
        Arc::new(StalledConverter),
    );
    let project = engine
        .create_project("ledger", "COBOL", Some("Rust"))
        .await
        .unwrap();
    let object = engine
        .add_object(project, "CUST-LOAD", "procedure", "PERFORM LOAD.")
        .await
        .unwrap();

    // Abandon the batch mid-capability-call.
    let abandoned = tokio::time::timeout(
        Duration::from_millis(50),
        engine.convert(project, &[object], "Rust", ConvertOptions::new()),
    )
    .await;
    assert!(abandoned.is_err(), "the stalled batch must not finish");

    // No partial output was applied.
    let snapshot = engine.project(project).await.unwrap();
    let state = snapshot.object(object).unwrap();
    assert!(state.converted_code.is_none());
    assert!(state.confidence.is_none());

    // The guard was released on drop: the next request reaches the
    // converted-output check instead of reporting a busy object.
    let err = engine
        .reconcile(project, object, &[], &[], None)
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::MissingConvertedOutput(_)));
}

/// Tenet: capability calls are bounded. A zero timeout fails every object in
/// the batch with a retryable, per-object timeout failure.
#[tokio::test]
async fn capability_timeout_is_enforced_per_object() {
    let engine = MigrationEngine::new(
        EngineConfig::new().with_capability_timeout_secs(0),
        Arc::new(MemoryRepository::new()),
        Arc::new(StalledConverter),
    );
    let project = engine
        .create_project("ledger", "COBOL", Some("Rust"))
        .await
        .unwrap();
    let a = engine
        .add_object(project, "CUST-LOAD", "procedure", "PERFORM LOAD.")
        .await
        .unwrap();
    let b = engine
        .add_object(project, "CUST-REPORT", "procedure", "PERFORM REPORT.")
        .await
        .unwrap();

    let report = engine
        .convert(project, &[a, b], "Rust", ConvertOptions::new())
        .await
        .unwrap();

    assert!(report.succeeded.is_empty());
    assert_eq!(report.failed.len(), 2);
    for failure in &report.failed {
        assert!(failure.retryable);
        assert!(failure.error.contains("timed out"));
    }
    assert_eq!(report.completion_percentage, 0);
}

/// Tenet: distinct objects convert independently; one busy object never
/// blocks the rest of the batch.
#[tokio::test]
async fn distinct_objects_are_independent() {
    let engine = Arc::new(MigrationEngine::new(
        EngineConfig::new(),
        Arc::new(MemoryRepository::new()),
        Arc::new(SubstitutionConverter::new()),
    ));
    let project = engine
        .create_project("ledger", "COBOL", Some("Rust"))
        .await
        .unwrap();

    let mut objects = Vec::new();
    for i in 0..4 {
        objects.push(
            engine
                .add_object(
                    project,
                    &format!("OBJ-{i}"),
                    "procedure",
                    "MOVE A TO B.\nDISPLAY B.",
                )
                .await
                .unwrap(),
        );
    }

    let report = engine
        .convert(project, &objects, "Rust", ConvertOptions::new())
        .await
        .unwrap();
    assert_eq!(report.succeeded.len(), 4);
    assert!(report.failed.is_empty());
    assert_eq!(report.completion_percentage, 100);
}
