//! The migration engine
//!
//! [`MigrationEngine`] is the single entry point callers use:
//! - project/object/test-case CRUD over a [`ProjectRepository`]
//! - the conversion pipeline (batch, per-object isolation, timeout)
//! - reconciliation runs with lifecycle transitions
//! - metrics snapshots
//!
//! # Concurrency
//! One `RwLock` per project serializes registry mutations; reads share it.
//! Per-object in-flight guards admit at most one conversion and one
//! reconciliation run per object; a busy object fails fast with
//! `OperationInProgress`. Capability outputs are staged in locals and
//! applied only after every await for that object has resolved, so an
//! abandoned call leaves the object entirely unmodified.

use crate::config::EngineConfig;
use crate::convert::{ConversionReport, ConvertOptions, ObjectConversion, ObjectFailure};
use crate::error::EngineError;
use crate::guard::{InflightGuards, OperationKind};
use crate::metrics::{self, ObjectMetrics, ProjectMetrics};
use crate::registry::{self, ObjectPatch};
use crosswalk_capability::{
    ConversionCapability, DocumentationCapability, RuleExtractionCapability,
};
use crosswalk_reconcile::{
    reconcile as run_comparison, DataRecord, ReconcileConfig, ReconciliationReport,
};
use crosswalk_store::ProjectRepository;
use crosswalk_testcase::{
    self as corpus, CaseDraft, CasePatch, GenerationReport, ImportReport,
};
use crosswalk_types::{
    CaseId, ComplexityTier, ObjectId, Outcome, Project, ProjectId, ProjectObject, TestCase,
    ValidationStatus,
};
use dashmap::DashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

/// Central orchestrator for migration projects
#[derive(Debug)]
pub struct MigrationEngine {
    /// Configuration
    config: EngineConfig,
    /// Persistence boundary
    repository: Arc<dyn ProjectRepository>,
    /// Conversion capability
    converter: Arc<dyn ConversionCapability>,
    /// Documentation capability, if wired
    documenter: Option<Arc<dyn DocumentationCapability>>,
    /// Rule-extraction capability, if wired
    rule_extractor: Option<Arc<dyn RuleExtractionCapability>>,
    /// Working set of open projects
    projects: DashMap<ProjectId, Arc<RwLock<Project>>>,
    /// Per-object in-flight guards
    guards: InflightGuards,
}

impl MigrationEngine {
    /// Create an engine over a repository and a conversion capability
    #[must_use]
    pub fn new(
        config: EngineConfig,
        repository: Arc<dyn ProjectRepository>,
        converter: Arc<dyn ConversionCapability>,
    ) -> Self {
        Self {
            config,
            repository,
            converter,
            documenter: None,
            rule_extractor: None,
            projects: DashMap::new(),
            guards: InflightGuards::new(),
        }
    }

    /// With a documentation capability
    #[inline]
    #[must_use]
    pub fn with_documenter(mut self, documenter: Arc<dyn DocumentationCapability>) -> Self {
        self.documenter = Some(documenter);
        self
    }

    /// With a rule-extraction capability
    #[inline]
    #[must_use]
    pub fn with_rule_extractor(
        mut self,
        rule_extractor: Arc<dyn RuleExtractionCapability>,
    ) -> Self {
        self.rule_extractor = Some(rule_extractor);
        self
    }

    /// Engine configuration
    #[inline]
    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    // ---- project lifecycle ----

    /// Create a project, deriving complexity from the source technology
    pub async fn create_project(
        &self,
        name: &str,
        source_technology: &str,
        target_technology: Option<&str>,
    ) -> Result<ProjectId, EngineError> {
        if name.trim().is_empty() {
            return Err(EngineError::InvalidInput("project name is empty".into()));
        }

        let mut project = Project::new(name, source_technology);
        if let Some(target) = target_technology {
            project = project.with_target(target);
        }
        let id = project.id;

        self.repository.save(&project).await?;
        self.projects.insert(id, Arc::new(RwLock::new(project)));

        tracing::info!(project_id = %id, %source_technology, "project created");
        Ok(id)
    }

    /// Snapshot of a project
    pub async fn project(&self, id: ProjectId) -> Result<Project, EngineError> {
        let handle = self.handle(id).await?;
        let project = handle.read().await;
        Ok(project.clone())
    }

    /// Delete a project and forget its working-set entry
    pub async fn delete_project(&self, id: ProjectId) -> Result<(), EngineError> {
        let cached = self.projects.remove(&id).is_some();
        let stored = self.repository.delete(id).await?;
        if !cached && !stored {
            return Err(EngineError::ProjectNotFound(id));
        }
        tracing::info!(project_id = %id, "project deleted");
        Ok(())
    }

    /// Ids of all stored projects
    pub async fn list_projects(&self) -> Result<Vec<ProjectId>, EngineError> {
        Ok(self.repository.list().await?)
    }

    /// Re-derive project complexity from its source technology
    pub async fn recompute_complexity(&self, id: ProjectId) -> Result<ComplexityTier, EngineError> {
        self.mutate(id, |project| {
            project.recompute_complexity();
            Ok(project.complexity)
        })
        .await
    }

    // ---- object registry ----

    /// Add a migration object
    pub async fn add_object(
        &self,
        project_id: ProjectId,
        name: &str,
        object_type: &str,
        original_code: &str,
    ) -> Result<ObjectId, EngineError> {
        self.mutate(project_id, |project| {
            registry::add_object(project, name, object_type, original_code)
        })
        .await
    }

    /// Update a migration object
    pub async fn update_object(
        &self,
        project_id: ProjectId,
        object_id: ObjectId,
        patch: ObjectPatch,
    ) -> Result<(), EngineError> {
        self.mutate(project_id, |project| {
            registry::update_object(project, object_id, patch)
        })
        .await
    }

    /// Remove an object, demoting its test cases to project scope
    pub async fn remove_object(
        &self,
        project_id: ProjectId,
        object_id: ObjectId,
    ) -> Result<ProjectObject, EngineError> {
        self.mutate(project_id, |project| {
            registry::remove_object(project, object_id).map(|(object, _)| object)
        })
        .await
    }

    /// Objects in insertion order
    pub async fn objects(&self, project_id: ProjectId) -> Result<Vec<ProjectObject>, EngineError> {
        Ok(self.project(project_id).await?.objects)
    }

    // ---- conversion pipeline ----

    /// Convert the selected objects to the target technology.
    ///
    /// Per-object failures are collected in the report; they never abort the
    /// batch. The report carries the recomputed completion percentage.
    pub async fn convert(
        &self,
        project_id: ProjectId,
        object_ids: &[ObjectId],
        target_technology: &str,
        options: ConvertOptions,
    ) -> Result<ConversionReport, EngineError> {
        let handle = self.handle(project_id).await?;

        let source_technology = {
            let mut project = handle.write().await;
            project.target_technology = Some(target_technology.to_string());
            project.source_technology.clone()
        };
        self.save(&handle).await?;

        tracing::info!(
            project_id = %project_id,
            objects = object_ids.len(),
            target = target_technology,
            "conversion batch started"
        );

        let runs = object_ids.iter().map(|&object_id| {
            self.convert_one(
                Arc::clone(&handle),
                object_id,
                source_technology.clone(),
                target_technology.to_string(),
                options,
            )
        });

        let mut report = ConversionReport::default();
        for outcome in futures::future::join_all(runs).await {
            match outcome {
                Ok(converted) => report.succeeded.push(converted),
                Err(failure) => {
                    tracing::warn!(
                        object_id = %failure.object_id,
                        error = %failure.error,
                        "object conversion failed"
                    );
                    report.failed.push(failure);
                }
            }
        }

        report.completion_percentage = {
            let project = handle.read().await;
            metrics::completion_percentage(&project)
        };

        tracing::info!(
            project_id = %project_id,
            succeeded = report.succeeded.len(),
            failed = report.failed.len(),
            completion = report.completion_percentage,
            "conversion batch finished"
        );
        Ok(report)
    }

    /// Convert one object: stage all capability outputs, then apply.
    async fn convert_one(
        &self,
        handle: Arc<RwLock<Project>>,
        object_id: ObjectId,
        source_technology: String,
        target_technology: String,
        options: ConvertOptions,
    ) -> Result<ObjectConversion, ObjectFailure> {
        let fail = |error: String, retryable: bool| ObjectFailure {
            object_id,
            error,
            retryable,
        };

        let _permit = self
            .guards
            .try_begin(object_id, OperationKind::Conversion)
            .map_err(|holder| {
                fail(
                    EngineError::OperationInProgress {
                        object_id,
                        operation: holder,
                    }
                    .to_string(),
                    true,
                )
            })?;

        let (name, original_code) = {
            let project = handle.read().await;
            match project.object(object_id) {
                Some(object) => (object.name.clone(), object.original_code.clone()),
                None => {
                    return Err(fail(
                        EngineError::ObjectNotFound(object_id).to_string(),
                        false,
                    ))
                }
            }
        };

        // Stage every capability output before touching the object.
        let output = match self
            .timed(self.converter.convert(
                &original_code,
                &source_technology,
                &target_technology,
                options.strategy,
            ))
            .await
        {
            Ok(Ok(output)) => output,
            Ok(Err(e)) => {
                let retryable = e.is_retryable();
                return Err(fail(
                    EngineError::ConversionFailed {
                        object_id,
                        source: e,
                    }
                    .to_string(),
                    retryable,
                ));
            }
            Err(timeout) => return Err(fail(timeout.to_string(), true)),
        };

        let documentation = if options.generate_documentation {
            let documenter = self.documenter.as_ref().ok_or_else(|| {
                fail("documentation capability not configured".to_string(), false)
            })?;
            match self
                .timed(documenter.document(
                    &name,
                    &original_code,
                    &source_technology,
                    &target_technology,
                ))
                .await
            {
                Ok(Ok(text)) => Some(text),
                Ok(Err(e)) => {
                    let retryable = e.is_retryable();
                    return Err(fail(format!("documentation failed: {e}"), retryable));
                }
                Err(timeout) => return Err(fail(timeout.to_string(), true)),
            }
        } else {
            None
        };

        let business_rules = if options.extract_business_rules {
            let extractor = self.rule_extractor.as_ref().ok_or_else(|| {
                fail("rule-extraction capability not configured".to_string(), false)
            })?;
            match self.timed(extractor.extract_rules(&original_code)).await {
                Ok(Ok(text)) => Some(text),
                Ok(Err(e)) => {
                    let retryable = e.is_retryable();
                    return Err(fail(format!("rule extraction failed: {e}"), retryable));
                }
                Err(timeout) => return Err(fail(timeout.to_string(), true)),
            }
        } else {
            None
        };

        // Apply atomically: all awaits above resolved, single write section.
        let conversion = {
            let mut project = handle.write().await;
            let object = match project.object_mut(object_id) {
                Some(o) => o,
                None => {
                    return Err(fail(
                        EngineError::ObjectNotFound(object_id).to_string(),
                        false,
                    ))
                }
            };
            object.record_conversion(output.converted_code, output.confidence);
            if documentation.is_some() {
                object.documentation = documentation;
            }
            if business_rules.is_some() {
                object.business_rules = business_rules;
            }
            ObjectConversion {
                object_id,
                confidence: object.confidence.unwrap_or(0),
                needs_review: object.needs_review,
            }
        };

        self.save(&handle)
            .await
            .map_err(|e| fail(e.to_string(), true))?;
        Ok(conversion)
    }

    // ---- reconciliation ----

    /// Run reconciliation for one converted object.
    ///
    /// Starts the run (`not_started -> in_progress`), compares the record
    /// sets, finishes (`in_progress -> completed`), and returns the report.
    /// The tolerance verdict in the report is advisory; classification on it
    /// remains open to the operator either way.
    pub async fn reconcile(
        &self,
        project_id: ProjectId,
        object_id: ObjectId,
        original: &[DataRecord],
        converted: &[DataRecord],
        config: Option<ReconcileConfig>,
    ) -> Result<ReconciliationReport, EngineError> {
        let run_config = config.unwrap_or_else(|| {
            ReconcileConfig::new().with_tolerance(self.config.default_tolerance_pct)
        });

        let handle = self.handle(project_id).await?;
        let _permit = self
            .guards
            .try_begin(object_id, OperationKind::Reconciliation)
            .map_err(|holder| EngineError::OperationInProgress {
                object_id,
                operation: holder,
            })?;

        // Single write section: no awaits between start and finish, so an
        // abandoned caller cannot strand the object mid-run.
        let report = {
            let mut project = handle.write().await;
            let object = project
                .object_mut(object_id)
                .ok_or(EngineError::ObjectNotFound(object_id))?;
            if !object.is_converted() {
                return Err(EngineError::MissingConvertedOutput(object_id));
            }

            match object.validation_status {
                ValidationStatus::NotStarted => {
                    object.transition_status(ValidationStatus::InProgress)?;
                }
                ValidationStatus::Completed => {
                    // Re-run: walk back through the direct override pair.
                    object.transition_status(ValidationStatus::NotStarted)?;
                    object.transition_status(ValidationStatus::InProgress)?;
                }
                ValidationStatus::UnderReview => {
                    object.transition_status(ValidationStatus::InProgress)?;
                }
                ValidationStatus::InProgress => {}
            }

            let report = run_comparison(original, converted, &run_config);
            object.transition_status(ValidationStatus::Completed)?;
            report
        };
        self.save(&handle).await?;

        tracing::info!(
            project_id = %project_id,
            object_id = %object_id,
            mismatch_ratio = report.mismatch_ratio,
            within_tolerance = report.within_tolerance(),
            "reconciliation run finished"
        );
        Ok(report)
    }

    /// Operator override: force any validation status at any time
    pub async fn force_validation_status(
        &self,
        project_id: ProjectId,
        object_id: ObjectId,
        status: ValidationStatus,
    ) -> Result<(), EngineError> {
        self.mutate(project_id, |project| {
            let object = project
                .object_mut(object_id)
                .ok_or(EngineError::ObjectNotFound(object_id))?;
            object.force_status(status);
            Ok(())
        })
        .await
    }

    /// Operator action: flag an in-progress object for review
    pub async fn mark_under_review(
        &self,
        project_id: ProjectId,
        object_id: ObjectId,
    ) -> Result<(), EngineError> {
        self.mutate(project_id, |project| {
            let object = project
                .object_mut(object_id)
                .ok_or(EngineError::ObjectNotFound(object_id))?;
            object.transition_status(ValidationStatus::UnderReview)?;
            Ok(())
        })
        .await
    }

    /// Operator-supplied completion for the intermediate states
    pub async fn set_validation_completion(
        &self,
        project_id: ProjectId,
        object_id: ObjectId,
        completion: u8,
    ) -> Result<(), EngineError> {
        self.mutate(project_id, |project| {
            let object = project
                .object_mut(object_id)
                .ok_or(EngineError::ObjectNotFound(object_id))?;
            object.set_validation_completion(completion);
            Ok(())
        })
        .await
    }

    // ---- test-case corpus ----

    /// Add a test case
    pub async fn add_test_case(
        &self,
        project_id: ProjectId,
        draft: CaseDraft,
    ) -> Result<CaseId, EngineError> {
        self.mutate(project_id, |project| {
            Ok(corpus::add_case(project, draft)?)
        })
        .await
    }

    /// Update a test case
    pub async fn update_test_case(
        &self,
        project_id: ProjectId,
        case_id: CaseId,
        patch: CasePatch,
    ) -> Result<(), EngineError> {
        self.mutate(project_id, |project| {
            Ok(corpus::update_case(project, case_id, patch)?)
        })
        .await
    }

    /// Remove a test case
    pub async fn remove_test_case(
        &self,
        project_id: ProjectId,
        case_id: CaseId,
    ) -> Result<TestCase, EngineError> {
        self.mutate(project_id, |project| {
            Ok(corpus::remove_case(project, case_id)?)
        })
        .await
    }

    /// Record a test-case outcome (decoupled from validation status)
    pub async fn set_test_outcome(
        &self,
        project_id: ProjectId,
        case_id: CaseId,
        outcome: Outcome,
    ) -> Result<(), EngineError> {
        self.mutate(project_id, |project| {
            Ok(corpus::set_outcome(project, case_id, outcome)?)
        })
        .await
    }

    /// Auto-generate the fixed four categories per object
    pub async fn generate_test_cases(
        &self,
        project_id: ProjectId,
    ) -> Result<GenerationReport, EngineError> {
        self.mutate(project_id, |project| {
            Ok(corpus::generate_for_project(project))
        })
        .await
    }

    /// Bulk-import test cases from CSV text
    pub async fn import_test_cases(
        &self,
        project_id: ProjectId,
        csv_text: &str,
    ) -> Result<ImportReport, EngineError> {
        self.mutate(project_id, |project| {
            Ok(corpus::import_cases(project, csv_text)?)
        })
        .await
    }

    /// Export the corpus in the import column format
    pub async fn export_test_cases(&self, project_id: ProjectId) -> Result<String, EngineError> {
        let project = self.project(project_id).await?;
        Ok(corpus::export_cases(&project)?)
    }

    /// Import template: header plus one example row
    pub fn test_case_template() -> Result<String, EngineError> {
        Ok(corpus::export_template()?)
    }

    // ---- metrics ----

    /// Project-level metrics snapshot
    pub async fn metrics(&self, project_id: ProjectId) -> Result<ProjectMetrics, EngineError> {
        let project = self.project(project_id).await?;
        Ok(metrics::project_metrics(&project))
    }

    /// Object-level metrics snapshot
    pub async fn object_metrics(
        &self,
        project_id: ProjectId,
        object_id: ObjectId,
    ) -> Result<ObjectMetrics, EngineError> {
        let project = self.project(project_id).await?;
        metrics::object_metrics(&project, object_id)
            .ok_or(EngineError::ObjectNotFound(object_id))
    }

    // ---- internals ----

    /// Working-set handle for a project, loading it on first touch
    async fn handle(&self, id: ProjectId) -> Result<Arc<RwLock<Project>>, EngineError> {
        if let Some(handle) = self.projects.get(&id) {
            return Ok(Arc::clone(&handle));
        }

        let project = self
            .repository
            .load(id)
            .await?
            .ok_or(EngineError::ProjectNotFound(id))?;

        let handle = self
            .projects
            .entry(id)
            .or_insert_with(|| Arc::new(RwLock::new(project)));
        Ok(Arc::clone(&handle))
    }

    /// Serialized mutate-then-save for one project
    async fn mutate<T>(
        &self,
        id: ProjectId,
        f: impl FnOnce(&mut Project) -> Result<T, EngineError>,
    ) -> Result<T, EngineError> {
        let handle = self.handle(id).await?;
        let result = {
            let mut project = handle.write().await;
            f(&mut project)?
        };
        self.save(&handle).await?;
        Ok(result)
    }

    /// Persist the current state of an open project
    async fn save(&self, handle: &Arc<RwLock<Project>>) -> Result<(), EngineError> {
        let project = handle.read().await;
        self.repository.save(&project).await?;
        Ok(())
    }

    /// Apply the configured capability timeout to a fallible call
    async fn timed<T>(
        &self,
        fut: impl std::future::Future<Output = T>,
    ) -> Result<T, EngineError> {
        let duration_secs = self.config.capability_timeout_secs;
        tokio::time::timeout(Duration::from_secs(duration_secs), fut)
            .await
            .map_err(|_| EngineError::Timeout { duration_secs })
    }
}
