//! Crosswalk migration engine
//!
//! [`MigrationEngine`] orchestrates the full lifecycle of a migration
//! engagement: the object registry, the conversion pipeline over external
//! capabilities, reconciliation runs, the test-case corpus, and read-time
//! metrics. State lives in project documents behind a
//! [`ProjectRepository`](crosswalk_store::ProjectRepository); the engine
//! keeps a concurrent working set of open projects and serializes mutation
//! per project.
//!
//! ```no_run
//! use crosswalk_capability::SubstitutionConverter;
//! use crosswalk_core::{ConvertOptions, EngineConfig, MigrationEngine};
//! use crosswalk_store::MemoryRepository;
//! use std::sync::Arc;
//!
//! # async fn demo() -> Result<(), crosswalk_core::EngineError> {
//! let engine = MigrationEngine::new(
//!     EngineConfig::new(),
//!     Arc::new(MemoryRepository::new()),
//!     Arc::new(SubstitutionConverter::new()),
//! );
//!
//! let project = engine.create_project("ledger", "COBOL", Some("Rust")).await?;
//! let object = engine
//!     .add_object(project, "CUST-LOAD", "procedure", "PERFORM LOAD.")
//!     .await?;
//! let report = engine
//!     .convert(project, &[object], "Rust", ConvertOptions::new())
//!     .await?;
//! assert!(report.is_complete());
//! # Ok(())
//! # }
//! ```

#![warn(unreachable_pub)]

mod config;
mod convert;
mod engine;
mod error;
mod guard;
mod metrics;
mod registry;

pub use config::EngineConfig;
pub use convert::{ConversionReport, ConvertOptions, ObjectConversion, ObjectFailure};
pub use engine::MigrationEngine;
pub use error::EngineError;
pub use guard::OperationKind;
pub use metrics::{
    completion_percentage, object_metrics, project_metrics, ObjectMetrics, ProjectMetrics,
    StatusCounts,
};
pub use registry::{add_object, remove_object, update_object, ObjectPatch};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
