//! Crosswalk persistence boundary
//!
//! Projects (with embedded objects and test cases) round-trip through a
//! project-keyed [`ProjectRepository`]. The engine is storage-agnostic;
//! two implementations ship here:
//! - [`MemoryRepository`]: concurrent in-process map
//! - [`JsonFileRepository`]: one JSON document per project in a directory

#![warn(unreachable_pub)]

mod json;
mod memory;

use crosswalk_types::{Project, ProjectId};

pub use json::JsonFileRepository;
pub use memory::MemoryRepository;

/// Persistence failures
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Filesystem failure
    #[error("storage io error: {0}")]
    Io(#[from] std::io::Error),

    /// Project document failed to (de)serialize
    #[error("storage serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A stored key could not be parsed back into a project id
    #[error("corrupt storage key: {0}")]
    CorruptKey(String),
}

/// Project-keyed load/save contract.
///
/// `save` must persist every optional field; `load` of a missing id returns
/// `Ok(None)`, not an error.
#[async_trait::async_trait]
pub trait ProjectRepository: Send + Sync + std::fmt::Debug {
    /// Persist a project, replacing any previous version
    async fn save(&self, project: &Project) -> Result<(), StoreError>;

    /// Load a project by id
    async fn load(&self, id: ProjectId) -> Result<Option<Project>, StoreError>;

    /// Delete a project; returns whether it existed
    async fn delete(&self, id: ProjectId) -> Result<bool, StoreError>;

    /// List all stored project ids
    async fn list(&self) -> Result<Vec<ProjectId>, StoreError>;
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
