//! In-memory repository

use crate::{ProjectRepository, StoreError};
use crosswalk_types::{Project, ProjectId};
use dashmap::DashMap;

/// Concurrent in-process repository; the default for tests and demos
#[derive(Debug, Default)]
pub struct MemoryRepository {
    projects: DashMap<ProjectId, Project>,
}

impl MemoryRepository {
    /// Create an empty repository
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored projects
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.projects.len()
    }

    /// Whether the repository is empty
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }
}

#[async_trait::async_trait]
impl ProjectRepository for MemoryRepository {
    async fn save(&self, project: &Project) -> Result<(), StoreError> {
        self.projects.insert(project.id, project.clone());
        Ok(())
    }

    async fn load(&self, id: ProjectId) -> Result<Option<Project>, StoreError> {
        Ok(self.projects.get(&id).map(|p| p.clone()))
    }

    async fn delete(&self, id: ProjectId) -> Result<bool, StoreError> {
        Ok(self.projects.remove(&id).is_some())
    }

    async fn list(&self) -> Result<Vec<ProjectId>, StoreError> {
        let mut ids: Vec<ProjectId> = self.projects.iter().map(|e| *e.key()).collect();
        ids.sort();
        Ok(ids)
    }
}
