//! JSON-directory repository
//!
//! One pretty-printed JSON document per project, named `<project-ulid>.json`.
//! Writes go through a sibling temp file and an atomic rename so a crashed
//! save never leaves a truncated document behind.

use crate::{ProjectRepository, StoreError};
use crosswalk_types::{Project, ProjectId};
use std::path::{Path, PathBuf};
use ulid::Ulid;

/// Directory-backed repository
#[derive(Debug, Clone)]
pub struct JsonFileRepository {
    root: PathBuf,
}

impl JsonFileRepository {
    /// Open (creating if needed) a repository rooted at `root`
    pub async fn open(root: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let root = root.into();
        tokio::fs::create_dir_all(&root).await?;
        Ok(Self { root })
    }

    /// Repository root directory
    #[inline]
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, id: ProjectId) -> PathBuf {
        self.root.join(format!("{id}.json"))
    }
}

#[async_trait::async_trait]
impl ProjectRepository for JsonFileRepository {
    async fn save(&self, project: &Project) -> Result<(), StoreError> {
        let body = serde_json::to_vec_pretty(project)?;
        let path = self.path_for(project.id);
        let tmp = path.with_extension("json.tmp");

        tokio::fs::write(&tmp, &body).await?;
        tokio::fs::rename(&tmp, &path).await?;

        tracing::debug!(project_id = %project.id, path = %path.display(), "project saved");
        Ok(())
    }

    async fn load(&self, id: ProjectId) -> Result<Option<Project>, StoreError> {
        let path = self.path_for(id);
        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn delete(&self, id: ProjectId) -> Result<bool, StoreError> {
        match tokio::fs::remove_file(self.path_for(id)).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    async fn list(&self) -> Result<Vec<ProjectId>, StoreError> {
        let mut ids = Vec::new();
        let mut entries = tokio::fs::read_dir(&self.root).await?;
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            let stem = path
                .file_stem()
                .and_then(|s| s.to_str())
                .ok_or_else(|| StoreError::CorruptKey(path.display().to_string()))?;
            let ulid = Ulid::from_string(stem)
                .map_err(|_| StoreError::CorruptKey(stem.to_string()))?;
            ids.push(ProjectId(ulid));
        }
        ids.sort();
        Ok(ids)
    }
}
