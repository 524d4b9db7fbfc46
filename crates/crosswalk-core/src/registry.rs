//! Object registry operations
//!
//! Add/update/remove for migration objects within one project. Callers
//! (the engine) hold the project's write lock, so each function here sees
//! the project exclusively and can validate-then-mutate atomically.
//!
//! Removal cascades by demoting the object's test cases to project scope
//! instead of deleting them, preserving test authorship history.

use crate::error::EngineError;
use crosswalk_types::{ObjectId, Project, ProjectObject};

/// Partial update for an existing object
#[derive(Debug, Clone, Default)]
pub struct ObjectPatch {
    /// Rename (checked against per-project uniqueness)
    pub name: Option<String>,
    /// Replace the type tag
    pub object_type: Option<String>,
    /// Explicit edit of the original source (must stay non-empty)
    pub original_code: Option<String>,
}

/// Add an object to the project.
///
/// # Errors
/// - `InvalidInput` on an empty name
/// - `DuplicateName` when the name is taken in this project (case-sensitive)
/// - `EmptyOriginalCode` when the source text is blank
pub fn add_object(
    project: &mut Project,
    name: impl Into<String>,
    object_type: impl Into<String>,
    original_code: impl Into<String>,
) -> Result<ObjectId, EngineError> {
    let name = name.into();
    let original_code = original_code.into();

    if name.trim().is_empty() {
        return Err(EngineError::InvalidInput("object name is empty".into()));
    }
    if project.has_object_named(&name) {
        return Err(EngineError::DuplicateName(name));
    }
    if original_code.trim().is_empty() {
        return Err(EngineError::EmptyOriginalCode);
    }

    let object = ProjectObject::new(name, object_type, original_code);
    let id = object.id;
    tracing::debug!(project_id = %project.id, object_id = %id, name = %object.name, "object added");
    project.objects.push(object);
    Ok(id)
}

/// Apply a partial update to an existing object
pub fn update_object(
    project: &mut Project,
    id: ObjectId,
    patch: ObjectPatch,
) -> Result<(), EngineError> {
    if let Some(code) = &patch.original_code {
        if code.trim().is_empty() {
            return Err(EngineError::EmptyOriginalCode);
        }
    }
    if let Some(name) = &patch.name {
        if name.trim().is_empty() {
            return Err(EngineError::InvalidInput("object name is empty".into()));
        }
        let taken = project
            .objects
            .iter()
            .any(|o| o.id != id && o.name == *name);
        if taken {
            return Err(EngineError::DuplicateName(name.clone()));
        }
    }

    let object = project
        .object_mut(id)
        .ok_or(EngineError::ObjectNotFound(id))?;

    if let Some(name) = patch.name {
        object.name = name;
    }
    if let Some(object_type) = patch.object_type {
        object.object_type = object_type;
    }
    if let Some(original_code) = patch.original_code {
        object.original_code = original_code;
    }
    Ok(())
}

/// Remove an object, demoting its test cases to project scope.
///
/// Returns the removed object and the number of demoted cases.
pub fn remove_object(
    project: &mut Project,
    id: ObjectId,
) -> Result<(ProjectObject, usize), EngineError> {
    let idx = project
        .objects
        .iter()
        .position(|o| o.id == id)
        .ok_or(EngineError::ObjectNotFound(id))?;
    let removed = project.objects.remove(idx);

    let mut demoted = 0;
    for case in project
        .test_cases
        .iter_mut()
        .filter(|c| c.object_id == Some(id))
    {
        case.demote_to_project();
        demoted += 1;
    }

    tracing::info!(
        project_id = %project.id,
        object_id = %id,
        demoted,
        "object removed; scoped test cases demoted"
    );
    Ok((removed, demoted))
}
