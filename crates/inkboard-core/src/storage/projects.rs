//! The persisted project list.

use super::{Storage, StorageError, StorageResult};
use crate::elements::ElementId;
use crate::project::Project;
use crate::scene::Scene;
use std::sync::Arc;

/// Key holding the serialized project list.
pub const PROJECTS_KEY: &str = "projects";

/// Key holding the id of the project that was open last.
pub const CURRENT_PROJECT_KEY: &str = "current_project";

/// Owns the project list and writes it back to storage.
///
/// The list is read once when the store is opened. Scene changes only mark
/// the store dirty; the owner calls [`ProjectStore::flush`] once an action is
/// finished. Project operations write immediately. There is one writer, so
/// the last write wins.
pub struct ProjectStore {
    storage: Arc<dyn Storage>,
    projects: Vec<Project>,
    current: usize,
    default_name: String,
    dirty: bool,
}

impl ProjectStore {
    /// Open the store, reading any saved projects.
    ///
    /// Missing or corrupt data is replaced by a single fresh project.
    pub fn open(storage: Arc<dyn Storage>, default_name: impl Into<String>) -> Self {
        let default_name = default_name.into();
        let loaded = match load_projects(storage.as_ref()) {
            Ok(projects) if !projects.is_empty() => Some(projects),
            Ok(_) | Err(StorageError::NotFound(_)) => {
                log::info!("No saved projects, starting fresh");
                None
            }
            Err(e) => {
                log::warn!("Discarding unreadable project list: {e}");
                None
            }
        };

        let store = match loaded {
            Some(projects) => {
                let current = storage
                    .load(CURRENT_PROJECT_KEY)
                    .ok()
                    .and_then(|id| projects.iter().position(|p| p.id == id))
                    .unwrap_or(0);
                Self {
                    storage,
                    projects,
                    current,
                    default_name,
                    dirty: false,
                }
            }
            None => {
                let mut store = Self {
                    storage,
                    projects: vec![Project::new(default_name.as_str())],
                    current: 0,
                    default_name,
                    dirty: false,
                };
                store.persist();
                store
            }
        };
        log::info!(
            "Opened project '{}' ({} total)",
            store.current().name,
            store.projects.len()
        );
        store
    }

    /// The active project.
    pub fn current(&self) -> &Project {
        &self.projects[self.current]
    }

    /// All projects, in creation order.
    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    /// Reserve an element id in the active project.
    pub fn allocate_id(&mut self) -> ElementId {
        self.dirty = true;
        self.projects[self.current].allocate_id()
    }

    /// Record a new scene for the active project. Nothing is written until
    /// the next [`flush`](Self::flush).
    pub fn scene_changed(&mut self, scene: &Scene) {
        self.projects[self.current].set_scene(scene.clone());
        self.dirty = true;
    }

    /// Check if there are changes not yet written.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Write pending changes. Returns `false` if there was nothing to write.
    pub fn flush(&mut self) -> bool {
        if !self.dirty {
            return false;
        }
        self.persist();
        true
    }

    /// Create a project and make it active.
    pub fn create(&mut self, name: Option<&str>) -> &Project {
        let name = name.unwrap_or(self.default_name.as_str()).to_string();
        self.projects.push(Project::new(name));
        self.current = self.projects.len() - 1;
        self.persist();
        self.current()
    }

    /// Make the project with `id` active. Returns `false` if there is none.
    pub fn switch(&mut self, id: &str) -> bool {
        let Some(index) = self.index_of(id) else {
            return false;
        };
        self.current = index;
        self.persist();
        true
    }

    /// Rename the project with `id`. Returns `false` if there is none.
    pub fn rename(&mut self, id: &str, name: &str) -> bool {
        let Some(index) = self.index_of(id) else {
            return false;
        };
        self.projects[index].rename(name);
        self.persist();
        true
    }

    /// Delete the project with `id`. Returns `false` if there is none.
    ///
    /// Deleting the last remaining project leaves a fresh empty one behind.
    pub fn delete(&mut self, id: &str) -> bool {
        let Some(index) = self.index_of(id) else {
            return false;
        };
        self.projects.remove(index);
        if self.projects.is_empty() {
            self.projects.push(Project::new(self.default_name.as_str()));
        }
        if index < self.current || self.current >= self.projects.len() {
            self.current = self.current.saturating_sub(1);
        }
        self.persist();
        true
    }

    /// Write the project list and the active project id.
    pub fn save(&self) -> StorageResult<()> {
        let json = serde_json::to_string(&self.projects)
            .map_err(|e| StorageError::Serialization(e.to_string()))?;
        self.storage.save(PROJECTS_KEY, &json)?;
        self.storage.save(CURRENT_PROJECT_KEY, &self.current().id)
    }

    /// A failed write keeps the store dirty so the next flush retries.
    fn persist(&mut self) {
        match self.save() {
            Ok(()) => self.dirty = false,
            Err(e) => log::error!("Failed to save projects: {e}"),
        }
    }

    fn index_of(&self, id: &str) -> Option<usize> {
        self.projects.iter().position(|p| p.id == id)
    }
}

fn load_projects(storage: &dyn Storage) -> StorageResult<Vec<Project>> {
    let json = storage.load(PROJECTS_KEY)?;
    serde_json::from_str(&json).map_err(|e| StorageError::Serialization(e.to_string()))
}
