//! Projects: named, independently persisted scenes.

use crate::elements::ElementId;
use crate::scene::Scene;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A named container around one scene.
///
/// Undo history is deliberately not part of a project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub elements: Scene,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Next id to hand out; ids are never reused within a project.
    #[serde(default)]
    next_element_id: Option<ElementId>,
}

impl Project {
    /// Create an empty project.
    pub fn new(name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            elements: Scene::new(),
            created_at: now,
            updated_at: now,
            next_element_id: None,
        }
    }

    /// Reserve the next element id.
    pub fn allocate_id(&mut self) -> ElementId {
        let id = self.peek_next_id();
        self.next_element_id = Some(id.next());
        id
    }

    /// The id [`allocate_id`](Self::allocate_id) would return, never below
    /// one past the largest id in the scene.
    pub fn peek_next_id(&self) -> ElementId {
        let floor = self.elements.max_id().map_or(ElementId(1), ElementId::next);
        self.next_element_id.map_or(floor, |next| next.max(floor))
    }

    /// Replace the scene and bump `updated_at`.
    pub fn set_scene(&mut self, scene: Scene) {
        self.elements = scene;
        self.touch();
    }

    pub fn rename(&mut self, name: impl Into<String>) {
        self.name = name.into();
        self.touch();
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}
