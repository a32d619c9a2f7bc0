//! Sticky note element.

use super::{DEFAULT_BOX_SIZE, ElementId, ElementPatch, ElementStyle, ElementTrait, SerializableColor};
use crate::geometry::box_contains;
use kurbo::{Point, Rect, Size};
use serde::{Deserialize, Serialize};

/// A sticky note. Its style color is the background fill, not a stroke.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Note {
    pub id: ElementId,
    #[serde(flatten)]
    pub style: ElementStyle,
    pub position: Point,
    #[serde(default)]
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
}

impl Note {
    pub const DEFAULT_CONTENT: &'static str = "New note";

    pub fn new(id: ElementId, position: Point, text: impl Into<String>, style: ElementStyle) -> Self {
        Self {
            id,
            style,
            position,
            text: text.into(),
            width: None,
            height: None,
        }
    }

    pub fn background(&self) -> SerializableColor {
        self.style.color
    }

    pub fn size(&self) -> Size {
        Size::new(
            self.width.unwrap_or(DEFAULT_BOX_SIZE),
            self.height.unwrap_or(DEFAULT_BOX_SIZE),
        )
    }
}

impl ElementTrait for Note {
    fn id(&self) -> ElementId {
        self.id
    }

    fn bounds(&self) -> Rect {
        Rect::from_origin_size(self.position, self.size())
    }

    fn hit_test(&self, point: Point) -> bool {
        box_contains(point, self.position, self.size())
    }

    fn style(&self) -> &ElementStyle {
        &self.style
    }

    fn style_mut(&mut self) -> &mut ElementStyle {
        &mut self.style
    }

    fn apply_patch(&mut self, patch: &ElementPatch) {
        self.style.apply_patch(patch);
        if let Some(position) = patch.position {
            self.position = position;
        }
        if let Some(text) = &patch.text {
            self.text.clone_from(text);
        }
        if let Some(width) = patch.width {
            self.width = Some(width);
        }
        if let Some(height) = patch.height {
            self.height = Some(height);
        }
    }
}
