//! Embedded raster image element.

use super::{DEFAULT_BOX_SIZE, ElementId, ElementPatch, ElementStyle, ElementTrait};
use crate::geometry::box_contains;
use kurbo::{Affine, Point, Rect, Size};
use serde::{Deserialize, Serialize};

fn default_size() -> f64 {
    DEFAULT_BOX_SIZE
}

/// A raster image placed on the canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Image {
    pub id: ElementId,
    #[serde(flatten)]
    pub style: ElementStyle,
    /// Top-left corner position.
    pub position: Point,
    /// Embedded raster reference, usually a `data:` URI.
    pub src: String,
    #[serde(default = "default_size")]
    pub width: f64,
    #[serde(default = "default_size")]
    pub height: f64,
    /// Rotation in degrees, clockwise about the box center.
    #[serde(default)]
    pub rotation: f64,
}

impl Image {
    pub fn new(id: ElementId, position: Point, src: impl Into<String>, size: Size, style: ElementStyle) -> Self {
        Self {
            id,
            style,
            position,
            src: src.into(),
            width: size.width,
            height: size.height,
            rotation: 0.0,
        }
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Get the unrotated bounding rectangle.
    pub fn as_rect(&self) -> Rect {
        Rect::from_origin_size(self.position, self.size())
    }

    /// Transform that applies the rotation about the box center, for compositing.
    pub fn rotation_transform(&self) -> Affine {
        Affine::rotate_about(self.rotation.to_radians(), self.as_rect().center())
    }
}

impl ElementTrait for Image {
    fn id(&self) -> ElementId {
        self.id
    }

    fn bounds(&self) -> Rect {
        self.as_rect()
    }

    // Rotation is ignored: picking uses the unrotated box.
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
        if let Some(src) = &patch.src {
            self.src.clone_from(src);
        }
        if let Some(width) = patch.width {
            self.width = width;
        }
        if let Some(height) = patch.height {
            self.height = height;
        }
        if let Some(rotation) = patch.rotation {
            self.rotation = rotation.rem_euclid(360.0);
        }
    }
}
