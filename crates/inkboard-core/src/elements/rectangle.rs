//! Rectangle element.

use super::{ElementId, ElementPatch, ElementStyle, ElementTrait};
use crate::geometry::{corners_contain, rect_from_corners};
use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle spanned by two opposite corners.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rectangle {
    pub id: ElementId,
    #[serde(flatten)]
    pub style: ElementStyle,
    /// First corner (where the drag started).
    pub start_point: Point,
    /// Opposite corner.
    pub end_point: Point,
}

impl Rectangle {
    pub fn new(id: ElementId, start_point: Point, end_point: Point, style: ElementStyle) -> Self {
        Self {
            id,
            style,
            start_point,
            end_point,
        }
    }

    /// Get the rectangle as a kurbo Rect.
    pub fn as_rect(&self) -> Rect {
        rect_from_corners(self.start_point, self.end_point)
    }
}

impl ElementTrait for Rectangle {
    fn id(&self) -> ElementId {
        self.id
    }

    fn bounds(&self) -> Rect {
        self.as_rect()
    }

    fn hit_test(&self, point: Point) -> bool {
        corners_contain(point, self.start_point, self.end_point)
    }

    fn style(&self) -> &ElementStyle {
        &self.style
    }

    fn style_mut(&mut self) -> &mut ElementStyle {
        &mut self.style
    }

    fn apply_patch(&mut self, patch: &ElementPatch) {
        self.style.apply_patch(patch);
        if let Some(start) = patch.start_point {
            self.start_point = start;
        }
        if let Some(end) = patch.end_point {
            self.end_point = end;
        }
    }
}
