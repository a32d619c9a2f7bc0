//! Circle (ellipse) element.

use super::{ElementId, ElementPatch, ElementStyle, ElementTrait};
use crate::geometry::{ellipse_contains, rect_from_corners};
use kurbo::{Ellipse, Point, Rect};
use serde::{Deserialize, Serialize};

/// An ellipse inscribed in the box spanned by two opposite corners.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Circle {
    pub id: ElementId,
    #[serde(flatten)]
    pub style: ElementStyle,
    pub start_point: Point,
    pub end_point: Point,
}

impl Circle {
    pub fn new(id: ElementId, start_point: Point, end_point: Point, style: ElementStyle) -> Self {
        Self {
            id,
            style,
            start_point,
            end_point,
        }
    }

    /// Center point (midpoint of the two corners).
    pub fn center(&self) -> Point {
        self.start_point.midpoint(self.end_point)
    }

    /// Horizontal and vertical radii (half the span on each axis).
    pub fn radii(&self) -> (f64, f64) {
        (
            (self.end_point.x - self.start_point.x).abs() / 2.0,
            (self.end_point.y - self.start_point.y).abs() / 2.0,
        )
    }

    /// Get as a kurbo Ellipse.
    pub fn as_kurbo(&self) -> Ellipse {
        Ellipse::new(self.center(), self.radii(), 0.0)
    }
}

impl ElementTrait for Circle {
    fn id(&self) -> ElementId {
        self.id
    }

    fn bounds(&self) -> Rect {
        rect_from_corners(self.start_point, self.end_point)
    }

    fn hit_test(&self, point: Point) -> bool {
        ellipse_contains(point, self.start_point, self.end_point)
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
