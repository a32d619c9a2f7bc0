//! Arrow element.

use super::{ElementId, ElementPatch, ElementStyle, ElementTrait, HIT_TOLERANCE};
use crate::geometry::{ARROW_HEAD_LENGTH, ARROW_HEAD_SPREAD, arrow_head_wings, distance_to_segment};
use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};

/// A straight arrow pointing from `start_point` to `end_point`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Arrow {
    pub id: ElementId,
    #[serde(flatten)]
    pub style: ElementStyle,
    pub start_point: Point,
    /// Where the arrowhead points.
    pub end_point: Point,
}

impl Arrow {
    pub fn new(id: ElementId, start_point: Point, end_point: Point, style: ElementStyle) -> Self {
        Self {
            id,
            style,
            start_point,
            end_point,
        }
    }

    /// Barb endpoints of the arrowhead.
    pub fn head_wings(&self) -> (Point, Point) {
        arrow_head_wings(self.start_point, self.end_point, ARROW_HEAD_LENGTH, ARROW_HEAD_SPREAD)
    }

    /// Get the length of the shaft.
    pub fn length(&self) -> f64 {
        (self.end_point - self.start_point).hypot()
    }
}

impl ElementTrait for Arrow {
    fn id(&self) -> ElementId {
        self.id
    }

    fn bounds(&self) -> Rect {
        let (left, right) = self.head_wings();
        Rect::from_points(self.start_point, self.end_point)
            .union_pt(left)
            .union_pt(right)
    }

    // Only the shaft is pickable; the head is cosmetic.
    fn hit_test(&self, point: Point) -> bool {
        distance_to_segment(point, self.start_point, self.end_point) < HIT_TOLERANCE
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
