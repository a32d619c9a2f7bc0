//! Freehand stroke element.

use super::{ElementId, ElementPatch, ElementStyle, ElementTrait, HIT_TOLERANCE};
use crate::geometry::distance_to_polyline;
use kurbo::{Point, Rect};
use serde::{Deserialize, Deserializer, Serialize};

/// A freehand stroke: points in stroke order, drawn as a polyline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Freehand {
    pub id: ElementId,
    #[serde(flatten)]
    pub style: ElementStyle,
    /// Points in the stroke, never empty.
    #[serde(deserialize_with = "non_empty_points")]
    pub points: Vec<Point>,
}

fn non_empty_points<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<Point>, D::Error> {
    let points = Vec::<Point>::deserialize(deserializer)?;
    Ok(ensure_start(points))
}

/// An empty list is replaced by a single origin point.
fn ensure_start(points: Vec<Point>) -> Vec<Point> {
    if points.is_empty() { vec![Point::ZERO] } else { points }
}

impl Freehand {
    /// Start a stroke at `start`.
    pub fn new(id: ElementId, start: Point, style: ElementStyle) -> Self {
        Self {
            id,
            style,
            points: vec![start],
        }
    }

    /// Create from existing points. An empty list is replaced by a single origin point.
    pub fn from_points(id: ElementId, points: Vec<Point>, style: ElementStyle) -> Self {
        Self {
            id,
            style,
            points: ensure_start(points),
        }
    }

    /// Add a point to the stroke.
    pub fn add_point(&mut self, point: Point) {
        self.points.push(point);
    }

    /// Get the number of points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Check if the stroke has no points.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

impl ElementTrait for Freehand {
    fn id(&self) -> ElementId {
        self.id
    }

    fn bounds(&self) -> Rect {
        let Some(first) = self.points.first() else {
            return Rect::ZERO;
        };
        self.points
            .iter()
            .fold(Rect::from_points(*first, *first), |rect, p| rect.union_pt(*p))
    }

    fn hit_test(&self, point: Point) -> bool {
        distance_to_polyline(point, &self.points) < HIT_TOLERANCE
    }

    fn style(&self) -> &ElementStyle {
        &self.style
    }

    fn style_mut(&mut self) -> &mut ElementStyle {
        &mut self.style
    }

    fn apply_patch(&mut self, patch: &ElementPatch) {
        self.style.apply_patch(patch);
        if let Some(points) = patch.points.as_ref().filter(|p| !p.is_empty()) {
            self.points = points.clone();
        }
    }
}
