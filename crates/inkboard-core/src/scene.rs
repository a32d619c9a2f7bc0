//! Scene store: the ordered set of live elements.
//!
//! A [`Scene`] is a value. Every mutation returns a new scene and leaves the
//! receiver untouched, so history snapshots stay independent. Elements sit
//! behind `Arc`, which lets snapshots share the elements they have in common;
//! an element is only ever copied when it is about to change.

use crate::elements::{Element, ElementId, ElementPatch};
use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Elements in paint order (back to front).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Scene {
    elements: Vec<Arc<Element>>,
}

impl Scene {
    /// Create an empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a scene from elements in paint order.
    pub fn from_elements(elements: impl IntoIterator<Item = Element>) -> Self {
        Self {
            elements: elements.into_iter().map(Arc::new).collect(),
        }
    }

    /// Add an element on top of the z-order.
    ///
    /// Appending an id that is already present is a caller bug.
    #[must_use]
    pub fn append(&self, element: Element) -> Scene {
        debug_assert!(
            self.get(element.id()).is_none(),
            "duplicate element id {}",
            element.id()
        );
        let mut elements = self.elements.clone();
        elements.push(Arc::new(element));
        Scene { elements }
    }

    /// Merge `patch` into the element with `id`. Unknown ids leave the scene as is.
    #[must_use]
    pub fn update_by_id(&self, id: ElementId, patch: &ElementPatch) -> Scene {
        self.map_by_id(id, |element| element.apply_patch(patch))
    }

    /// Apply `f` to a copy of the element with `id`.
    #[must_use]
    pub fn map_by_id(&self, id: ElementId, f: impl FnOnce(&mut Element)) -> Scene {
        let Some(index) = self.index_of(id) else {
            return self.clone();
        };
        let mut elements = self.elements.clone();
        f(Arc::make_mut(&mut elements[index]));
        Scene { elements }
    }

    /// Apply `f` to a copy of the topmost element. An empty scene is returned as is.
    #[must_use]
    pub fn map_last(&self, f: impl FnOnce(&mut Element)) -> Scene {
        match self.last() {
            Some(last) => self.map_by_id(last.id(), f),
            None => self.clone(),
        }
    }

    /// Remove the element with `id`. Unknown ids leave the scene as is.
    #[must_use]
    pub fn remove_by_id(&self, id: ElementId) -> Scene {
        let Some(index) = self.index_of(id) else {
            return self.clone();
        };
        let mut elements = self.elements.clone();
        elements.remove(index);
        Scene { elements }
    }

    /// Find the topmost element under `point`.
    ///
    /// Elements are tested front to back, matching paint order, so the
    /// element the user sees on top is the one returned.
    pub fn hit_test(&self, point: Point) -> Option<&Element> {
        self.elements
            .iter()
            .rev()
            .map(Arc::as_ref)
            .find(|element| element.hit_test(point))
    }

    /// Get an element by id.
    pub fn get(&self, id: ElementId) -> Option<&Element> {
        self.elements.iter().map(Arc::as_ref).find(|e| e.id() == id)
    }

    /// Get the topmost element.
    pub fn last(&self) -> Option<&Element> {
        self.elements.last().map(Arc::as_ref)
    }

    /// Iterate elements in paint order (back to front).
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &Element> {
        self.elements.iter().map(Arc::as_ref)
    }

    /// Largest id in the scene.
    pub fn max_id(&self) -> Option<ElementId> {
        self.iter().map(Element::id).max()
    }

    /// Get the bounding box of all elements.
    pub fn bounds(&self) -> Option<Rect> {
        self.iter().map(Element::bounds).reduce(|acc, b| acc.union(b))
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Whether two scenes hold the very same element allocations.
    pub fn shares_elements_with(&self, other: &Scene) -> bool {
        self.elements.len() == other.elements.len()
            && self
                .elements
                .iter()
                .zip(&other.elements)
                .all(|(a, b)| Arc::ptr_eq(a, b))
    }

    fn index_of(&self, id: ElementId) -> Option<usize> {
        self.elements.iter().position(|e| e.id() == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::elements::{
        Arrow, Circle, ElementStyle, Freehand, Image, Note, Rectangle, Text,
    };
    use kurbo::Size;

    fn rect(id: u64, start: Point, end: Point) -> Element {
        Element::Rectangle(Rectangle::new(ElementId(id), start, end, ElementStyle::default()))
    }

    fn path(id: u64, points: Vec<Point>) -> Element {
        Element::Path(Freehand::from_points(ElementId(id), points, ElementStyle::default()))
    }

    #[test]
    fn test_append_keeps_original() {
        let empty = Scene::new();
        let one = empty.append(rect(1, Point::ZERO, Point::new(10.0, 10.0)));
        assert!(empty.is_empty());
        assert_eq!(one.len(), 1);
        assert_eq!(one.last().map(Element::id), Some(ElementId(1)));
    }

    #[test]
    fn test_append_then_hit_interior() {
        let scene = Scene::new()
            .append(rect(1, Point::new(500.0, 500.0), Point::new(600.0, 600.0)))
            .append(Element::Circle(Circle::new(
                ElementId(2),
                Point::ZERO,
                Point::new(40.0, 40.0),
                ElementStyle::default(),
            )));
        assert_eq!(scene.hit_test(Point::new(20.0, 20.0)).map(Element::id), Some(ElementId(2)));
    }

    #[test]
    fn test_topmost_wins() {
        let scene = Scene::new()
            .append(rect(1, Point::new(0.0, 0.0), Point::new(100.0, 100.0)))
            .append(rect(2, Point::new(50.0, 50.0), Point::new(150.0, 150.0)));
        assert_eq!(scene.hit_test(Point::new(75.0, 75.0)).map(Element::id), Some(ElementId(2)));
        assert_eq!(scene.hit_test(Point::new(25.0, 25.0)).map(Element::id), Some(ElementId(1)));
        assert!(scene.hit_test(Point::new(175.0, 175.0)).is_none());
    }

    #[test]
    fn test_path_scenario() {
        let scene = Scene::new().append(path(1, vec![Point::new(0.0, 0.0), Point::new(10.0, 0.0)]));
        assert_eq!(scene.hit_test(Point::new(5.0, 1.0)).map(Element::id), Some(ElementId(1)));
        assert!(scene.hit_test(Point::new(5.0, 50.0)).is_none());
    }

    #[test]
    fn test_rectangle_scenario() {
        let scene = Scene::new().append(rect(1, Point::new(0.0, 0.0), Point::new(100.0, 50.0)));
        assert!(scene.hit_test(Point::new(50.0, 25.0)).is_some());
        assert!(scene.hit_test(Point::new(150.0, 25.0)).is_none());
    }

    #[test]
    fn test_overlay_kinds_hit_their_boxes() {
        let style = ElementStyle::default();
        let scene = Scene::new()
            .append(Element::Text(Text::new(ElementId(1), Point::new(0.0, 0.0), "t", style.clone())))
            .append(Element::Note(
                Note::new(ElementId(2), Point::new(1000.0, 0.0), "n", style.clone()),
            ))
            .append(Element::Image(Image::new(
                ElementId(3),
                Point::new(0.0, 1000.0),
                "data:,",
                Size::new(50.0, 50.0),
                style.clone(),
            )))
            .append(Element::Arrow(Arrow::new(
                ElementId(4),
                Point::new(2000.0, 0.0),
                Point::new(2100.0, 0.0),
                style,
            )));
        let id_at = |x, y| scene.hit_test(Point::new(x, y)).map(Element::id);
        assert_eq!(id_at(199.0, 199.0), Some(ElementId(1)));
        assert_eq!(id_at(1100.0, 100.0), Some(ElementId(2)));
        assert_eq!(id_at(25.0, 1025.0), Some(ElementId(3)));
        assert_eq!(id_at(25.0, 1075.0), None);
        assert_eq!(id_at(2050.0, 5.0), Some(ElementId(4)));
    }

    #[test]
    fn test_update_by_id() {
        let before = Scene::new().append(rect(1, Point::ZERO, Point::ZERO));
        let after = before.update_by_id(ElementId(1), &ElementPatch::default().end_point(Point::new(10.0, 10.0)));
        assert_eq!(before.get(ElementId(1)).map(Element::bounds), Some(Rect::ZERO));
        assert!(after.hit_test(Point::new(5.0, 5.0)).is_some());
    }

    #[test]
    fn test_update_missing_is_noop() {
        let scene = Scene::new().append(rect(1, Point::ZERO, Point::new(1.0, 1.0)));
        let same = scene.update_by_id(ElementId(42), &ElementPatch::default().opacity(0.1));
        assert_eq!(same, scene);
        assert!(same.shares_elements_with(&scene));
    }

    #[test]
    fn test_update_shares_untouched_elements() {
        let scene = Scene::new()
            .append(rect(1, Point::ZERO, Point::new(1.0, 1.0)))
            .append(rect(2, Point::ZERO, Point::new(2.0, 2.0)));
        let updated = scene.update_by_id(ElementId(2), &ElementPatch::default().opacity(0.5));
        assert!(Arc::ptr_eq(&scene.elements[0], &updated.elements[0]));
        assert!(!Arc::ptr_eq(&scene.elements[1], &updated.elements[1]));
    }

    #[test]
    fn test_remove_by_id() {
        let scene = Scene::new()
            .append(rect(1, Point::ZERO, Point::new(1.0, 1.0)))
            .append(rect(2, Point::ZERO, Point::new(2.0, 2.0)));
        let removed = scene.remove_by_id(ElementId(1));
        assert_eq!(removed.len(), 1);
        assert_eq!(scene.len(), 2);
        assert_eq!(removed.remove_by_id(ElementId(1)), removed);
    }

    #[test]
    fn test_map_last_extends_stroke() {
        let scene = Scene::new().append(path(1, vec![Point::ZERO]));
        let extended = scene.map_last(|element| {
            if let Element::Path(stroke) = element {
                stroke.add_point(Point::new(3.0, 4.0));
            }
        });
        let Some(Element::Path(stroke)) = extended.last() else {
            panic!("expected path");
        };
        assert_eq!(stroke.len(), 2);
        let Some(Element::Path(original)) = scene.last() else {
            panic!("expected path");
        };
        assert_eq!(original.len(), 1);
    }

    #[test]
    fn test_max_id_and_bounds() {
        let scene = Scene::new()
            .append(rect(3, Point::ZERO, Point::new(10.0, 10.0)))
            .append(rect(8, Point::new(20.0, 20.0), Point::new(30.0, 30.0)));
        assert_eq!(scene.max_id(), Some(ElementId(8)));
        assert_eq!(scene.bounds(), Some(Rect::new(0.0, 0.0, 30.0, 30.0)));
        assert_eq!(Scene::new().bounds(), None);
    }

    #[test]
    fn test_serializes_as_array() {
        let scene = Scene::new().append(rect(1, Point::ZERO, Point::new(1.0, 1.0)));
        let json = serde_json::to_value(&scene).unwrap();
        assert!(json.is_array());
        let back: Scene = serde_json::from_value(json).unwrap();
        assert_eq!(back, scene);
    }
}
