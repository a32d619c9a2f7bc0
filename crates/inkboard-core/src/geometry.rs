//! Stateless geometry helpers shared by hit-testing, rendering and import.

use kurbo::{Point, Rect, Size, Vec2};
use std::f64::consts::PI;

/// Default length of each arrow-head barb, in pixels.
pub const ARROW_HEAD_LENGTH: f64 = 15.0;

/// Default angle between the shaft and each barb.
pub const ARROW_HEAD_SPREAD: f64 = PI / 6.0;

/// Distance from a point to the segment `a`→`b`.
///
/// The projection is clamped to the segment, so points beyond either end
/// measure to that endpoint. A zero-length segment measures point to point.
pub fn distance_to_segment(point: Point, a: Point, b: Point) -> f64 {
    let seg = b - a;
    let pv = point - a;
    let len_sq = seg.hypot2();
    if len_sq < f64::EPSILON {
        return pv.hypot();
    }
    let t = (pv.dot(seg) / len_sq).clamp(0.0, 1.0);
    let proj = a + seg * t;
    (point - proj).hypot()
}

/// Minimum distance from a point to the segments of a polyline.
///
/// Fewer than two points form no segment and are infinitely far.
pub fn distance_to_polyline(point: Point, points: &[Point]) -> f64 {
    points
        .windows(2)
        .map(|w| distance_to_segment(point, w[0], w[1]))
        .fold(f64::INFINITY, f64::min)
}

/// Whether `point` lies inside the ellipse inscribed in the box spanned by
/// `start` and `end`.
///
/// An ellipse with zero radius on either axis contains nothing.
pub fn ellipse_contains(point: Point, start: Point, end: Point) -> bool {
    let center = start.midpoint(end);
    let rx = (end.x - start.x).abs() / 2.0;
    let ry = (end.y - start.y).abs() / 2.0;
    if rx < f64::EPSILON || ry < f64::EPSILON {
        return false;
    }
    let nx = (point.x - center.x) / rx;
    let ny = (point.y - center.y) / ry;
    nx * nx + ny * ny <= 1.0
}

/// Inclusive axis-aligned containment for a box anchored at `origin`.
pub fn box_contains(point: Point, origin: Point, size: Size) -> bool {
    point.x >= origin.x
        && point.x <= origin.x + size.width
        && point.y >= origin.y
        && point.y <= origin.y + size.height
}

/// Normalized rectangle spanned by two opposite corners, in either order.
pub fn rect_from_corners(a: Point, b: Point) -> Rect {
    Rect::from_points(a, b)
}

/// Inclusive containment for the rectangle spanned by two corners.
pub fn corners_contain(point: Point, a: Point, b: Point) -> bool {
    let rect = rect_from_corners(a, b);
    point.x >= rect.x0 && point.x <= rect.x1 && point.y >= rect.y0 && point.y <= rect.y1
}

/// The two barb endpoints of an arrow head at `end`, pointing away from `start`.
///
/// Each barb is `head_length` long and rotated by `spread` either side of
/// the reversed shaft direction.
pub fn arrow_head_wings(start: Point, end: Point, head_length: f64, spread: f64) -> (Point, Point) {
    let angle = (end.y - start.y).atan2(end.x - start.x);
    let wing = |theta: f64| end - Vec2::new(theta.cos(), theta.sin()) * head_length;
    (wing(angle - spread), wing(angle + spread))
}

/// Scale `size` down to fit within `max` on both axes, preserving aspect ratio.
///
/// Sizes already inside `max` are returned unchanged; nothing is upscaled.
pub fn fit_within(size: Size, max: Size) -> Size {
    if size.width <= 0.0 || size.height <= 0.0 {
        return Size::ZERO;
    }
    let scale = (max.width / size.width).min(max.height / size.height).min(1.0);
    Size::new(size.width * scale, size.height * scale)
}
