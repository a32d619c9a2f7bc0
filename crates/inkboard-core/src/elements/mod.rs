//! Element definitions for the drawing surface.

mod arrow;
mod circle;
mod freehand;
mod image;
mod note;
mod rectangle;
mod text;

pub use arrow::Arrow;
pub use circle::Circle;
pub use freehand::Freehand;
pub use image::Image;
pub use note::Note;
pub use rectangle::Rectangle;
pub use text::Text;

use kurbo::{Point, Rect};
use peniko::Color;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Pick distance for strokes and arrow shafts, in pixels.
pub const HIT_TOLERANCE: f64 = 10.0;

/// Width and height used for text, note and image boxes without an explicit size.
pub const DEFAULT_BOX_SIZE: f64 = 200.0;

/// Serializable color representation (RGBA8), stored as a `#rrggbbaa` string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct SerializableColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl SerializableColor {
    pub fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn black() -> Self {
        Self::new(0, 0, 0, 255)
    }

    pub fn white() -> Self {
        Self::new(255, 255, 255, 255)
    }

    /// Default sticky-note background.
    pub fn note_yellow() -> Self {
        Self::new(254, 240, 138, 255)
    }

    /// Parse `#rgb`, `#rrggbb` or `#rrggbbaa`.
    pub fn from_hex(color: &str) -> Option<Self> {
        let hex = color.trim().strip_prefix('#')?;
        if !hex.is_ascii() {
            return None;
        }
        let byte = |s: &str| u8::from_str_radix(s, 16).ok();
        match hex.len() {
            3 => {
                let r = byte(&hex[0..1])? * 17;
                let g = byte(&hex[1..2])? * 17;
                let b = byte(&hex[2..3])? * 17;
                Some(Self::new(r, g, b, 255))
            }
            6 => Some(Self::new(byte(&hex[0..2])?, byte(&hex[2..4])?, byte(&hex[4..6])?, 255)),
            8 => Some(Self::new(
                byte(&hex[0..2])?,
                byte(&hex[2..4])?,
                byte(&hex[4..6])?,
                byte(&hex[6..8])?,
            )),
            _ => None,
        }
    }

    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
    }
}

impl Default for SerializableColor {
    fn default() -> Self {
        Self::black()
    }
}

impl From<SerializableColor> for String {
    fn from(color: SerializableColor) -> Self {
        color.to_hex()
    }
}

impl TryFrom<String> for SerializableColor {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_hex(&value).ok_or_else(|| format!("invalid color: {value}"))
    }
}

impl From<Color> for SerializableColor {
    fn from(color: Color) -> Self {
        let rgba = color.to_rgba8();
        Self {
            r: rgba.r,
            g: rgba.g,
            b: rgba.b,
            a: rgba.a,
        }
    }
}

impl From<SerializableColor> for Color {
    fn from(color: SerializableColor) -> Self {
        Color::from_rgba8(color.r, color.g, color.b, color.a)
    }
}

/// Attributes shared by every element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementStyle {
    /// Stroke color; the fill color for notes.
    #[serde(default)]
    pub color: SerializableColor,
    /// Stroke width, always positive.
    #[serde(default = "default_stroke_width")]
    pub stroke_width: f64,
    /// Overall opacity (0.0 = fully transparent, 1.0 = fully opaque).
    #[serde(default = "default_opacity")]
    pub opacity: f64,
}

fn default_stroke_width() -> f64 {
    2.0
}

fn default_opacity() -> f64 {
    1.0
}

impl ElementStyle {
    pub fn new(color: SerializableColor, stroke_width: f64, opacity: f64) -> Self {
        Self {
            color,
            stroke_width: stroke_width.max(f64::EPSILON),
            opacity: opacity.clamp(0.0, 1.0),
        }
    }

    /// Get the color with opacity applied.
    pub fn color_with_opacity(&self) -> Color {
        let alpha = (f64::from(self.color.a) * self.opacity).round() as u8;
        Color::from_rgba8(self.color.r, self.color.g, self.color.b, alpha)
    }

    fn apply_patch(&mut self, patch: &ElementPatch) {
        if let Some(color) = patch.color {
            self.color = color;
        }
        if let Some(width) = patch.stroke_width.filter(|w| *w > 0.0) {
            self.stroke_width = width;
        }
        if let Some(opacity) = patch.opacity {
            self.opacity = opacity.clamp(0.0, 1.0);
        }
    }
}

impl Default for ElementStyle {
    fn default() -> Self {
        Self {
            color: SerializableColor::black(),
            stroke_width: default_stroke_width(),
            opacity: default_opacity(),
        }
    }
}

/// Unique, monotonically assigned element identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementId(pub u64);

impl ElementId {
    /// The id following this one.
    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Discriminant of an [`Element`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
    Path,
    Rectangle,
    Circle,
    Arrow,
    Text,
    Note,
    Image,
}

/// Sparse update for an element. Only present fields are applied, and only
/// when meaningful for the element's kind.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<SerializableColor>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stroke_width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
    /// Replacement point list (path).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub points: Option<Vec<Point>>,
    /// New start point (rectangle, circle, arrow).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_point: Option<Point>,
    /// New end point (rectangle, circle, arrow).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_point: Option<Point>,
    /// New top-left anchor (text, note, image).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<Point>,
    /// New text content (text, note).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// New box width (text, note, image).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    /// New box height (text, note, image).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    /// New raster source (image).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub src: Option<String>,
    /// New rotation in degrees (image).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rotation: Option<f64>,
}

impl ElementPatch {
    pub fn color(mut self, color: SerializableColor) -> Self {
        self.color = Some(color);
        self
    }

    pub fn stroke_width(mut self, width: f64) -> Self {
        self.stroke_width = Some(width);
        self
    }

    pub fn opacity(mut self, opacity: f64) -> Self {
        self.opacity = Some(opacity);
        self
    }

    pub fn points(mut self, points: Vec<Point>) -> Self {
        self.points = Some(points);
        self
    }

    pub fn start_point(mut self, point: Point) -> Self {
        self.start_point = Some(point);
        self
    }

    pub fn end_point(mut self, point: Point) -> Self {
        self.end_point = Some(point);
        self
    }

    pub fn position(mut self, position: Point) -> Self {
        self.position = Some(position);
        self
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn size(mut self, width: f64, height: f64) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }

    pub fn src(mut self, src: impl Into<String>) -> Self {
        self.src = Some(src.into());
        self
    }

    pub fn rotation(mut self, degrees: f64) -> Self {
        self.rotation = Some(degrees);
        self
    }

    /// Check if the patch carries no fields.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Common trait for all element kinds.
pub trait ElementTrait {
    /// Get the unique identifier.
    fn id(&self) -> ElementId;

    /// Get the bounding box used for picking.
    fn bounds(&self) -> Rect;

    /// Check if a point hits this element.
    fn hit_test(&self, point: Point) -> bool;

    /// Get the style.
    fn style(&self) -> &ElementStyle;

    /// Get mutable style.
    fn style_mut(&mut self) -> &mut ElementStyle;

    /// Merge the fields of `patch` that apply to this kind.
    fn apply_patch(&mut self, patch: &ElementPatch);
}

/// Closed set of drawable elements, tagged by `kind` when serialized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Element {
    Path(Freehand),
    Rectangle(Rectangle),
    Circle(Circle),
    Arrow(Arrow),
    Text(Text),
    Note(Note),
    Image(Image),
}

impl Element {
    pub fn kind(&self) -> ElementKind {
        match self {
            Element::Path(_) => ElementKind::Path,
            Element::Rectangle(_) => ElementKind::Rectangle,
            Element::Circle(_) => ElementKind::Circle,
            Element::Arrow(_) => ElementKind::Arrow,
            Element::Text(_) => ElementKind::Text,
            Element::Note(_) => ElementKind::Note,
            Element::Image(_) => ElementKind::Image,
        }
    }

    fn as_trait(&self) -> &dyn ElementTrait {
        match self {
            Element::Path(e) => e,
            Element::Rectangle(e) => e,
            Element::Circle(e) => e,
            Element::Arrow(e) => e,
            Element::Text(e) => e,
            Element::Note(e) => e,
            Element::Image(e) => e,
        }
    }

    fn as_trait_mut(&mut self) -> &mut dyn ElementTrait {
        match self {
            Element::Path(e) => e,
            Element::Rectangle(e) => e,
            Element::Circle(e) => e,
            Element::Arrow(e) => e,
            Element::Text(e) => e,
            Element::Note(e) => e,
            Element::Image(e) => e,
        }
    }

    pub fn id(&self) -> ElementId {
        self.as_trait().id()
    }

    pub fn bounds(&self) -> Rect {
        self.as_trait().bounds()
    }

    pub fn hit_test(&self, point: Point) -> bool {
        self.as_trait().hit_test(point)
    }

    pub fn style(&self) -> &ElementStyle {
        self.as_trait().style()
    }

    pub fn style_mut(&mut self) -> &mut ElementStyle {
        self.as_trait_mut().style_mut()
    }

    pub fn apply_patch(&mut self, patch: &ElementPatch) {
        self.as_trait_mut().apply_patch(patch);
    }

    /// Text, note and image elements are positioned overlays managed by
    /// their own editors rather than the raster surface.
    pub fn is_overlay(&self) -> bool {
        matches!(self, Element::Text(_) | Element::Note(_) | Element::Image(_))
    }

    /// Elements the select tool can pick up directly.
    pub fn is_selectable(&self) -> bool {
        !self.is_overlay()
    }
}
