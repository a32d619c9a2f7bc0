//! Display list: the stroked paths a raster sink draws for a scene.

use crate::renderer::{RenderContext, RenderResult, Renderer};
use inkboard_core::elements::{Arrow, Freehand};
use inkboard_core::{Element, ElementId, ElementStyle, Scene};
use kurbo::{BezPath, Shape};
use peniko::Color;

/// Curve flattening tolerance for ellipses, in pixels.
const TOLERANCE: f64 = 0.1;

/// One stroked path.
#[derive(Debug, Clone)]
pub struct DrawCommand {
    /// Element the path was built from.
    pub id: ElementId,
    pub path: BezPath,
    /// Stroke color with the element's opacity applied.
    pub stroke: Color,
    pub width: f64,
    /// The element is held by the select tool.
    pub selected: bool,
}

/// Stroke the drawing tool would use, for cursor previews.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Brush {
    pub color: Color,
    pub width: f64,
}

impl From<&ElementStyle> for Brush {
    fn from(style: &ElementStyle) -> Self {
        Self {
            color: style.color_with_opacity(),
            width: style.stroke_width,
        }
    }
}

/// Draw commands in paint order.
#[derive(Debug, Clone, Default)]
pub struct DisplayList {
    pub commands: Vec<DrawCommand>,
}

impl DisplayList {
    /// Build the display list for `scene`, skipping overlay elements.
    pub fn build(scene: &Scene) -> Self {
        let commands = scene.iter().filter_map(command_for).collect();
        Self { commands }
    }

    /// Build the display list for a frame, flagging the selected element.
    pub fn from_context(ctx: &RenderContext) -> Self {
        let mut list = Self::build(ctx.scene);
        if let Some(selected) = ctx.selection {
            for command in list.commands.iter_mut().filter(|c| c.id == selected) {
                command.selected = true;
            }
        }
        list
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

fn command_for(element: &Element) -> Option<DrawCommand> {
    let path = match element {
        Element::Path(freehand) => polyline(freehand),
        Element::Rectangle(rect) => rect.as_rect().to_path(TOLERANCE),
        Element::Circle(circle) => circle.as_kurbo().to_path(TOLERANCE),
        Element::Arrow(arrow) => arrow_path(arrow),
        Element::Text(_) | Element::Note(_) | Element::Image(_) => return None,
    };
    Some(stroked(element.id(), path, element.style()))
}

fn stroked(id: ElementId, path: BezPath, style: &ElementStyle) -> DrawCommand {
    DrawCommand {
        id,
        path,
        stroke: style.color_with_opacity(),
        width: style.stroke_width,
        selected: false,
    }
}

fn polyline(freehand: &Freehand) -> BezPath {
    let mut path = BezPath::new();
    let mut points = freehand.points.iter();
    if let Some(first) = points.next() {
        path.move_to(*first);
        for point in points {
            path.line_to(*point);
        }
    }
    path
}

fn arrow_path(arrow: &Arrow) -> BezPath {
    let (left, right) = arrow.head_wings();
    let mut path = BezPath::new();
    path.move_to(arrow.start_point);
    path.line_to(arrow.end_point);
    path.move_to(left);
    path.line_to(arrow.end_point);
    path.line_to(right);
    path
}

/// Renderer that keeps the display list of the last frame.
///
/// Hosts hand `latest()` to whatever raster backend they use.
#[derive(Debug, Default)]
pub struct DisplayListRenderer {
    latest: DisplayList,
    background: Option<Color>,
    brush: Option<Brush>,
}

impl DisplayListRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Display list of the last rendered frame.
    pub fn latest(&self) -> &DisplayList {
        &self.latest
    }

    /// Background color of the last rendered frame.
    pub fn background(&self) -> Option<Color> {
        self.background
    }

    /// Drawing-tool stroke of the last rendered frame.
    pub fn brush(&self) -> Option<Brush> {
        self.brush
    }
}

impl Renderer for DisplayListRenderer {
    fn render(&mut self, ctx: &RenderContext) -> RenderResult<()> {
        self.latest = DisplayList::from_context(ctx);
        self.background = Some(self.background_color(ctx));
        self.brush = Some(Brush::from(ctx.current_style));
        log::trace!("Built display list with {} commands", self.latest.len());
        Ok(())
    }
}
