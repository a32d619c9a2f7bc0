//! Renderer trait abstraction.

use inkboard_core::{ElementId, ElementStyle, Scene};
use peniko::Color;
use thiserror::Error;

/// Renderer errors.
#[derive(Debug, Error)]
pub enum RendererError {
    #[error("Render failed: {0}")]
    RenderFailed(String),
    #[error("Surface error: {0}")]
    Surface(String),
}

/// Result type for renderer operations.
pub type RenderResult<T> = Result<T, RendererError>;

/// Context for a single render frame.
pub struct RenderContext<'a> {
    /// The scene to render, back to front.
    pub scene: &'a Scene,
    /// Drawing attributes currently picked in the toolbar.
    pub current_style: &'a ElementStyle,
    /// Background color.
    pub background_color: Color,
    /// Element being dragged by the select tool, if any.
    pub selection: Option<ElementId>,
}

impl<'a> RenderContext<'a> {
    /// Create a new render context.
    pub fn new(scene: &'a Scene, current_style: &'a ElementStyle) -> Self {
        Self {
            scene,
            current_style,
            background_color: Color::from_rgba8(255, 255, 255, 255),
            selection: None,
        }
    }

    /// Set the background color.
    pub fn with_background(mut self, color: Color) -> Self {
        self.background_color = color;
        self
    }

    /// Set the selected element.
    pub fn with_selection(mut self, selection: Option<ElementId>) -> Self {
        self.selection = selection;
        self
    }
}

/// Trait for rendering sinks.
///
/// A sink receives the whole scene once per frame. Text, note and image
/// elements are drawn by the host's overlays and are never passed on.
pub trait Renderer {
    /// Draw one frame.
    fn render(&mut self, ctx: &RenderContext) -> RenderResult<()>;

    /// Get the background color (for clearing).
    fn background_color(&self, ctx: &RenderContext) -> Color {
        ctx.background_color
    }
}
