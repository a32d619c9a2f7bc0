//! Inkboard Render Library
//!
//! Renderer abstraction for Inkboard scenes and a display-list builder that
//! turns the raster elements of a scene into stroked kurbo paths.

mod display_list;
mod renderer;

pub use display_list::{Brush, DisplayList, DisplayListRenderer, DrawCommand};
pub use renderer::{RenderContext, RenderResult, Renderer, RendererError};
