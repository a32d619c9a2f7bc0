//! Raster image import: format detection, decoding and canvas placement.

use crate::geometry::fit_within;
use base64::{Engine, engine::general_purpose::STANDARD};
use kurbo::{Point, Rect, Size};
use thiserror::Error;

/// Import errors. None of them mutate the scene.
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("Image data is empty")]
    EmptyData,
    #[error("Unsupported image type")]
    UnsupportedFormat,
    #[error("Failed to decode image: {0}")]
    Decode(String),
}

/// Accepted raster formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Png,
    Jpeg,
    Gif,
    WebP,
}

impl ImageFormat {
    /// Get MIME type for this format.
    pub fn mime_type(&self) -> &'static str {
        match self {
            ImageFormat::Png => "image/png",
            ImageFormat::Jpeg => "image/jpeg",
            ImageFormat::Gif => "image/gif",
            ImageFormat::WebP => "image/webp",
        }
    }

    /// Detect format from file extension.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "png" => Some(ImageFormat::Png),
            "jpg" | "jpeg" => Some(ImageFormat::Jpeg),
            "gif" => Some(ImageFormat::Gif),
            "webp" => Some(ImageFormat::WebP),
            _ => None,
        }
    }

    /// Detect format from magic bytes.
    pub fn from_magic_bytes(data: &[u8]) -> Option<Self> {
        if data.starts_with(&[0x89, b'P', b'N', b'G']) {
            return Some(ImageFormat::Png);
        }
        if data.starts_with(&[0xFF, 0xD8, 0xFF]) {
            return Some(ImageFormat::Jpeg);
        }
        if data.starts_with(b"GIF87a") || data.starts_with(b"GIF89a") {
            return Some(ImageFormat::Gif);
        }
        if data.len() >= 12 && &data[0..4] == b"RIFF" && &data[8..12] == b"WEBP" {
            return Some(ImageFormat::WebP);
        }
        None
    }

    fn decoder_format(self) -> image::ImageFormat {
        match self {
            ImageFormat::Png => image::ImageFormat::Png,
            ImageFormat::Jpeg => image::ImageFormat::Jpeg,
            ImageFormat::Gif => image::ImageFormat::Gif,
            ImageFormat::WebP => image::ImageFormat::WebP,
        }
    }
}

/// A decoded raster, ready to become an image element.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportedImage {
    pub format: ImageFormat,
    /// Natural size in pixels.
    pub source_size: Size,
    /// `data:` URI embedding the original bytes.
    pub src: String,
}

impl ImportedImage {
    /// Detect and decode `data`. Fails without side effects on anything that
    /// is not a readable PNG, JPEG, GIF or WebP.
    pub fn decode(data: &[u8]) -> Result<Self, ImportError> {
        if data.is_empty() {
            return Err(ImportError::EmptyData);
        }
        let format = ImageFormat::from_magic_bytes(data).ok_or(ImportError::UnsupportedFormat)?;
        let decoded = image::load_from_memory_with_format(data, format.decoder_format())
            .map_err(|e| ImportError::Decode(e.to_string()))?;
        if decoded.width() == 0 || decoded.height() == 0 {
            return Err(ImportError::Decode("image has no pixels".to_string()));
        }

        Ok(Self {
            format,
            source_size: Size::new(f64::from(decoded.width()), f64::from(decoded.height())),
            src: format!("data:{};base64,{}", format.mime_type(), STANDARD.encode(data)),
        })
    }

    /// Display box for this image on a canvas of `viewport` size, no larger
    /// than `limit`.
    pub fn placement(&self, viewport: Size, limit: Size) -> Rect {
        place_in_viewport(self.source_size, viewport, limit)
    }
}

/// Fit `source` within `limit`, keeping its aspect ratio, and center it in
/// the viewport.
pub fn place_in_viewport(source: Size, viewport: Size, limit: Size) -> Rect {
    let size = fit_within(source, limit);
    let origin = Point::new(
        (viewport.width - size.width) / 2.0,
        (viewport.height - size.height) / 2.0,
    );
    Rect::from_origin_size(origin, size)
}
