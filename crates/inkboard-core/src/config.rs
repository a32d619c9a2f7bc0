//! Canvas configuration.

use crate::elements::{ElementStyle, SerializableColor};
use kurbo::Size;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Undo history settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HistoryConfig {
    /// Maximum retained snapshots; `None` keeps every entry.
    pub max_entries: Option<usize>,
}

/// Settings for a [`Canvas`](crate::Canvas). Every field has a default, so
/// partial JSON documents are accepted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CanvasConfig {
    /// Visible canvas size, used to place imported images.
    pub viewport: Size,
    pub history: HistoryConfig,
    /// Style given to new elements.
    pub default_style: ElementStyle,
    /// Background for new sticky notes.
    pub note_color: SerializableColor,
    /// Fraction of the viewport an imported image may cover on each axis.
    pub import_max_fraction: f64,
    /// Name given to freshly created projects.
    pub default_project_name: String,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            viewport: Size::new(1280.0, 800.0),
            history: HistoryConfig::default(),
            default_style: ElementStyle::default(),
            note_color: SerializableColor::note_yellow(),
            import_max_fraction: 0.8,
            default_project_name: "Untitled".to_string(),
        }
    }
}

impl CanvasConfig {
    /// Parse a configuration from JSON.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Largest size an imported image may take.
    pub fn import_limit(&self) -> Size {
        Size::new(
            self.viewport.width * self.import_max_fraction,
            self.viewport.height * self.import_max_fraction,
        )
    }
}
