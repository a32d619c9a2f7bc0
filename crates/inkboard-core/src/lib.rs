//! Inkboard Core Library
//!
//! Platform-agnostic scene model, hit-testing, undo history and pointer
//! interaction logic for the Inkboard drawing surface.

pub mod canvas;
pub mod config;
pub mod elements;
pub mod geometry;
pub mod history;
pub mod import;
pub mod input;
pub mod project;
pub mod scene;
pub mod storage;
pub mod tools;

pub use canvas::{Canvas, Effect};
pub use config::{CanvasConfig, ConfigError, HistoryConfig};
pub use elements::{Element, ElementId, ElementKind, ElementPatch, ElementStyle, SerializableColor};
pub use history::History;
pub use import::{ImageFormat, ImportError, ImportedImage};
pub use input::PointerEvent;
pub use project::Project;
pub use scene::Scene;
pub use storage::{MemoryStorage, ProjectStore, Storage, StorageError, StorageResult};
#[cfg(not(target_arch = "wasm32"))]
pub use storage::FileStorage;
pub use tools::{Action, ToolKind};
