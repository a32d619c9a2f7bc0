//! Storage abstraction for persistence.

mod memory;
mod projects;

#[cfg(not(target_arch = "wasm32"))]
mod file;

pub use memory::MemoryStorage;
pub use projects::{CURRENT_PROJECT_KEY, PROJECTS_KEY, ProjectStore};

#[cfg(not(target_arch = "wasm32"))]
pub use file::FileStorage;

use thiserror::Error;

/// Storage errors.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Key not found: {0}")]
    NotFound(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("IO error: {0}")]
    Io(String),
    #[error("Storage error: {0}")]
    Other(String),
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Key-value backend holding serialized values.
///
/// Implementations can keep values in memory or on the filesystem.
pub trait Storage: Send + Sync {
    /// Store `value` under `key`, replacing any previous value.
    fn save(&self, key: &str, value: &str) -> StorageResult<()>;

    /// Load the value under `key`.
    fn load(&self, key: &str) -> StorageResult<String>;

    /// Check if a key exists.
    fn exists(&self, key: &str) -> StorageResult<bool>;
}
