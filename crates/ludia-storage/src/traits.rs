//! Storage abstraction trait

use async_trait::async_trait;
use thiserror::Error;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Upload failed: {0}")]
    UploadFailed(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Logical grouping for uploaded images at the remote store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFolder {
    Avatars,
    Games,
}

impl ImageFolder {
    pub fn as_str(&self) -> &'static str {
        match self {
            ImageFolder::Avatars => "avatars",
            ImageFolder::Games => "games",
        }
    }
}

impl std::fmt::Display for ImageFolder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Remote image store abstraction
///
/// One operation: store encoded bytes under a folder and hand back a durable
/// public URL. The call suspends until the remote service acknowledges the
/// upload; there is no retry. Old objects are never collected here, so
/// replacing an entity's image leaves the previous object behind.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Upload a file and return its publicly retrievable URL.
    async fn store(
        &self,
        folder: ImageFolder,
        filename: &str,
        content_type: &str,
        data: Vec<u8>,
    ) -> StorageResult<String>;
}
