//! Remote image store client.
//!
//! Defines the `Storage` trait the upload pipeline writes through, plus the
//! S3-compatible implementation. Uploads are namespaced by folder label
//! (`avatars/...`, `games/...`) and each call persists a new object; nothing
//! here overwrites or deletes earlier uploads.

pub mod s3;
pub mod traits;

pub use s3::S3Storage;
pub use traits::{ImageFolder, Storage, StorageError, StorageResult};
