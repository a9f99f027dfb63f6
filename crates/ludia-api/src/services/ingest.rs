//! Image ingestion: the shared validate -> normalize -> store sequence.
//!
//! Every upload route funnels its file part through [ingest_image]. The
//! steps run strictly in order and the first failure terminates the request
//! with nothing persisted: validation rejects before any decode, decode
//! failure rejects before any upload, and the database is only touched by
//! the caller after a URL came back from the remote store.

use ludia_processing::{ImageNormalizer, UploadValidator};
use ludia_storage::{ImageFolder, Storage};
use uuid::Uuid;

use crate::error::HttpAppError;
use crate::utils::upload::UploadedFile;

/// Run one file through the ingestion pipeline and return its public URL.
#[tracing::instrument(
    skip(validator, normalizer, storage, file),
    fields(folder = %folder, size = file.data.len(), content_type = %file.content_type)
)]
pub async fn ingest_image(
    validator: &UploadValidator,
    normalizer: &ImageNormalizer,
    storage: &dyn Storage,
    folder: ImageFolder,
    file: &UploadedFile,
) -> Result<String, HttpAppError> {
    validator.validate_all(&file.content_type, file.data.len())?;

    let normalized = normalizer.normalize(&file.data)?;

    let filename = format!("{}.webp", Uuid::new_v4());
    let url = storage
        .store(folder, &filename, "image/webp", normalized.to_vec())
        .await?;

    tracing::debug!(url = %url, "Image ingested");
    Ok(url)
}
