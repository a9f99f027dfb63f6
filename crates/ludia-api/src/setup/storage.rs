//! Remote image store setup

use anyhow::{Context, Result};
use ludia_core::Config;
use ludia_storage::{S3Storage, Storage};
use std::sync::Arc;

/// Build the remote image store client from configuration.
pub fn setup_storage(config: &Config) -> Result<Arc<dyn Storage>> {
    let storage = S3Storage::new(
        config.s3_bucket.clone(),
        config.s3_region.clone(),
        config.s3_endpoint.clone(),
    )
    .context("Failed to build remote image store client")?;

    tracing::info!(
        bucket = %config.s3_bucket,
        region = %config.s3_region,
        endpoint = config.s3_endpoint.as_deref().unwrap_or("aws"),
        "Remote image store configured"
    );

    Ok(Arc::new(storage))
}
