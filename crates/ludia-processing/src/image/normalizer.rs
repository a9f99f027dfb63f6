//! Canonical image form: 512x512 cover-fit WEBP.
//!
//! Every stored avatar or game image goes through `normalize` before upload.
//! Cover fit scales the image until both target dimensions are covered and
//! center-crops the overflow, so output never letterboxes regardless of the
//! input aspect ratio.

use bytes::Bytes;
use image::GenericImageView;
use std::io::Cursor;

/// Side length of the normalized square image.
pub const NORMALIZED_SIZE: u32 = 512;

/// WEBP encode quality for normalized images.
pub const WEBP_QUALITY: f32 = 90.0;

#[derive(Debug, thiserror::Error)]
pub enum NormalizeError {
    #[error("Failed to decode image: {0}")]
    Decode(String),

    #[error("Failed to encode image: {0}")]
    Encode(String),
}

/// Normalizes raw image bytes into the canonical stored form.
#[derive(Debug, Clone, Copy)]
pub struct ImageNormalizer {
    size: u32,
    quality: f32,
}

impl Default for ImageNormalizer {
    fn default() -> Self {
        Self {
            size: NORMALIZED_SIZE,
            quality: WEBP_QUALITY,
        }
    }
}

impl ImageNormalizer {
    pub fn new(size: u32, quality: f32) -> Self {
        Self { size, quality }
    }

    /// Decode, cover-fit to the target square, and re-encode as WEBP.
    ///
    /// Deterministic for identical input; no side effects. Bytes that are
    /// not a decodable JPEG/PNG/WEBP image fail with `NormalizeError::Decode`.
    pub fn normalize(&self, data: &[u8]) -> Result<Bytes, NormalizeError> {
        let cursor = Cursor::new(data);
        let img = image::ImageReader::new(cursor)
            .with_guessed_format()
            .map_err(|e| NormalizeError::Decode(e.to_string()))?
            .decode()
            .map_err(|e| NormalizeError::Decode(e.to_string()))?;

        let (orig_width, orig_height) = img.dimensions();
        let filter = select_filter(orig_width, orig_height, self.size, self.size);
        tracing::debug!(
            orig_width = orig_width,
            orig_height = orig_height,
            filter = ?filter,
            "Normalizing image"
        );
        let squared = img.resize_to_fill(self.size, self.size, filter);

        // webp::Encoder wants raw RGBA
        let rgba = squared.to_rgba8();
        let encoder = webp::Encoder::from_rgba(&rgba, self.size, self.size);
        let webp_data = encoder
            .encode_simple(false, self.quality)
            .map_err(|e| NormalizeError::Encode(format!("WEBP encoding failed: {:?}", e)))?;

        Ok(Bytes::copy_from_slice(&webp_data))
    }
}

/// Select resampling filter based on the downscale ratio: cheap filters for
/// heavy downscaling where ringing is invisible, Lanczos3 near 1:1.
fn select_filter(
    orig_width: u32,
    orig_height: u32,
    new_width: u32,
    new_height: u32,
) -> image::imageops::FilterType {
    let width_ratio = orig_width as f32 / new_width as f32;
    let height_ratio = orig_height as f32 / new_height as f32;
    let max_ratio = width_ratio.max(height_ratio);

    if max_ratio > 2.0 {
        image::imageops::FilterType::Triangle
    } else if max_ratio > 1.5 {
        image::imageops::FilterType::CatmullRom
    } else {
        image::imageops::FilterType::Lanczos3
    }
}
