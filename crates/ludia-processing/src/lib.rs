//! Image ingestion building blocks: upload validation and normalization.
//!
//! Validation (size/content-type) runs before any bytes are decoded or
//! uploaded; normalization turns accepted bytes into the canonical
//! 512x512 WEBP form.

pub mod image;
pub mod validator;

pub use crate::image::normalizer::{ImageNormalizer, NormalizeError};
pub use validator::{UploadValidator, ValidationError};
