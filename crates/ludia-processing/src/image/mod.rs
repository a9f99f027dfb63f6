//! Image normalization.

pub mod normalizer;

pub use normalizer::{ImageNormalizer, NormalizeError};
