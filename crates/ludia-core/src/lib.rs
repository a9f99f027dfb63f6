//! Core types shared across the Ludia workspace: error taxonomy,
//! configuration, and domain models.

pub mod config;
pub mod error;
pub mod models;

pub use config::Config;
pub use error::{AppError, ErrorMetadata, LogLevel};
