//! HTTP surface for the Ludia backend.
//!
//! Handlers stay thin: multipart collection and response mapping live here,
//! the validate-normalize-store sequence lives in [services::ingest], and
//! persistence lives in the `ludia-db` repositories. All failures cross the
//! boundary as [error::HttpAppError] and render as `{error, code, details?}`.

pub mod error;
pub mod handlers;
pub mod services;
pub mod setup;
pub mod state;
pub mod telemetry;
pub mod utils;
