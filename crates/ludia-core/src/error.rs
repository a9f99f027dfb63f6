//! Error types module
//!
//! All failures converge on the `AppError` enum. Each variant carries enough
//! context for the HTTP boundary to render a response without inspecting
//! strings: the `ErrorMetadata` impl maps variants to a status code, a
//! machine-readable code, a client-facing message, and a log level.

use sqlx::Error as SqlxError;

/// Log level for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Expected errors like validation failures
    Debug,
    /// Recoverable or client-caused oddities worth noticing
    Warn,
    /// Unexpected failures
    Error,
}

/// Metadata for error responses - defines how an error is presented over HTTP
pub trait ErrorMetadata {
    /// HTTP status code to return
    fn http_status_code(&self) -> u16;

    /// Machine-readable error code (e.g., "DATABASE_ERROR")
    fn error_code(&self) -> &'static str;

    /// Client-facing message (may differ from internal error message)
    fn client_message(&self) -> String;

    /// Log level for this error
    fn log_level(&self) -> LogLevel;
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[source] SqlxError),

    #[error("Remote store error: {0}")]
    RemoteStore(String),

    #[error("Image decode error: {0}")]
    ImageDecode(String),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("File too large: {0}")]
    PayloadTooLarge(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Referenced by other data: {0}")]
    ReferentialConstraint(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<SqlxError> for AppError {
    fn from(err: SqlxError) -> Self {
        AppError::Database(err)
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal(err.to_string())
    }
}

/// Static metadata for each variant: (http_status, error_code, log_level).
/// client_message stays per-variant for dynamic content.
fn app_error_static_metadata(err: &AppError) -> (u16, &'static str, LogLevel) {
    match err {
        AppError::Database(_) => (500, "DATABASE_ERROR", LogLevel::Error),
        AppError::RemoteStore(_) => (500, "REMOTE_STORE_ERROR", LogLevel::Error),
        // Decode failures surface as 500, not 400. Clients relying on this
        // today; see DESIGN.md before changing.
        AppError::ImageDecode(_) => (500, "IMAGE_DECODE_ERROR", LogLevel::Warn),
        AppError::Validation(_) => (400, "VALIDATION_ERROR", LogLevel::Debug),
        AppError::PayloadTooLarge(_) => (413, "PAYLOAD_TOO_LARGE", LogLevel::Debug),
        AppError::NotFound(_) => (404, "NOT_FOUND", LogLevel::Debug),
        AppError::Duplicate(_) => (400, "DUPLICATE", LogLevel::Debug),
        AppError::ReferentialConstraint(_) => (400, "REFERENTIAL_CONSTRAINT", LogLevel::Debug),
        AppError::Unauthorized(_) => (401, "UNAUTHORIZED", LogLevel::Debug),
        AppError::Internal(_) => (500, "INTERNAL_ERROR", LogLevel::Error),
    }
}

impl AppError {
    /// Error type name for logging
    pub fn error_type(&self) -> &'static str {
        match self {
            AppError::Database(_) => "Database",
            AppError::RemoteStore(_) => "RemoteStore",
            AppError::ImageDecode(_) => "ImageDecode",
            AppError::Validation(_) => "Validation",
            AppError::PayloadTooLarge(_) => "PayloadTooLarge",
            AppError::NotFound(_) => "NotFound",
            AppError::Duplicate(_) => "Duplicate",
            AppError::ReferentialConstraint(_) => "ReferentialConstraint",
            AppError::Unauthorized(_) => "Unauthorized",
            AppError::Internal(_) => "Internal",
        }
    }

    /// Detailed message including the source error chain
    pub fn detailed_message(&self) -> String {
        use std::error::Error;

        let mut details = self.to_string();
        let mut source = self.source();
        while let Some(err) = source {
            details.push_str(&format!("\n  Caused by: {}", err));
            source = err.source();
        }
        details
    }
}

impl ErrorMetadata for AppError {
    fn http_status_code(&self) -> u16 {
        app_error_static_metadata(self).0
    }

    fn error_code(&self) -> &'static str {
        app_error_static_metadata(self).1
    }

    fn log_level(&self) -> LogLevel {
        app_error_static_metadata(self).2
    }

    fn client_message(&self) -> String {
        match self {
            // Internal failures keep their detail out of the response body
            AppError::Database(_) => "Failed to access database".to_string(),
            AppError::RemoteStore(_) => "Failed to upload image to remote store".to_string(),
            AppError::Internal(_) => "Internal server error".to_string(),
            AppError::ImageDecode(ref msg) => msg.clone(),
            AppError::Validation(ref msg) => msg.clone(),
            AppError::PayloadTooLarge(ref msg) => msg.clone(),
            AppError::NotFound(ref msg) => msg.clone(),
            AppError::Duplicate(ref msg) => msg.clone(),
            AppError::ReferentialConstraint(ref msg) => msg.clone(),
            AppError::Unauthorized(ref msg) => msg.clone(),
        }
    }
}
