//! HTTP error response conversion
//!
//! Handlers return `Result<impl IntoResponse, HttpAppError>`. Domain errors
//! (`ValidationError`, `NormalizeError`, `StorageError`, multipart
//! rejections) convert into `AppError` here and render consistently:
//! status and body come from the error's `ErrorMetadata`, and the log level
//! decides how loudly the failure is reported.

use axum::{
    extract::multipart::MultipartError,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use ludia_core::{AppError, ErrorMetadata, LogLevel};
use ludia_processing::{NormalizeError, ValidationError};
use ludia_storage::StorageError;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    /// Machine-readable error code for programmatic handling
    pub code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// Wrapper type for AppError to implement IntoResponse
/// (orphan rules: IntoResponse is external, AppError lives in ludia-core)
#[derive(Debug)]
pub struct HttpAppError(pub AppError);

impl From<AppError> for HttpAppError {
    fn from(err: AppError) -> Self {
        HttpAppError(err)
    }
}

impl From<ValidationError> for HttpAppError {
    fn from(err: ValidationError) -> Self {
        let app = match err {
            ValidationError::FileTooLarge { size, max } => {
                AppError::PayloadTooLarge(format!("{} bytes exceeds max {} bytes", size, max))
            }
            ValidationError::InvalidContentType {
                content_type,
                allowed,
            } => AppError::Validation(format!(
                "Invalid content type '{}', allowed: {:?}",
                content_type, allowed
            )),
            ValidationError::EmptyFile => AppError::Validation("File is empty".to_string()),
        };
        HttpAppError(app)
    }
}

impl From<NormalizeError> for HttpAppError {
    fn from(err: NormalizeError) -> Self {
        HttpAppError(AppError::ImageDecode(err.to_string()))
    }
}

impl From<StorageError> for HttpAppError {
    fn from(err: StorageError) -> Self {
        HttpAppError(AppError::RemoteStore(err.to_string()))
    }
}

impl From<MultipartError> for HttpAppError {
    fn from(err: MultipartError) -> Self {
        // A chunked body that trips the transport limit mid-read surfaces
        // here, not in the upload validator; it still has to be a 413.
        if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
            return HttpAppError(AppError::PayloadTooLarge(err.body_text()));
        }
        HttpAppError(AppError::Validation(format!(
            "Invalid multipart body: {}",
            err.body_text()
        )))
    }
}

fn log_error(error: &AppError) {
    let error_type = error.error_type();
    match error.log_level() {
        LogLevel::Debug => {
            tracing::debug!(error = %error, error_type = error_type, "Request failed");
        }
        LogLevel::Warn => {
            tracing::warn!(error = %error, error_type = error_type, "Request failed");
        }
        LogLevel::Error => {
            tracing::error!(error = %error, error_type = error_type, "Request failed");
        }
    }
}

fn is_production_env() -> bool {
    std::env::var("ENVIRONMENT")
        .or_else(|_| std::env::var("APP_ENV"))
        .map(|env| env.to_lowercase() == "production" || env.to_lowercase() == "prod")
        .unwrap_or(false)
}

impl IntoResponse for HttpAppError {
    fn into_response(self) -> Response {
        let app_error = &self.0;

        let status = StatusCode::from_u16(app_error.http_status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        log_error(app_error);

        // Internal detail (error chains, SQL messages) only leaves the
        // process outside production.
        let details = if is_production_env() {
            None
        } else {
            Some(app_error.detailed_message())
        };

        let body = Json(ErrorResponse {
            error: app_error.client_message(),
            code: app_error.error_code().to_string(),
            details,
        });

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_validation_error_file_too_large() {
        let validation_err = ValidationError::FileTooLarge {
            size: 11 * 1024 * 1024,
            max: 10 * 1024 * 1024,
        };
        let HttpAppError(app_err) = validation_err.into();
        match app_err {
            AppError::PayloadTooLarge(msg) => {
                assert!(msg.contains("11534336"));
                assert!(msg.contains("10485760"));
            }
            other => panic!("Expected PayloadTooLarge, got {:?}", other),
        }
    }

    #[test]
    fn test_from_validation_error_content_type() {
        let validation_err = ValidationError::InvalidContentType {
            content_type: "image/gif".to_string(),
            allowed: vec!["image/jpeg".to_string()],
        };
        let HttpAppError(app_err) = validation_err.into();
        match app_err {
            AppError::Validation(msg) => assert!(msg.contains("image/gif")),
            other => panic!("Expected Validation, got {:?}", other),
        }
    }

    #[test]
    fn test_from_normalize_error_is_image_decode() {
        let HttpAppError(app_err) =
            NormalizeError::Decode("bad magic bytes".to_string()).into();
        match app_err {
            AppError::ImageDecode(msg) => assert!(msg.contains("bad magic bytes")),
            other => panic!("Expected ImageDecode, got {:?}", other),
        }
        // Decode failures are treated as internal, so 500.
        assert_eq!(
            AppError::ImageDecode("x".to_string()).http_status_code(),
            500
        );
    }

    #[test]
    fn test_from_storage_error_is_remote_store() {
        let HttpAppError(app_err) =
            StorageError::UploadFailed("connection reset".to_string()).into();
        match app_err {
            AppError::RemoteStore(msg) => assert!(msg.contains("connection reset")),
            other => panic!("Expected RemoteStore, got {:?}", other),
        }
    }

    /// Public error contract: body has "error" and "code", "details" only
    /// when populated.
    #[test]
    fn test_error_response_shape() {
        let response = ErrorResponse {
            error: "Game not found".to_string(),
            code: "NOT_FOUND".to_string(),
            details: None,
        };
        let json = serde_json::to_value(&response).expect("serialize");
        assert_eq!(
            json.get("error").and_then(|v| v.as_str()),
            Some("Game not found")
        );
        assert_eq!(json.get("code").and_then(|v| v.as_str()), Some("NOT_FOUND"));
        assert!(json.get("details").is_none());
    }
}
