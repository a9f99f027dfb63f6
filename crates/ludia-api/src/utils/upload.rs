//! Multipart form collection.
//!
//! The upload routes all take `multipart/form-data` with text fields plus at
//! most one image file. This module drains the multipart stream into an
//! in-memory form so handlers can check required fields before any pipeline
//! work starts.

use axum::extract::Multipart;
use bytes::Bytes;
use ludia_core::AppError;
use std::collections::HashMap;

use crate::error::HttpAppError;

const OCTET_STREAM: &str = "application/octet-stream";

/// A file part captured from a multipart request.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub filename: Option<String>,
    pub content_type: String,
    pub data: Bytes,
}

/// All parts of one multipart request: text fields by name, plus the file
/// part (if any) captured from `file_field`.
#[derive(Debug, Default)]
pub struct MultipartForm {
    fields: HashMap<String, String>,
    pub file: Option<UploadedFile>,
}

impl MultipartForm {
    /// Drain the multipart stream. The part named `file_field` is kept as
    /// bytes; every other part is read as text.
    pub async fn collect(
        mut multipart: Multipart,
        file_field: &str,
    ) -> Result<Self, HttpAppError> {
        let mut form = MultipartForm::default();

        while let Some(field) = multipart.next_field().await? {
            let Some(name) = field.name().map(str::to_string) else {
                continue;
            };

            if name == file_field {
                let filename = field.file_name().map(str::to_string);
                let content_type = field
                    .content_type()
                    .unwrap_or(OCTET_STREAM)
                    .to_string();
                let data = field.bytes().await?;
                form.file = Some(UploadedFile {
                    filename,
                    content_type,
                    data,
                });
            } else {
                let value = field.text().await?;
                form.fields.insert(name, value);
            }
        }

        Ok(form)
    }

    /// Text field value, if the part was present (may be empty).
    pub fn text(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    /// Text field value that is present and non-empty, per the truthy
    /// presence checks the upload routes use.
    pub fn non_empty_text(&self, name: &str) -> Option<&str> {
        self.text(name).filter(|s| !s.is_empty())
    }

    /// Required text field; absence or emptiness is a validation failure.
    pub fn require_text(&self, name: &str) -> Result<&str, HttpAppError> {
        self.non_empty_text(name).ok_or_else(|| {
            HttpAppError(AppError::Validation(format!(
                "Missing required field: {}",
                name
            )))
        })
    }

    /// Required integer field.
    pub fn require_i64(&self, name: &str) -> Result<i64, HttpAppError> {
        let raw = self.require_text(name)?;
        raw.parse::<i64>().map_err(|_| {
            HttpAppError(AppError::Validation(format!(
                "Invalid value for field {}: {}",
                name, raw
            )))
        })
    }
}
