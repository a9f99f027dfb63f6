//! Body-limit behavior for multipart uploads.
//!
//! A body that trips the transport-level limit mid-read never reaches the
//! upload validator; the multipart rejection itself has to come back as a
//! 413, not a generic 400.

use axum::extract::{DefaultBodyLimit, Multipart};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::post;
use axum::{Json, Router};
use axum_test::multipart::{MultipartForm, Part};
use axum_test::TestServer;
use ludia_api::error::HttpAppError;
use ludia_api::utils::upload::MultipartForm as UploadForm;
use serde_json::json;

const BODY_LIMIT: usize = 16 * 1024;

async fn collect_upload(multipart: Multipart) -> Result<impl IntoResponse, HttpAppError> {
    let form = UploadForm::collect(multipart, "image").await?;
    let size = form.file.map(|f| f.data.len()).unwrap_or(0);
    Ok(Json(json!({ "size": size })))
}

fn test_server() -> TestServer {
    let app = Router::new()
        .route("/upload", post(collect_upload))
        .layer(DefaultBodyLimit::max(BODY_LIMIT));
    TestServer::new(app).expect("build test server")
}

#[tokio::test]
async fn upload_within_limit_is_collected() {
    let server = test_server();
    let form = MultipartForm::new().add_part(
        "image",
        Part::bytes(vec![0u8; 1024])
            .file_name("small.png")
            .mime_type("image/png"),
    );

    let response = server.post("/upload").multipart(form).await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body.get("size").and_then(|v| v.as_u64()), Some(1024));
}

#[tokio::test]
async fn upload_over_transport_limit_is_413() {
    let server = test_server();
    let form = MultipartForm::new().add_part(
        "image",
        Part::bytes(vec![0u8; BODY_LIMIT * 2])
            .file_name("huge.png")
            .mime_type("image/png"),
    );

    let response = server.post("/upload").multipart(form).await;

    response.assert_status(StatusCode::PAYLOAD_TOO_LARGE);
    let body: serde_json::Value = response.json();
    assert_eq!(
        body.get("code").and_then(|v| v.as_str()),
        Some("PAYLOAD_TOO_LARGE")
    );
}
