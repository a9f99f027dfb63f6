//! Ingest pipeline integration tests.
//!
//! Drives the validate -> normalize -> store sequence against an in-memory
//! storage double, checking the ordering guarantees: rejected input never
//! reaches the store, and accepted input arrives there in canonical form.

use async_trait::async_trait;
use bytes::Bytes;
use image::{DynamicImage, GenericImageView, ImageFormat, Rgba, RgbaImage};
use ludia_api::services::ingest::ingest_image;
use ludia_api::utils::upload::UploadedFile;
use ludia_core::AppError;
use ludia_processing::{ImageNormalizer, UploadValidator};
use ludia_storage::{ImageFolder, Storage, StorageError, StorageResult};
use std::io::Cursor;
use std::sync::Mutex;

const MAX_SIZE: usize = 10 * 1024 * 1024;

/// Storage double that records uploads instead of talking to a remote store.
#[derive(Default)]
struct MemoryStorage {
    objects: Mutex<Vec<(String, Vec<u8>)>>,
    fail_uploads: bool,
}

impl MemoryStorage {
    fn failing() -> Self {
        Self {
            objects: Mutex::new(Vec::new()),
            fail_uploads: true,
        }
    }

    fn stored(&self) -> Vec<(String, Vec<u8>)> {
        self.objects.lock().expect("lock").clone()
    }
}

#[async_trait]
impl Storage for MemoryStorage {
    async fn store(
        &self,
        folder: ImageFolder,
        filename: &str,
        _content_type: &str,
        data: Vec<u8>,
    ) -> StorageResult<String> {
        if self.fail_uploads {
            return Err(StorageError::UploadFailed("simulated outage".to_string()));
        }
        let key = format!("{}/{}", folder.as_str(), filename);
        self.objects.lock().expect("lock").push((key.clone(), data));
        Ok(format!("https://img.example.com/{}", key))
    }
}

fn validator() -> UploadValidator {
    UploadValidator::new(
        MAX_SIZE,
        vec![
            "image/jpeg".to_string(),
            "image/png".to_string(),
            "image/webp".to_string(),
        ],
    )
}

fn png_file(width: u32, height: u32) -> UploadedFile {
    let img = DynamicImage::ImageRgba8(RgbaImage::from_pixel(
        width,
        height,
        Rgba([10, 120, 90, 255]),
    ));
    let mut buffer = Vec::new();
    img.write_to(&mut Cursor::new(&mut buffer), ImageFormat::Png)
        .expect("encode fixture");
    UploadedFile {
        filename: Some("fixture.png".to_string()),
        content_type: "image/png".to_string(),
        data: Bytes::from(buffer),
    }
}

#[tokio::test]
async fn ingest_stores_normalized_webp_and_returns_url() {
    let storage = MemoryStorage::default();
    let normalizer = ImageNormalizer::default();
    let file = png_file(800, 300);

    let url = ingest_image(
        &validator(),
        &normalizer,
        &storage,
        ImageFolder::Avatars,
        &file,
    )
    .await
    .expect("ingest");

    let stored = storage.stored();
    assert_eq!(stored.len(), 1);
    let (key, data) = &stored[0];
    assert!(key.starts_with("avatars/"));
    assert!(key.ends_with(".webp"));
    assert_eq!(url, format!("https://img.example.com/{}", key));

    // The stored object is the canonical 512x512 WEBP form.
    assert_eq!(image::guess_format(data).expect("format"), ImageFormat::WebP);
    let decoded = image::load_from_memory(data).expect("decode stored object");
    assert_eq!(decoded.dimensions(), (512, 512));
}

#[tokio::test]
async fn ingest_namespaces_game_images_under_games() {
    let storage = MemoryStorage::default();
    let file = png_file(256, 256);

    ingest_image(
        &validator(),
        &ImageNormalizer::default(),
        &storage,
        ImageFolder::Games,
        &file,
    )
    .await
    .expect("ingest");

    assert!(storage.stored()[0].0.starts_with("games/"));
}

#[tokio::test]
async fn oversize_file_rejected_before_any_store_call() {
    let storage = MemoryStorage::default();
    let file = UploadedFile {
        filename: Some("huge.png".to_string()),
        content_type: "image/png".to_string(),
        data: Bytes::from(vec![0u8; MAX_SIZE + 1]),
    };

    let err = ingest_image(
        &validator(),
        &ImageNormalizer::default(),
        &storage,
        ImageFolder::Avatars,
        &file,
    )
    .await
    .unwrap_err();

    assert!(matches!(err.0, AppError::PayloadTooLarge(_)));
    assert!(storage.stored().is_empty());
}

#[tokio::test]
async fn wrong_content_type_rejected_before_any_store_call() {
    let storage = MemoryStorage::default();
    let file = UploadedFile {
        filename: Some("anim.gif".to_string()),
        content_type: "image/gif".to_string(),
        data: png_file(64, 64).data,
    };

    let err = ingest_image(
        &validator(),
        &ImageNormalizer::default(),
        &storage,
        ImageFolder::Avatars,
        &file,
    )
    .await
    .unwrap_err();

    assert!(matches!(err.0, AppError::Validation(_)));
    assert!(storage.stored().is_empty());
}

#[tokio::test]
async fn undecodable_bytes_rejected_before_any_store_call() {
    let storage = MemoryStorage::default();
    let file = UploadedFile {
        filename: Some("fake.png".to_string()),
        content_type: "image/png".to_string(),
        data: Bytes::from_static(b"not really a png"),
    };

    let err = ingest_image(
        &validator(),
        &ImageNormalizer::default(),
        &storage,
        ImageFolder::Avatars,
        &file,
    )
    .await
    .unwrap_err();

    assert!(matches!(err.0, AppError::ImageDecode(_)));
    assert!(storage.stored().is_empty());
}

#[tokio::test]
async fn remote_outage_surfaces_as_remote_store_error() {
    let storage = MemoryStorage::failing();
    let file = png_file(128, 128);

    let err = ingest_image(
        &validator(),
        &ImageNormalizer::default(),
        &storage,
        ImageFolder::Games,
        &file,
    )
    .await
    .unwrap_err();

    assert!(matches!(err.0, AppError::RemoteStore(_)));
}
