//! Application state.
//!
//! Long-lived handles (repositories, storage client, normalizer) are
//! built once during startup and shared across requests via `Arc<AppState>`;
//! nothing in here is re-created per request.

use ludia_core::Config;
use ludia_db::{GameRepository, UserRepository};
use ludia_processing::{ImageNormalizer, UploadValidator};
use ludia_storage::Storage;
use sqlx::PgPool;
use std::sync::Arc;

pub struct AppState {
    pub users: UserRepository,
    pub games: GameRepository,
    pub storage: Arc<dyn Storage>,
    pub normalizer: ImageNormalizer,
    pub config: Config,
}

impl AppState {
    pub fn new(config: Config, pool: PgPool, storage: Arc<dyn Storage>) -> Self {
        Self {
            users: UserRepository::new(pool.clone()),
            games: GameRepository::new(pool),
            storage,
            normalizer: ImageNormalizer::default(),
            config,
        }
    }

    /// Validator for the configured upload constraints.
    pub fn upload_validator(&self) -> UploadValidator {
        UploadValidator::new(
            self.config.max_upload_size_bytes,
            self.config.allowed_content_types.clone(),
        )
    }
}
