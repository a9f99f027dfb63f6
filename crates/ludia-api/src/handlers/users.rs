//! User profile update.

use std::sync::Arc;

use axum::{
    extract::{Multipart, State},
    response::IntoResponse,
    Json,
};
use ludia_core::models::{UserPatch, UserResponse};
use ludia_storage::ImageFolder;

use crate::error::HttpAppError;
use crate::services::ingest::ingest_image;
use crate::state::AppState;
use crate::utils::upload::MultipartForm;

/// POST /users/update
///
/// Multipart: `uid` (required), optional `username`, optional `avatar` file.
/// A new avatar is ingested first; only the returned URL enters the
/// merge-update, so the stored `imagepro` is always a remote-store URL.
/// The previous avatar object is left behind at the store (documented).
#[tracing::instrument(skip(state, multipart), fields(operation = "update_user"))]
pub async fn update_user(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Result<impl IntoResponse, HttpAppError> {
    let form = MultipartForm::collect(multipart, "avatar").await?;

    let uid = form.require_i64("uid")?;

    let imagepro = match form.file {
        Some(ref file) => Some(
            ingest_image(
                &state.upload_validator(),
                &state.normalizer,
                state.storage.as_ref(),
                ImageFolder::Avatars,
                file,
            )
            .await?,
        ),
        None => None,
    };

    let patch = UserPatch {
        username: form.text("username").map(str::to_string),
        imagepro,
    };

    let user = state.users.merge_update(uid, patch).await?;

    tracing::info!(uid = user.id, "User updated");
    Ok(Json(UserResponse::from(user)))
}
