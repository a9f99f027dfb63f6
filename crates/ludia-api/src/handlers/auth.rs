//! Registration and login.

use std::sync::Arc;

use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use ludia_core::models::{NewUser, RegisterResponse, UserResponse};
use ludia_core::AppError;
use ludia_storage::ImageFolder;
use serde::Deserialize;

use crate::error::HttpAppError;
use crate::services::ingest::ingest_image;
use crate::state::AppState;
use crate::utils::upload::MultipartForm;

/// POST /register/user
///
/// Multipart: `email`, `username`, `password`, optional `avatar` file.
/// If an avatar is attached it goes through the full ingest pipeline before
/// the insert, so a rejected or undecodable file never creates a user row.
#[tracing::instrument(skip(state, multipart), fields(operation = "register_user"))]
pub async fn register_user(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Result<impl IntoResponse, HttpAppError> {
    let form = MultipartForm::collect(multipart, "avatar").await?;

    let email = form.require_text("email")?.to_string();
    let username = form.require_text("username")?.to_string();
    let password = form.require_text("password")?.to_string();

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

    let user = state
        .users
        .create(NewUser {
            email,
            username,
            password,
            imagepro,
        })
        .await?;

    tracing::info!(uid = user.id, "User registered");
    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            uid: user.id,
            imagepro: user.imagepro,
        }),
    ))
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// POST /login
///
/// Compares the stored cleartext password (pre-existing product decision,
/// see DESIGN.md). Unknown user and wrong password get the same response.
#[tracing::instrument(skip(state, body), fields(operation = "login"))]
pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(body): Json<LoginRequest>,
) -> Result<impl IntoResponse, HttpAppError> {
    if body.username.is_empty() || body.password.is_empty() {
        return Err(HttpAppError(AppError::Validation(
            "Username and password are required".to_string(),
        )));
    }

    let user = state
        .users
        .find_by_username(&body.username)
        .await?
        .filter(|user| user.password == body.password)
        .ok_or_else(|| {
            HttpAppError(AppError::Unauthorized(
                "Invalid username or password".to_string(),
            ))
        })?;

    tracing::debug!(uid = user.id, "Login succeeded");
    Ok(Json(UserResponse::from(user)))
}
