//! Game catalog routes: list, get, create, merge-update, delete.

use std::str::FromStr;
use std::sync::Arc;

use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use ludia_core::models::{GameCreatedResponse, GamePatch, GameResponse, NewGame};
use ludia_core::AppError;
use ludia_storage::ImageFolder;
use rust_decimal::Decimal;
use serde_json::json;

use crate::error::HttpAppError;
use crate::services::ingest::ingest_image;
use crate::state::AppState;
use crate::utils::upload::MultipartForm;

fn parse_price(raw: &str) -> Result<Decimal, HttpAppError> {
    Decimal::from_str(raw).map_err(|_| {
        HttpAppError(AppError::Validation(format!("Invalid price: {}", raw)))
    })
}

/// GET /games
pub async fn list_games(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpAppError> {
    let games = state.games.list().await?;
    Ok(Json(games))
}

/// GET /games/{id}
pub async fn get_game(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, HttpAppError> {
    let game = state
        .games
        .get_with_category(id)
        .await?
        .ok_or_else(|| HttpAppError(AppError::NotFound("Game not found".to_string())))?;
    Ok(Json(game))
}

/// POST /games
///
/// Multipart: `name`, `price`, `category_id`, required `image` file,
/// optional `description`. The image is validated and ingested before the
/// insert; any pipeline failure leaves the database untouched.
#[tracing::instrument(skip(state, multipart), fields(operation = "create_game"))]
pub async fn create_game(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Result<impl IntoResponse, HttpAppError> {
    let form = MultipartForm::collect(multipart, "image").await?;

    let name = form.require_text("name")?.to_string();
    let price = parse_price(form.require_text("price")?)?;
    let category_id = form.require_i64("category_id")?;
    let description = form.text("description").map(str::to_string);

    let file = form.file.as_ref().ok_or_else(|| {
        HttpAppError(AppError::Validation("Image file is required".to_string()))
    })?;

    let image_url = ingest_image(
        &state.upload_validator(),
        &state.normalizer,
        state.storage.as_ref(),
        ImageFolder::Games,
        file,
    )
    .await?;

    let game = state
        .games
        .create(NewGame {
            name,
            description,
            price,
            category_id,
            image_url,
        })
        .await?;

    tracing::info!(game_id = game.id, "Game created");
    Ok((
        StatusCode::CREATED,
        Json(GameCreatedResponse {
            game_id: game.id,
            image_url: game.image_url,
        }),
    ))
}

/// POST /games/update
///
/// Multipart: `game_id` (required), optional `name` / `description` /
/// `price` / `category_id` / `image` file. Fallback rules live in the
/// repository merge; here an empty truthy field is simply treated as
/// absent so it never fails parsing.
#[tracing::instrument(skip(state, multipart), fields(operation = "update_game"))]
pub async fn update_game(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Result<impl IntoResponse, HttpAppError> {
    let form = MultipartForm::collect(multipart, "image").await?;

    let game_id = form.require_i64("game_id")?;

    let price = form
        .non_empty_text("price")
        .map(parse_price)
        .transpose()?;
    let category_id = form
        .non_empty_text("category_id")
        .map(|raw| {
            raw.parse::<i64>().map_err(|_| {
                HttpAppError(AppError::Validation(format!(
                    "Invalid value for field category_id: {}",
                    raw
                )))
            })
        })
        .transpose()?;

    let image_url = match form.file {
        Some(ref file) => Some(
            ingest_image(
                &state.upload_validator(),
                &state.normalizer,
                state.storage.as_ref(),
                ImageFolder::Games,
                file,
            )
            .await?,
        ),
        None => None,
    };

    let patch = GamePatch {
        name: form.text("name").map(str::to_string),
        // Present-but-empty is a real update for description (null-coalescing
        // fallback), so the raw presence of the part is what matters.
        description: form.text("description").map(str::to_string),
        price,
        category_id,
        image_url,
    };

    let game = state.games.merge_update(game_id, patch).await?;

    tracing::info!(game_id = game.id, "Game updated");
    Ok(Json(GameResponse::from(game)))
}

/// DELETE /games/{id}
#[tracing::instrument(skip(state), fields(operation = "delete_game"))]
pub async fn delete_game(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, HttpAppError> {
    state.games.delete(id).await?;
    tracing::info!(game_id = id, "Game deleted");
    Ok(Json(json!({ "message": "Game deleted" })))
}
