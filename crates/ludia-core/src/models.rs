//! Domain models and API payload types.
//!
//! Row structs derive `sqlx::FromRow` and are internal; the `*Response`
//! structs define the wire shapes. Field names `uid`, `imagepro`, `game_id`
//! and `image_url` are part of the public API contract and must not change.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::FromRow;

/// A registered user. `password` is stored in cleartext (pre-existing
/// product decision, see DESIGN.md) and is never serialized.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub password: String,
    /// Profile image URL; null until an avatar is uploaded.
    pub imagepro: Option<String>,
    pub role: String,
    pub created_at: DateTime<Utc>,
}

/// Fields for user creation.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub username: String,
    pub password: String,
    pub imagepro: Option<String>,
}

/// Patch for user merge-update. `None` or empty string falls back to the
/// stored value (truthy fallback).
#[derive(Debug, Clone, Default)]
pub struct UserPatch {
    pub username: Option<String>,
    pub imagepro: Option<String>,
}

/// User payload returned by login and update routes; excludes the password.
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub uid: i64,
    pub username: String,
    pub email: String,
    pub imagepro: Option<String>,
    pub role: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        UserResponse {
            uid: user.id,
            username: user.username,
            email: user.email,
            imagepro: user.imagepro,
            role: user.role,
        }
    }
}

/// Registration response: the new id and resulting avatar URL (or null).
#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub uid: i64,
    pub imagepro: Option<String>,
}

/// A game in the catalog. `image_url` is always a URL previously returned
/// by the remote image store for the `games` folder.
#[derive(Debug, Clone, FromRow)]
pub struct Game {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub category_id: i64,
    pub image_url: String,
    pub created_at: DateTime<Utc>,
}

/// Game row joined with its category name, for list/get routes.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct GameWithCategory {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub category_id: i64,
    pub image_url: String,
    pub category_name: String,
}

/// Fields for game creation.
#[derive(Debug, Clone)]
pub struct NewGame {
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub category_id: i64,
    pub image_url: String,
}

/// Patch for game merge-update.
///
/// `name`, `price`, `category_id` and `image_url` use truthy fallback
/// (empty string or zero keeps the stored value); `description` uses
/// null-coalescing fallback (an explicit empty string is accepted).
/// The asymmetry is deliberate; existing clients depend on it.
#[derive(Debug, Clone, Default)]
pub struct GamePatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<Decimal>,
    pub category_id: Option<i64>,
    pub image_url: Option<String>,
}

/// Game payload returned by the update route.
#[derive(Debug, Clone, Serialize)]
pub struct GameResponse {
    pub game_id: i64,
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub category_id: i64,
    pub image_url: String,
}

impl From<Game> for GameResponse {
    fn from(game: Game) -> Self {
        GameResponse {
            game_id: game.id,
            name: game.name,
            description: game.description,
            price: game.price,
            category_id: game.category_id,
            image_url: game.image_url,
        }
    }
}

/// Creation response for POST /games.
#[derive(Debug, Serialize)]
pub struct GameCreatedResponse {
    pub game_id: i64,
    pub image_url: String,
}
