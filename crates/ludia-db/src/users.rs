//! User repository: registration, credential lookup, and merge-update.

use ludia_core::models::{NewUser, User, UserPatch};
use ludia_core::AppError;
use sqlx::{PgPool, Postgres};

use crate::{pg_error_code, PG_UNIQUE_VIOLATION};

/// Merged field set for a user update: patch values overlay the stored row,
/// empty or absent patch fields fall back to the stored value (truthy
/// fallback for both `username` and `imagepro`).
fn merge_user(existing: &User, patch: &UserPatch) -> (String, Option<String>) {
    let username = patch
        .username
        .clone()
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| existing.username.clone());
    let imagepro = patch
        .imagepro
        .clone()
        .filter(|s| !s.is_empty())
        .or_else(|| existing.imagepro.clone());
    (username, imagepro)
}

#[derive(Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a new user. Unique violations on email or username surface as
    /// `AppError::Duplicate` with a message naming the conflicting field.
    #[tracing::instrument(skip(self, user), fields(db.table = "users", db.operation = "insert"))]
    pub async fn create(&self, user: NewUser) -> Result<User, AppError> {
        let row = sqlx::query_as::<Postgres, User>(
            r#"
            INSERT INTO users (username, email, password, imagepro)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(&user.username)
        .bind(&user.email)
        .bind(&user.password)
        .bind(&user.imagepro)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match pg_error_code(&e).as_deref() {
            Some(PG_UNIQUE_VIOLATION) => {
                let constraint = match &e {
                    sqlx::Error::Database(db_err) => db_err.constraint().map(str::to_owned),
                    _ => None,
                };
                if constraint.as_deref() == Some("users_username_key") {
                    AppError::Duplicate("Username already exists".to_string())
                } else {
                    AppError::Duplicate("Email already exists".to_string())
                }
            }
            _ => AppError::from(e),
        })?;

        Ok(row)
    }

    pub async fn get(&self, id: i64) -> Result<Option<User>, AppError> {
        let row = sqlx::query_as::<Postgres, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    pub async fn find_by_username(&self, username: &str) -> Result<Option<User>, AppError> {
        let row = sqlx::query_as::<Postgres, User>("SELECT * FROM users WHERE username = $1")
            .bind(username)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    /// Merge-update: fetch the row, overlay the patch, write all merged
    /// fields in one UPDATE. Zero rows affected after a successful fetch
    /// means the row was deleted in between; both cases are `NotFound`.
    /// The fetch-merge-write sequence is not locked; last writer wins.
    #[tracing::instrument(skip(self, patch), fields(db.table = "users", db.operation = "update"))]
    pub async fn merge_update(&self, id: i64, patch: UserPatch) -> Result<User, AppError> {
        let existing = self
            .get(id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        let (username, imagepro) = merge_user(&existing, &patch);

        let row = sqlx::query_as::<Postgres, User>(
            r#"
            UPDATE users
            SET username = $2, imagepro = $3
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&username)
        .bind(&imagepro)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        Ok(row)
    }
}
