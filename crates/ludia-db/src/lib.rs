//! Database layer
//!
//! Repository implementations over a shared `sqlx::PgPool`. The merge-update
//! operations fetch the current row, overlay the patch with the documented
//! fallback rules, and write the full merged field set back in a single
//! UPDATE keyed by id.

pub mod games;
pub mod users;

pub use games::GameRepository;
pub use users::UserRepository;

/// Postgres error code for unique constraint violations.
pub(crate) const PG_UNIQUE_VIOLATION: &str = "23505";

/// Postgres error code for foreign key violations.
pub(crate) const PG_FOREIGN_KEY_VIOLATION: &str = "23503";

/// Extract the SQLSTATE code from a sqlx error, if it is a database error.
pub(crate) fn pg_error_code(err: &sqlx::Error) -> Option<String> {
    match err {
        sqlx::Error::Database(db_err) => db_err.code().map(|c| c.into_owned()),
        _ => None,
    }
}
