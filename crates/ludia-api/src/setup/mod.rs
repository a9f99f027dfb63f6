//! Application setup and initialization
//!
//! Startup is staged: validate config, connect the database and run
//! migrations, build the storage client, assemble state and routes. All
//! long-lived handles come out of here exactly once.

pub mod database;
pub mod routes;
pub mod server;
pub mod storage;

use crate::state::AppState;
use anyhow::{Context, Result};
use ludia_core::Config;
use std::sync::Arc;

/// Initialize the entire application
pub async fn initialize_app(config: Config) -> Result<(Arc<AppState>, axum::Router)> {
    config
        .validate()
        .context("Configuration validation failed")?;

    let pool = database::setup_database(&config).await?;
    let storage = storage::setup_storage(&config)?;

    let state = Arc::new(AppState::new(config.clone(), pool, storage));
    let router = routes::setup_routes(&config, state.clone())?;

    Ok((state, router))
}
