//! # SQLite Database methods
//!
//! This module contains "low-level" SQLite database interactions.
//!
//! All these interaction are maintained by simple functions (rather than stateful structs) that accept a
//! `&mut SqliteConnection` argument. Callers can obtain a connection from a pool,
//! or create an atomic transaction as the need arises and call through to the functions without any other changes.
use std::path::Path;

use log::info;
use sqlx::{migrate::MigrateDatabase, sqlite::SqlitePoolOptions, Error as SqlxError, Sqlite, SqlitePool};

pub mod payments;

pub async fn new_pool(url: &str, max_connections: u32) -> Result<SqlitePool, SqlxError> {
    let pool = SqlitePoolOptions::new().max_connections(max_connections).connect(url).await?;
    Ok(pool)
}

/// Creates the SQLite database file at `url`, and its parent directory, if it does not exist yet. Returns `true` if a
/// new database was created.
pub async fn create_database_if_missing(url: &str) -> Result<bool, SqlxError> {
    if Sqlite::database_exists(url).await? {
        return Ok(false);
    }
    let path = url.trim_start_matches("sqlite://").trim_start_matches("sqlite:");
    if let Some(parent) = Path::new(path).parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    Sqlite::create_database(url).await?;
    info!("🗃️ Created new database at {url}");
    Ok(true)
}
