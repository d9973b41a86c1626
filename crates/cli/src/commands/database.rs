//! Database commands.
//!
//! # Usage
//!
//! ```bash
//! cc-cli migrate
//! cc-cli seed
//! ```
//!
//! # Environment Variables
//!
//! - `CAFECONNECT_DATABASE_URL` (or `DATABASE_URL`, `MONGODB_URI`) -
//!   `PostgreSQL` connection string
//!
//! # Migration Files
//!
//! Migrations live in `crates/api/migrations/` and are embedded in the API
//! crate at build time.

use cafeconnect_api::config::{ApiConfig, ConfigError};
use cafeconnect_api::db::{self, CatalogStore, PgCatalog, RepositoryError, seed::sample_cafes};
use thiserror::Error;

/// Errors that can occur during database commands.
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// No database URL is configured.
    #[error("Missing environment variable: CAFECONNECT_DATABASE_URL (or DATABASE_URL)")]
    MissingDatabaseUrl,

    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Database connection error.
    #[error("Database connection error: {0}")]
    Database(#[from] sqlx::Error),

    /// A migration failed.
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// A catalog write failed.
    #[error("Catalog error: {0}")]
    Catalog(#[from] RepositoryError),
}

async fn connect() -> Result<sqlx::PgPool, DatabaseError> {
    let config = ApiConfig::from_env()?;
    let url = config
        .database_url
        .as_ref()
        .ok_or(DatabaseError::MissingDatabaseUrl)?;

    tracing::info!("Connecting to database...");
    Ok(db::create_pool(url).await?)
}

/// Run all pending migrations.
///
/// # Errors
///
/// Returns `DatabaseError` if the database is unreachable or a migration fails.
pub async fn migrate() -> Result<(), DatabaseError> {
    let pool = connect().await?;

    tracing::info!("Running migrations...");
    db::migrate(&pool).await?;

    tracing::info!("Migrations complete!");
    Ok(())
}

/// Replace every cafe with the sample data set.
///
/// Menu items are left untouched; their cafe references may dangle
/// afterwards.
///
/// # Returns
///
/// The number of cafes inserted.
///
/// # Errors
///
/// Returns `DatabaseError` if the database is unreachable or the write fails.
pub async fn seed() -> Result<usize, DatabaseError> {
    let catalog = PgCatalog::new(connect().await?);

    let cafes = catalog.replace_cafes(sample_cafes()).await?;
    for cafe in &cafes {
        tracing::info!(id = %cafe.id, name = %cafe.name, "Seeded cafe");
    }

    tracing::info!(count = cafes.len(), "Sample data inserted");
    Ok(cafes.len())
}
