//! Cafe directory and menu storage.
//!
//! # Backends
//!
//! - [`PgCatalog`] - `PostgreSQL`, used in deployments
//! - [`MemoryCatalog`] - in-process, used by tests and when no database is
//!   configured
//!
//! Both implement [`CatalogStore`] with identical semantics: natural order is
//! insertion order, college search is a case-insensitive substring match, and
//! `MenuItem.cafe_id` is a weak reference resolved at read time.
//!
//! ## Tables
//!
//! - `cafe` - Cafe directory
//! - `menu_item` - Menu items (`cafe_id` carries no foreign key)
//!
//! # Migrations
//!
//! Migrations are stored in `crates/api/migrations/` and run via:
//! ```bash
//! cargo run -p cafeconnect-cli -- migrate
//! ```

pub mod memory;
pub mod postgres;
pub mod seed;

use std::time::Duration;

use async_trait::async_trait;
use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

use cafeconnect_core::{Cafe, MenuItem, MenuItemId, MenuItemWithCafe, NewCafe, NewMenuItem};

pub use memory::MemoryCatalog;
pub use postgres::PgCatalog;

/// Errors from catalog storage.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),
}

/// Storage for cafes and menu items.
#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// All cafes in natural order.
    async fn list_cafes(&self) -> Result<Vec<Cafe>, RepositoryError>;

    /// Cafes with a nearby college containing `college`, ignoring case.
    async fn search_cafes(&self, college: &str) -> Result<Vec<Cafe>, RepositoryError>;

    /// Store a cafe and return it with its assigned ID.
    async fn insert_cafe(&self, cafe: NewCafe) -> Result<Cafe, RepositoryError>;

    /// Delete every cafe and insert `cafes` in their place, atomically.
    ///
    /// Menu items referencing deleted cafes are left untouched.
    async fn replace_cafes(&self, cafes: Vec<NewCafe>) -> Result<Vec<Cafe>, RepositoryError>;

    /// All menu items with their owning cafe resolved.
    async fn list_menu(&self) -> Result<Vec<MenuItemWithCafe>, RepositoryError>;

    /// Menu items with the given IDs. Unknown IDs are skipped.
    async fn find_menu_items(&self, ids: &[MenuItemId])
    -> Result<Vec<MenuItem>, RepositoryError>;

    /// Store a menu item and return it with its assigned ID.
    async fn insert_menu_item(&self, item: NewMenuItem) -> Result<MenuItem, RepositoryError>;

    /// Check that the backend is reachable.
    async fn ping(&self) -> Result<(), RepositoryError>;
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Arguments
///
/// * `database_url` - `PostgreSQL` connection string (wrapped in `SecretString`)
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(1)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}

/// Run the embedded migrations against `pool`.
///
/// # Errors
///
/// Returns `sqlx::migrate::MigrateError` if a migration fails.
pub async fn migrate(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}
