//! Integration tests for CafeConnect.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p cafeconnect-integration-tests
//! ```
//!
//! No database is needed: [`TestServer`] serves the real router over the
//! in-memory catalog on an ephemeral port.
//!
//! # Test Categories
//!
//! - `cafes` - Directory listing, search, and creation
//! - `menu_and_carts` - Menu, sections, and server-side carts
//! - `views` - Search and menu view state over a live server

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::net::SocketAddr;
use std::sync::Arc;

use cafeconnect_api::config::ApiConfig;
use cafeconnect_api::db::{CatalogStore, MemoryCatalog, seed::sample_cafes};
use cafeconnect_api::routes;
use cafeconnect_api::state::AppState;
use cafeconnect_client::{ApiClient, ClientError};
use tokio::task::JoinHandle;

/// A running API server backed by a fresh in-memory catalog.
pub struct TestServer {
    pub addr: SocketAddr,
    pub client: ApiClient,
    pub catalog: Arc<MemoryCatalog>,
    handle: JoinHandle<()>,
}

impl TestServer {
    /// Start a server with an empty catalog.
    ///
    /// # Errors
    ///
    /// Returns an error if the listener cannot be bound.
    pub async fn start() -> Result<Self, Box<dyn std::error::Error>> {
        let catalog = Arc::new(MemoryCatalog::new());
        let store: Arc<dyn CatalogStore> = catalog.clone();
        let state = AppState::new(ApiConfig::default(), store);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let app = routes::app(state);

        let handle = tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, app).await {
                tracing::error!(error = %e, "Test server stopped");
            }
        });

        let client = ApiClient::new(&format!("http://{addr}"))?;
        Ok(Self {
            addr,
            client,
            catalog,
            handle,
        })
    }

    /// Start a server whose catalog holds the five sample cafes.
    ///
    /// # Errors
    ///
    /// Returns an error if the listener cannot be bound.
    pub async fn seeded() -> Result<Self, Box<dyn std::error::Error>> {
        let server = Self::start().await?;
        server.catalog.replace_cafes(sample_cafes()).await?;
        Ok(server)
    }

    /// Base URL of the server.
    #[must_use]
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// HTTP status carried by a client error, if any.
#[must_use]
pub fn status_of(err: &ClientError) -> Option<u16> {
    err.status().map(|s| s.as_u16())
}
