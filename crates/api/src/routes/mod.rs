//! HTTP route handlers for the API.
//!
//! # Route Structure
//!
//! ```text
//! GET    /                              - Service info
//! GET    /health                        - Liveness check
//! GET    /health/ready                  - Readiness check (pings the catalog)
//! GET    /api/client-config             - Browser-facing settings (map key)
//!
//! # Cafes
//! GET    /api/cafes                     - All cafes
//! GET    /api/cafes/search/{college}    - Cafes near a college (substring, any case)
//! POST   /api/cafes                     - Create a cafe
//!
//! # Menu
//! GET    /api/menu                      - All items with owning cafe
//! GET    /api/menu/sections             - Items grouped into storefront sections
//! POST   /api/menu                      - Create a menu item
//!
//! # Carts
//! POST   /api/carts                     - Start a cart
//! GET    /api/carts/{id}                - Cart contents and totals
//! DELETE /api/carts/{id}                - Discard a cart
//! POST   /api/carts/{id}/items/{item}   - Add one unit
//! DELETE /api/carts/{id}/items/{item}   - Remove one unit
//! ```

pub mod cafes;
pub mod carts;
pub mod home;
pub mod menu;

use axum::{
    Router, middleware as axum_middleware,
    routing::{get, post},
};

use crate::middleware;
use crate::state::AppState;

/// Create the cafe routes router.
pub fn cafe_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cafes::index).post(cafes::create))
        .route("/search/{college}", get(cafes::search))
}

/// Create the menu routes router.
pub fn menu_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(menu::index).post(menu::create))
        .route("/sections", get(menu::sections))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(carts::create))
        .route("/{id}", get(carts::show).delete(carts::discard))
        .route(
            "/{id}/items/{item_id}",
            post(carts::add_item).delete(carts::remove_item),
        )
}

/// Create all routes for the API.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home::index))
        .route("/health", get(home::health))
        .route("/health/ready", get(home::readiness))
        .route("/api/client-config", get(home::client_config))
        .nest("/api/cafes", cafe_routes())
        .nest("/api/menu", menu_routes())
        .nest("/api/carts", cart_routes())
}

/// Build the full application: routes, state, and the middleware stack.
///
/// Sentry layers are added by the binary, since they only matter when a DSN
/// is configured.
pub fn app(state: AppState) -> Router {
    routes()
        .with_state(state)
        .layer(axum_middleware::from_fn(middleware::request_id_middleware))
        .layer(middleware::trace_layer())
        .layer(middleware::cors_layer())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
pub(crate) mod test_support {
    //! Helpers for driving the router in tests.

    use std::sync::Arc;

    use axum::{
        Router,
        body::{Body, to_bytes},
        http::{Method, Request, StatusCode, header},
    };
    use serde_json::Value;
    use tower::ServiceExt;

    use crate::config::ApiConfig;
    use crate::db::{CatalogStore, MemoryCatalog};
    use crate::state::AppState;

    /// Router over a fresh in-memory catalog.
    pub fn test_app() -> (Router, Arc<MemoryCatalog>) {
        let catalog = Arc::new(MemoryCatalog::new());
        let store: Arc<dyn CatalogStore> = catalog.clone();
        let state = AppState::new(ApiConfig::default(), store);
        (super::app(state), catalog)
    }

    /// Send a request and decode the JSON response (`Value::Null` if empty).
    pub async fn send(
        app: &Router,
        method: Method,
        uri: &str,
        body: Option<&str>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if body.is_some() {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
        }
        let request = builder
            .body(body.map_or_else(Body::empty, |b| Body::from(b.to_string())))
            .unwrap();

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or_else(|_| {
                Value::String(String::from_utf8_lossy(&bytes).into_owned())
            })
        };
        (status, value)
    }
}
