//! Server-side cart handlers.
//!
//! Every response that carries a cart returns a [`CartView`] priced against
//! the current catalog.

use axum::{
    Json,
    extract::{Path, State, rejection::PathRejection},
    http::StatusCode,
};
use tracing::instrument;

use cafeconnect_core::{Cart, CartId, CartView, MenuItemId};

use crate::error::{AppError, Result};
use crate::state::AppState;

type CartPath = std::result::Result<Path<CartId>, PathRejection>;
type CartItemPath = std::result::Result<Path<(CartId, MenuItemId)>, PathRejection>;

async fn priced(state: &AppState, id: CartId, cart: &Cart) -> Result<CartView> {
    let ids: Vec<MenuItemId> = cart.lines().iter().map(|line| line.item_id).collect();
    let items = state.catalog().find_menu_items(&ids).await?;
    Ok(cart.view(id, &items))
}

fn cart_not_found(id: CartId) -> AppError {
    AppError::NotFound(format!("cart {id}"))
}

/// Start an empty cart.
#[instrument(skip(state))]
pub async fn create(State(state): State<AppState>) -> (StatusCode, Json<CartView>) {
    let id = state.carts().create().await;
    tracing::debug!(cart_id = %id, "Cart created");
    (StatusCode::CREATED, Json(Cart::new().view(id, &[])))
}

/// Current contents of a cart.
#[instrument(skip(state, path))]
pub async fn show(State(state): State<AppState>, path: CartPath) -> Result<Json<CartView>> {
    let Path(id) = path?;
    let cart = state
        .carts()
        .snapshot(id)
        .await
        .ok_or_else(|| cart_not_found(id))?;
    Ok(Json(priced(&state, id, &cart).await?))
}

/// Add one unit of a catalog item.
#[instrument(skip(state, path))]
pub async fn add_item(
    State(state): State<AppState>,
    path: CartItemPath,
) -> Result<Json<CartView>> {
    let Path((id, item_id)) = path?;

    if state.catalog().find_menu_items(&[item_id]).await?.is_empty() {
        return Err(AppError::NotFound(format!("menu item {item_id}")));
    }

    let (quantity, cart) = state
        .carts()
        .update(id, |cart| cart.add_item(item_id))
        .await
        .ok_or_else(|| cart_not_found(id))?;
    tracing::debug!(cart_id = %id, item_id = %item_id, quantity, "Item added");

    Ok(Json(priced(&state, id, &cart).await?))
}

/// Remove one unit. Removing an item the cart does not hold changes nothing.
#[instrument(skip(state, path))]
pub async fn remove_item(
    State(state): State<AppState>,
    path: CartItemPath,
) -> Result<Json<CartView>> {
    let Path((id, item_id)) = path?;
    let (quantity, cart) = state
        .carts()
        .update(id, |cart| cart.remove_item(item_id))
        .await
        .ok_or_else(|| cart_not_found(id))?;
    tracing::debug!(cart_id = %id, item_id = %item_id, quantity, "Item removed");

    Ok(Json(priced(&state, id, &cart).await?))
}

/// Discard a cart.
#[instrument(skip(state, path))]
pub async fn discard(State(state): State<AppState>, path: CartPath) -> Result<StatusCode> {
    let Path(id) = path?;
    if state.carts().discard(id).await {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(cart_not_found(id))
    }
}

#[cfg(test)]
mod tests {
    use axum::http::{Method, StatusCode};
    use rust_decimal::Decimal;

    use cafeconnect_core::NewMenuItem;

    use crate::db::CatalogStore;
    use crate::routes::test_support::{send, test_app};

    async fn new_cart(app: &axum::Router) -> String {
        let (status, body) = send(app, Method::POST, "/api/carts", None).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["totalCount"], 0);
        body["id"].as_str().map(str::to_string).unwrap_or_default()
    }

    #[tokio::test]
    async fn test_add_and_remove_units() {
        let (app, catalog) = test_app();
        let item = catalog
            .insert_menu_item(NewMenuItem {
                name: "Cold Coffee".to_string(),
                description: "Iced".to_string(),
                price: Decimal::new(6050, 2),
                category: "Cafeteria".to_string(),
                image: None,
                cafe_id: None,
            })
            .await
            .ok()
            .map(|item| item.id.as_i32())
            .unwrap_or_default();

        let cart = new_cart(&app).await;
        let path = format!("/api/carts/{cart}/items/{item}");

        send(&app, Method::POST, &path, None).await;
        let (status, body) = send(&app, Method::POST, &path, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["totalCount"], 2);
        assert_eq!(body["subtotal"], 121.0);
        assert_eq!(body["lines"][0]["name"], "Cold Coffee");

        let (_, body) = send(&app, Method::DELETE, &path, None).await;
        assert_eq!(body["lines"][0]["quantity"], 1);
        let (_, body) = send(&app, Method::DELETE, &path, None).await;
        assert_eq!(body["lines"].as_array().map(Vec::len), Some(0));

        // Removing again stays at zero.
        let (status, body) = send(&app, Method::DELETE, &path, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["totalCount"], 0);
    }

    #[tokio::test]
    async fn test_add_unknown_item_is_not_found() {
        let (app, _) = test_app();
        let cart = new_cart(&app).await;
        let (status, _) = send(
            &app,
            Method::POST,
            &format!("/api/carts/{cart}/items/999"),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (_, body) = send(&app, Method::GET, &format!("/api/carts/{cart}"), None).await;
        assert_eq!(body["totalCount"], 0);
    }

    #[tokio::test]
    async fn test_unknown_and_malformed_cart_ids() {
        let (app, _) = test_app();
        let (status, _) = send(
            &app,
            Method::GET,
            "/api/carts/6f1c2a4e-0d4b-4a53-9a43-1b1a1e8f0c11",
            None,
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, body) = send(&app, Method::GET, "/api/carts/not-a-uuid", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn test_discard() {
        let (app, _) = test_app();
        let cart = new_cart(&app).await;
        let path = format!("/api/carts/{cart}");

        let (status, _) = send(&app, Method::DELETE, &path, None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        let (status, _) = send(&app, Method::GET, &path, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        let (status, _) = send(&app, Method::DELETE, &path, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
