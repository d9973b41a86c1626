//! Menu handlers.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
};
use tracing::instrument;

use cafeconnect_core::{MenuItem, MenuItemWithCafe, MenuSections, NewMenuItemRequest};

use crate::error::Result;
use crate::state::AppState;

/// List every menu item with its owning cafe resolved.
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> Result<Json<Vec<MenuItemWithCafe>>> {
    Ok(Json(state.catalog().list_menu().await?))
}

/// Menu grouped into storefront sections.
///
/// Items in categories outside the fixed sections are returned under
/// `unrecognized` and logged.
#[instrument(skip(state))]
pub async fn sections(State(state): State<AppState>) -> Result<Json<MenuSections>> {
    let items = state.catalog().list_menu().await?;
    let grouped = MenuSections::group(items.into_iter().map(|entry| entry.item));

    if !grouped.unrecognized.is_empty() {
        tracing::warn!(
            count = grouped.unrecognized.len(),
            categories = ?grouped.unrecognized_categories(),
            "Menu items outside storefront sections"
        );
    }

    Ok(Json(grouped))
}

/// Create a menu item.
#[instrument(skip(state, payload))]
pub async fn create(
    State(state): State<AppState>,
    payload: std::result::Result<Json<NewMenuItemRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<MenuItem>)> {
    let Json(request) = payload?;
    let item = state.catalog().insert_menu_item(request.validate()?).await?;
    tracing::info!(item_id = %item.id, category = %item.category, "Menu item created");
    Ok((StatusCode::CREATED, Json(item)))
}

#[cfg(test)]
mod tests {
    use axum::http::{Method, StatusCode};

    use crate::routes::test_support::{send, test_app};

    fn item_body(name: &str, category: &str) -> String {
        format!(
            r#"{{"name":"{name}","description":"House favourite","price":45.5,"category":"{category}"}}"#
        )
    }

    #[tokio::test]
    async fn test_create_and_list_menu() {
        let (app, _) = test_app();
        let (status, cafe) = send(
            &app,
            Method::POST,
            "/api/cafes",
            Some(r#"{"name":"Canteen One","address":"Block A","location":{"lat":19.0,"lng":72.8}}"#),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);

        let body = format!(
            r#"{{"name":"Samosa","description":"Crisp","price":15,"category":"Canteen","cafeId":{}}}"#,
            cafe["id"]
        );
        let (status, created) = send(&app, Method::POST, "/api/menu", Some(&body)).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created["price"], 15.0);

        let (status, menu) = send(&app, Method::GET, "/api/menu", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(menu[0]["name"], "Samosa");
        assert_eq!(menu[0]["cafe"]["name"], "Canteen One");
    }

    #[tokio::test]
    async fn test_create_missing_price() {
        let (app, _) = test_app();
        let (status, body) = send(
            &app,
            Method::POST,
            "/api/menu",
            Some(r#"{"name":"Tea","description":"Hot","category":"Canteen"}"#),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["fields"][0]["field"], "price");
    }

    #[tokio::test]
    async fn test_create_rejects_price_outside_column() {
        let (app, _) = test_app();
        for price in ["123456789", "45.555"] {
            let body = format!(
                r#"{{"name":"Tea","description":"Hot","price":{price},"category":"Canteen"}}"#
            );
            let (status, rejected) = send(&app, Method::POST, "/api/menu", Some(&body)).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "price {price}");
            assert_eq!(rejected["fields"][0]["field"], "price");
        }

        let (status, menu) = send(&app, Method::GET, "/api/menu", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(menu, serde_json::json!([]));
    }

    #[tokio::test]
    async fn test_sections_exclude_unknown_category() {
        let (app, _) = test_app();
        for (name, category) in [
            ("Special Thali", "FNF Special"),
            ("Idli Sambhar", "Canteen"),
            ("Mystery Box", "Unknown"),
        ] {
            let (status, _) = send(
                &app,
                Method::POST,
                "/api/menu",
                Some(&item_body(name, category)),
            )
            .await;
            assert_eq!(status, StatusCode::CREATED);
        }

        let (status, grouped) = send(&app, Method::GET, "/api/menu/sections", None).await;
        assert_eq!(status, StatusCode::OK);

        let sections = grouped["sections"].as_array().cloned().unwrap_or_default();
        let names: Vec<_> = sections.iter().map(|s| s["bucket"].clone()).collect();
        assert_eq!(names, vec!["FNF Special", "Canteen"]);
        assert!(
            sections
                .iter()
                .flat_map(|s| s["items"].as_array().cloned().unwrap_or_default())
                .all(|item| item["name"] != "Mystery Box")
        );
        assert_eq!(grouped["unrecognized"][0]["name"], "Mystery Box");
    }
}
