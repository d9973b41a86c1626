//! Menu sources and menu screen state.
//!
//! A [`MenuSource`] yields the flat list of menu items: either the API
//! ([`ApiClient`]) or a JSON export of the menu collection on disk
//! ([`JsonFileMenuSource`]). [`MenuView`] groups the items into storefront
//! sections and owns the session's [`Cart`].

use std::future::Future;
use std::path::PathBuf;

use rust_decimal::Decimal;

use cafeconnect_core::{Cart, MenuItem, MenuItemId, MenuSections};

use crate::api::ApiClient;
use crate::error::ClientError;
use crate::sequence::{RequestSequence, Ticket};

/// Where menu items come from.
pub trait MenuSource {
    /// Every menu item, in the source's natural order.
    fn load_menu(&self) -> impl Future<Output = Result<Vec<MenuItem>, ClientError>> + Send;
}

impl MenuSource for ApiClient {
    async fn load_menu(&self) -> Result<Vec<MenuItem>, ClientError> {
        let menu = self.list_menu().await?;
        Ok(menu.into_iter().map(|entry| entry.item).collect())
    }
}

/// Menu items read from a JSON array on disk.
///
/// The file holds menu item objects as served by `GET /api/menu`; extra
/// fields such as the populated `cafe` are ignored.
#[derive(Debug, Clone)]
pub struct JsonFileMenuSource {
    path: PathBuf,
}

impl JsonFileMenuSource {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl MenuSource for JsonFileMenuSource {
    async fn load_menu(&self) -> Result<Vec<MenuItem>, ClientError> {
        let bytes = tokio::fs::read(&self.path).await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

/// State of the menu screen.
#[derive(Debug, Default)]
pub struct MenuView {
    items: Vec<MenuItem>,
    sections: MenuSections,
    cart: Cart,
    loading: bool,
    sequence: RequestSequence,
}

impl MenuView {
    /// Empty menu with an empty cart.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty menu continuing an existing session cart.
    #[must_use]
    pub fn with_cart(cart: Cart) -> Self {
        Self {
            cart,
            ..Self::default()
        }
    }

    /// Items from the last applied load, ungrouped.
    #[must_use]
    pub fn items(&self) -> &[MenuItem] {
        &self.items
    }

    #[must_use]
    pub const fn sections(&self) -> &MenuSections {
        &self.sections
    }

    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    #[must_use]
    pub const fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Give up the view and keep its cart.
    #[must_use]
    pub fn into_cart(self) -> Cart {
        self.cart
    }

    /// Start a load.
    pub fn begin_load(&mut self) -> Ticket {
        self.loading = true;
        self.sequence.issue()
    }

    /// Apply the outcome of the load started with `ticket`.
    ///
    /// Returns `false` and changes nothing if a newer load has started since.
    /// A failed load is logged and shows an empty menu. The cart is kept
    /// either way.
    pub fn finish_load(
        &mut self,
        ticket: Ticket,
        outcome: Result<Vec<MenuItem>, ClientError>,
    ) -> bool {
        if !self.sequence.is_latest(ticket) {
            tracing::debug!(?ticket, "Discarding stale menu response");
            return false;
        }

        self.items = outcome.unwrap_or_else(|error| {
            tracing::warn!(%error, "Menu load failed");
            Vec::new()
        });
        self.sections = MenuSections::group(self.items.iter().cloned());
        if !self.sections.unrecognized.is_empty() {
            tracing::warn!(
                categories = ?self.sections.unrecognized_categories(),
                "Menu items outside storefront sections"
            );
        }
        self.loading = false;
        true
    }

    /// Load from `source` and apply the outcome.
    pub async fn load<S: MenuSource>(&mut self, source: &S) -> bool {
        let ticket = self.begin_load();
        let outcome = source.load_menu().await;
        self.finish_load(ticket, outcome)
    }

    /// Add one unit; returns the new quantity.
    pub fn add_item(&mut self, id: MenuItemId) -> u32 {
        self.cart.add_item(id)
    }

    /// Remove one unit; returns the remaining quantity.
    pub fn remove_item(&mut self, id: MenuItemId) -> u32 {
        self.cart.remove_item(id)
    }

    #[must_use]
    pub fn quantity(&self, id: MenuItemId) -> u32 {
        self.cart.quantity(id)
    }

    /// Number shown on the cart badge.
    #[must_use]
    pub fn badge_count(&self) -> u64 {
        self.cart.total_count()
    }

    /// Cart subtotal at the loaded menu's prices.
    #[must_use]
    pub fn subtotal(&self) -> Decimal {
        self.cart.subtotal(&self.items)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::io::Write;

    use cafeconnect_core::CategoryBucket;

    use super::*;

    fn item(id: i32, category: &str, price: i64) -> MenuItem {
        MenuItem {
            id: MenuItemId::new(id),
            name: format!("item-{id}"),
            description: "fresh".to_string(),
            price: Decimal::new(price, 0),
            category: category.to_string(),
            image: None,
            cafe_id: None,
        }
    }

    struct FixedMenu(Vec<MenuItem>);

    impl MenuSource for FixedMenu {
        async fn load_menu(&self) -> Result<Vec<MenuItem>, ClientError> {
            Ok(self.0.clone())
        }
    }

    #[tokio::test]
    async fn test_load_groups_sections() {
        let source = FixedMenu(vec![
            item(1, "FNF Special", 120),
            item(2, "Canteen", 30),
            item(3, "Unknown", 10),
        ]);
        let mut view = MenuView::new();
        assert!(view.load(&source).await);

        let buckets: Vec<_> = view.sections().sections.iter().map(|s| s.bucket).collect();
        assert_eq!(
            buckets,
            vec![CategoryBucket::FnfSpecial, CategoryBucket::Canteen]
        );
        assert_eq!(view.sections().unrecognized.len(), 1);
        assert_eq!(view.items().len(), 3);
        assert!(!view.is_loading());
    }

    #[test]
    fn test_cart_badge_and_subtotal() {
        let mut view = MenuView::new();
        let ticket = view.begin_load();
        view.finish_load(ticket, Ok(vec![item(1, "Canteen", 30), item(2, "Cafeteria", 50)]));

        view.add_item(MenuItemId::new(1));
        view.add_item(MenuItemId::new(1));
        view.add_item(MenuItemId::new(2));
        assert_eq!(view.remove_item(MenuItemId::new(2)), 0);
        assert_eq!(view.remove_item(MenuItemId::new(2)), 0);

        assert_eq!(view.quantity(MenuItemId::new(1)), 2);
        assert_eq!(view.badge_count(), 2);
        assert_eq!(view.subtotal(), Decimal::new(60, 0));
    }

    #[test]
    fn test_stale_load_is_discarded_and_cart_survives_failure() {
        let mut view = MenuView::with_cart({
            let mut cart = Cart::new();
            cart.add_item(MenuItemId::new(9));
            cart
        });

        let first = view.begin_load();
        let second = view.begin_load();
        assert!(view.finish_load(
            second,
            Err(ClientError::InvalidBaseUrl("offline".to_string()))
        ));
        assert!(!view.finish_load(first, Ok(vec![item(1, "Canteen", 30)])));

        assert!(view.items().is_empty());
        assert!(view.sections().sections.is_empty());
        assert_eq!(view.badge_count(), 1);
    }

    #[tokio::test]
    async fn test_json_file_source() {
        let path = std::env::temp_dir().join(format!(
            "cafeconnect-menu-{}.json",
            std::process::id()
        ));
        let mut file = std::fs::File::create(&path).unwrap();
        write!(
            file,
            r#"[
                {{"id": 1, "name": "Samosa", "description": "Crisp", "price": 15,
                  "category": "Canteen", "cafeId": null, "cafe": null}},
                {{"id": 2, "name": "Cold Coffee", "description": "Iced", "price": 60.5,
                  "category": "Cafeteria"}}
            ]"#
        )
        .unwrap();
        drop(file);

        let source = JsonFileMenuSource::new(&path);
        let items = source.load_menu().await.unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(items.len(), 2);
        assert_eq!(items[1].price, Decimal::new(605, 1));
        assert_eq!(items[1].cafe_id, None);
    }

    #[tokio::test]
    async fn test_json_file_source_missing_file() {
        let source = JsonFileMenuSource::new("/nonexistent/cafeconnect/menu.json");
        assert!(matches!(source.load_menu().await, Err(ClientError::Io(_))));
    }
}
