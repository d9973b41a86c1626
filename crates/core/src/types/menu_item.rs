//! Menu item records.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::cafe::Cafe;
use super::id::{CafeId, MenuItemId};
use super::validation::{ValidationError, optional_text, required_text};

/// A sellable food or drink.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    pub id: MenuItemId,
    pub name: String,
    pub description: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    /// Free-form category label; also the storefront grouping key.
    pub category: String,
    pub image: Option<String>,
    /// Owning cafe. A weak reference: it may point at a cafe that does not
    /// exist, and nothing cascades when cafes change.
    pub cafe_id: Option<CafeId>,
}

impl MenuItem {
    /// Attach an ID to a validated new menu item.
    #[must_use]
    pub fn from_new(id: MenuItemId, new: NewMenuItem) -> Self {
        Self {
            id,
            name: new.name,
            description: new.description,
            price: new.price,
            category: new.category,
            image: new.image,
            cafe_id: new.cafe_id,
        }
    }
}

/// A menu item with its owning cafe resolved.
///
/// `cafe` is `None` both when the item has no owner and when `cafe_id`
/// points at a cafe that does not exist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItemWithCafe {
    #[serde(flatten)]
    pub item: MenuItem,
    pub cafe: Option<Cafe>,
}

/// A validated menu item ready to be stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMenuItem {
    pub name: String,
    pub description: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub category: String,
    pub image: Option<String>,
    pub cafe_id: Option<CafeId>,
}

/// Decimal places a stored price keeps.
const MAX_PRICE_SCALE: u32 = 2;

/// Exclusive upper bound on a price.
fn max_price() -> Decimal {
    Decimal::new(100_000_000, 0)
}

/// Create-menu-item request body as received on the wire.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMenuItemRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub price: Option<Decimal>,
    pub category: Option<String>,
    pub image: Option<String>,
    pub cafe_id: Option<CafeId>,
}

impl NewMenuItemRequest {
    /// Check required fields.
    ///
    /// The category is not checked against the storefront sections; items in
    /// unknown categories are stored and reported when menus are grouped.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] naming every field that is missing or
    /// blank, and any price that is negative or does not fit `NUMERIC(10, 2)`.
    pub fn validate(self) -> Result<NewMenuItem, ValidationError> {
        let mut errors = ValidationError::new();

        let name = required_text(&mut errors, "name", self.name);
        let description = required_text(&mut errors, "description", self.description);
        let category = required_text(&mut errors, "category", self.category);

        let price = match self.price {
            None => {
                errors.missing("price");
                Decimal::ZERO
            }
            Some(p) if p < Decimal::ZERO => {
                errors.push("price", "must not be negative");
                p
            }
            Some(p) if p.normalize().scale() > MAX_PRICE_SCALE => {
                errors.push("price", "must have at most 2 decimal places");
                p
            }
            Some(p) if p >= max_price() => {
                errors.push("price", "must be less than 100000000");
                p
            }
            Some(p) => p,
        };

        errors.finish(|| NewMenuItem {
            name,
            description,
            price,
            category,
            image: optional_text(self.image),
            cafe_id: self.cafe_id,
        })
    }
}
