//! Per-session cart of item quantities.
//!
//! A [`Cart`] maps menu item IDs to positive quantities. It is a plain value:
//! whoever owns the browsing session owns the cart and passes it by reference
//! to the views that read or change it.
//!
//! # Invariants
//!
//! - Every stored quantity is at least 1. Removing the last unit deletes the
//!   entry; a zero or negative entry is never stored.
//! - [`Cart::total_count`] always equals the sum of the stored quantities.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::{CartId, MenuItem, MenuItemId};

/// One item and its quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    pub item_id: MenuItemId,
    pub quantity: u32,
}

/// A cart line priced against the catalog.
///
/// `name`, `unit_price` and `line_price` are absent when the item no longer
/// exists in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLineView {
    pub item_id: MenuItemId,
    pub quantity: u32,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub unit_price: Option<Decimal>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub line_price: Option<Decimal>,
}

/// Snapshot of a server-side cart with prices resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartView {
    pub id: CartId,
    pub lines: Vec<CartLineView>,
    pub total_count: u64,
    #[serde(with = "rust_decimal::serde::float")]
    pub subtotal: Decimal,
}

impl CartView {
    /// Quantity of `item_id` in the snapshot (0 if absent).
    #[must_use]
    pub fn quantity(&self, item_id: MenuItemId) -> u32 {
        self.lines
            .iter()
            .find(|line| line.item_id == item_id)
            .map_or(0, |line| line.quantity)
    }
}

/// Item quantities staged for an order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    quantities: BTreeMap<MenuItemId, u32>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one unit of `id`, creating the entry at 1 if absent.
    ///
    /// Returns the new quantity.
    pub fn add_item(&mut self, id: MenuItemId) -> u32 {
        self.add_quantity(id, 1)
    }

    /// Add `count` units of `id`. Saturates at `u32::MAX`.
    ///
    /// Adding zero units leaves the cart unchanged and does not create an
    /// entry. Returns the resulting quantity.
    pub fn add_quantity(&mut self, id: MenuItemId, count: u32) -> u32 {
        if count == 0 {
            return self.quantity(id);
        }
        let qty = self.quantities.entry(id).or_insert(0);
        *qty = qty.saturating_add(count);
        *qty
    }

    /// Remove one unit of `id`.
    ///
    /// Dropping below 1 deletes the entry. Removing an absent item is a no-op.
    /// Returns the remaining quantity.
    pub fn remove_item(&mut self, id: MenuItemId) -> u32 {
        match self.quantities.get_mut(&id) {
            Some(qty) if *qty > 1 => {
                *qty -= 1;
                *qty
            }
            Some(_) => {
                self.quantities.remove(&id);
                0
            }
            None => 0,
        }
    }

    /// Current quantity of `id`, or 0 if absent.
    #[must_use]
    pub fn quantity(&self, id: MenuItemId) -> u32 {
        self.quantities.get(&id).copied().unwrap_or(0)
    }

    /// Sum of all quantities.
    #[must_use]
    pub fn total_count(&self) -> u64 {
        self.quantities.values().map(|&q| u64::from(q)).sum()
    }

    /// Whether the cart holds no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.quantities.is_empty()
    }

    /// Drop every entry.
    pub fn clear(&mut self) {
        self.quantities.clear();
    }

    /// Entries ordered by item ID.
    #[must_use]
    pub fn lines(&self) -> Vec<CartLine> {
        self.quantities
            .iter()
            .map(|(&item_id, &quantity)| CartLine { item_id, quantity })
            .collect()
    }

    /// Price of the cart against a catalog.
    ///
    /// Entries whose item is missing from `catalog` contribute nothing.
    #[must_use]
    pub fn subtotal(&self, catalog: &[MenuItem]) -> Decimal {
        catalog
            .iter()
            .filter_map(|item| {
                self.quantities
                    .get(&item.id)
                    .map(|&qty| item.price * Decimal::from(qty))
            })
            .sum()
    }

    /// Priced snapshot of this cart under `id`.
    #[must_use]
    pub fn view(&self, id: CartId, catalog: &[MenuItem]) -> CartView {
        let lines = self
            .lines()
            .into_iter()
            .map(|line| {
                let item = catalog.iter().find(|item| item.id == line.item_id);
                CartLineView {
                    item_id: line.item_id,
                    quantity: line.quantity,
                    name: item.map(|item| item.name.clone()),
                    unit_price: item.map(|item| item.price),
                    line_price: item.map(|item| item.price * Decimal::from(line.quantity)),
                }
            })
            .collect();

        CartView {
            id,
            lines,
            total_count: self.total_count(),
            subtotal: self.subtotal(catalog),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(n: i32) -> MenuItemId {
        MenuItemId::new(n)
    }

    fn item(n: i32, price: i64) -> MenuItem {
        MenuItem {
            id: id(n),
            name: format!("item-{n}"),
            description: String::new(),
            price: Decimal::new(price, 0),
            category: "Canteen".to_string(),
            image: None,
            cafe_id: None,
        }
    }

    #[test]
    fn test_add_creates_entry_at_one() {
        let mut cart = Cart::new();
        assert_eq!(cart.add_item(id(1)), 1);
        assert_eq!(cart.add_item(id(1)), 2);
        assert_eq!(cart.quantity(id(1)), 2);
        assert_eq!(cart.total_count(), 2);
    }

    #[test]
    fn test_remove_to_zero_deletes_entry() {
        let mut cart = Cart::new();
        cart.add_item(id(1));
        assert_eq!(cart.remove_item(id(1)), 0);
        assert!(cart.is_empty());
        assert!(cart.lines().is_empty());
    }

    #[test]
    fn test_remove_absent_is_noop() {
        let mut cart = Cart::new();
        cart.add_item(id(2));
        assert_eq!(cart.remove_item(id(1)), 0);
        assert_eq!(cart.quantity(id(1)), 0);
        assert_eq!(cart.lines(), vec![CartLine { item_id: id(2), quantity: 1 }]);
    }

    #[test]
    fn test_quantity_matches_effective_operations() {
        // Scripted sequence over three ids; expected counts follow the
        // floor-at-zero rule.
        let ops: &[(bool, i32)] = &[
            (false, 1),
            (true, 1),
            (true, 1),
            (true, 2),
            (false, 1),
            (false, 1),
            (false, 1),
            (true, 1),
            (false, 3),
            (true, 3),
            (true, 2),
        ];
        let mut cart = Cart::new();
        let mut expected = std::collections::HashMap::new();
        for &(add, n) in ops {
            let slot: &mut i64 = expected.entry(n).or_insert(0);
            if add {
                cart.add_item(id(n));
                *slot += 1;
            } else {
                cart.remove_item(id(n));
                *slot = (*slot - 1).max(0);
            }
        }
        for (&n, &qty) in &expected {
            assert_eq!(i64::from(cart.quantity(id(n))), qty, "id {n}");
        }
        let sum: i64 = expected.values().sum();
        assert_eq!(i64::try_from(cart.total_count()).ok(), Some(sum));
        assert_eq!(cart.quantity(id(1)), 1);
        assert_eq!(cart.quantity(id(2)), 2);
        assert_eq!(cart.quantity(id(3)), 1);
    }

    #[test]
    fn test_add_quantity_zero_creates_nothing() {
        let mut cart = Cart::new();
        assert_eq!(cart.add_quantity(id(5), 0), 0);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_add_quantity_saturates() {
        let mut cart = Cart::new();
        cart.add_quantity(id(5), u32::MAX);
        assert_eq!(cart.add_item(id(5)), u32::MAX);
    }

    #[test]
    fn test_subtotal_ignores_unknown_items() {
        let mut cart = Cart::new();
        cart.add_item(id(1));
        cart.add_item(id(1));
        cart.add_item(id(2));
        cart.add_item(id(99));
        let catalog = [item(1, 40), item(2, 15)];
        assert_eq!(cart.subtotal(&catalog), Decimal::new(95, 0));
    }

    #[test]
    fn test_view_prices_known_lines() {
        let mut cart = Cart::new();
        cart.add_quantity(id(1), 3);
        cart.add_item(id(42));
        let view = cart.view(CartId::generate(), &[item(1, 20)]);

        assert_eq!(view.total_count, 4);
        assert_eq!(view.subtotal, Decimal::new(60, 0));
        assert_eq!(view.lines[0].line_price, Some(Decimal::new(60, 0)));
        assert_eq!(view.lines[1].name, None);
        assert_eq!(view.quantity(id(42)), 1);
        assert_eq!(view.quantity(id(7)), 0);
    }

    #[test]
    fn test_clear() {
        let mut cart = Cart::new();
        cart.add_item(id(1));
        cart.clear();
        assert_eq!(cart.total_count(), 0);
    }
}
