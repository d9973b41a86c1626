//! Core types for CafeConnect.
//!
//! This module provides type-safe wrappers for the directory and menu domain.

pub mod cafe;
pub mod geo;
pub mod id;
pub mod menu_item;
pub mod validation;

pub use cafe::{Cafe, DEFAULT_RATING, NewCafe, NewCafeRequest};
pub use geo::{GeoPoint, GeoPointRequest};
pub use id::*;
pub use menu_item::{MenuItem, MenuItemWithCafe, NewMenuItem, NewMenuItemRequest};
pub use validation::{FieldError, ValidationError};
