//! CafeConnect Core - Shared domain types.
//!
//! This crate provides the types used across all CafeConnect components:
//! - `api` - The HTTP backend (cafe directory, menu store, carts)
//! - `client` - Typed API client and view state for search and menu browsing
//! - `cli` - Command-line tools for migrations, seeding, and lookups
//!
//! # Architecture
//!
//! The core crate contains only types and pure logic - no I/O, no database
//! access, no HTTP clients. This keeps it lightweight and allows it to be used
//! anywhere.
//!
//! # Modules
//!
//! - [`types`] - Ids, cafes, menu items, and create-request validation
//! - [`cart`] - Per-session item quantities and derived totals
//! - [`menu`] - Grouping of menu items into storefront sections

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod menu;
pub mod types;

pub use cart::{Cart, CartLine, CartLineView, CartView};
pub use menu::{CategoryBucket, MenuSection, MenuSections};
pub use types::*;
