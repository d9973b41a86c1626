//! CafeConnect client.
//!
//! Talks to the CafeConnect API and holds the state the browsing screens are
//! built from.
//!
//! # Modules
//!
//! - [`api`] - HTTP client for the backend
//! - [`sequence`] - Request tickets so only the newest response is shown
//! - [`search`] - College search screen state
//! - [`menu`] - Menu sources and menu screen state

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod error;
pub mod menu;
pub mod search;
pub mod sequence;

pub use api::ApiClient;
pub use error::ClientError;
pub use menu::{JsonFileMenuSource, MenuSource, MenuView};
pub use search::{CafeDirectory, DEFAULT_MAP_CENTER, SearchView};
pub use sequence::{RequestSequence, Ticket};
