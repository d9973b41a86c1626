//! CafeConnect API library.
//!
//! This crate provides the HTTP backend as a library, allowing it to be
//! tested and driven in-process by the integration tests and the CLI.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod carts;
pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod state;
