//! CLI command implementations.

pub mod database;
pub mod lookup;
