//! Craftimizer Core - Domain entities, services, and traits.
//!
//! This crate contains the core business logic for Craftimizer.
//! It is database-agnostic and defines traits that are implemented
//! by the `storage-sqlite` and `catalog` crates.

pub mod crafting;
pub mod errors;
pub mod items;
pub mod sales;

// Re-export common types from the item and crafting modules
pub use crafting::*;
pub use items::*;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
