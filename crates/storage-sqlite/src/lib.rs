//! SQLite storage implementation for Craftimizer.
//!
//! This crate provides all database-related functionality using Diesel ORM
//! with SQLite. It implements the repository traits defined in
//! `craftimizer-core` and contains:
//! - Database connection pooling and management
//! - Diesel migrations
//! - Repository implementations for saved costs, crafted items and sales
//!
//! # Architecture
//!
//! This crate is the only place in the application where Diesel
//! dependencies exist. The `core` crate is database-agnostic and works
//! with traits.
//!
//! ```text
//! core (domain)
//!       │
//!       ▼
//! storage-sqlite (this crate)
//!       │
//!       ▼
//!   SQLite DB
//! ```

pub mod db;
pub mod errors;
pub mod schema;

// Repository implementations
pub mod crafted_items;
pub mod ingredient_costs;
pub mod sales;

// Re-export database utilities
pub use db::{create_pool, get_connection, init, run_migrations, DbConnection, DbPool, WriteHandle};

// Re-export storage errors and conversion helpers
pub use errors::{IntoCore, StorageError};

// Re-export from craftimizer-core for convenience
pub use craftimizer_core::errors::{DatabaseError, Error, Result};
