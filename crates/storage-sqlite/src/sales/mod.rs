//! SQLite storage implementation for the sales ledger.

mod model;
mod repository;

pub use model::{NewSaleDB, SaleDB};
pub use repository::SalesRepository;

// Re-export trait from core for convenience
pub use craftimizer_core::sales::SalesRepositoryTrait;
