//! SQLite storage implementation for the tracked crafted-item list.

mod model;
mod repository;

pub use model::CraftedItemDB;
pub use repository::CraftedItemRepository;

// Re-export trait from core for convenience
pub use craftimizer_core::crafting::CraftedItemRepositoryTrait;
