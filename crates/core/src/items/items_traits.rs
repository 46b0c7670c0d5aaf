//! Trait contract for the item catalog provider.

use crate::errors::Result;
use crate::items::ItemDefinition;

/// Lookup contract the cost engine consumes.
///
/// Implementations must be idempotent and side-effect-free: the engine
/// calls `get_item_details` many times with the same id during a single
/// resolution pass.
#[async_trait::async_trait]
pub trait ItemCatalogTrait: Send + Sync {
    /// Full item definition (including recipe) for a catalog id, or
    /// `None` when the catalog has no such item.
    async fn get_item_details(&self, ankama_id: i64) -> Result<Option<ItemDefinition>>;

    /// Case-insensitive substring search over item names. Used by UI
    /// consumers, not by the engine itself.
    async fn search_items(&self, query: &str) -> Result<Vec<ItemDefinition>>;
}
