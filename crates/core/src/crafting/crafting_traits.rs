//! Trait contracts for the crafting module.

use std::collections::HashMap;

use crate::crafting::crafting_model::{
    CraftedItemRequest, CraftedItemResult, ResolvedIngredient, ResolvedIntermediate, SavedCost,
};
use crate::errors::Result;
use rust_decimal::Decimal;

/// Unified contract for the crafting cost service.
#[async_trait::async_trait]
pub trait CraftingServiceTrait: Send + Sync {
    /// Runs one full resolution pass over the requested crafted items.
    ///
    /// Requests with a non-positive amount are filtered out before the
    /// pass; items the catalog cannot resolve are skipped silently.
    async fn resolve_crafted_items(
        &self,
        requests: &[CraftedItemRequest],
    ) -> Result<Vec<CraftedItemResult>>;

    /// Aggregated terminal ingredients from the latest pass. Unordered;
    /// callers sort for display.
    async fn ingredients(&self) -> Vec<ResolvedIngredient>;

    /// Aggregated intermediate items from the latest pass. Unordered.
    async fn intermediates(&self) -> Vec<ResolvedIntermediate>;

    /// Pins (`cost != 0`) or clears (`cost == 0`) a user cost override
    /// for the named item, and persists the change best-effort.
    async fn set_user_cost(&self, name: &str, cost: Decimal) -> Result<()>;
}

/// Repository contract for user-pinned costs, durable across sessions.
#[async_trait::async_trait]
pub trait SavedCostRepositoryTrait: Send + Sync {
    /// All saved costs, keyed by item name. Called once at startup to
    /// seed the engine's override map.
    fn load_saved_costs(&self) -> Result<HashMap<String, SavedCost>>;

    /// Upserts the saved cost for one item.
    async fn set_ingredient_cost(&self, record: &SavedCost) -> Result<()>;

    /// Removes the saved cost for one item (override cleared).
    async fn delete_ingredient_cost(&self, name: &str) -> Result<()>;
}

/// Repository contract for the tracked crafted-item list, so the user's
/// working set (including the last computed cost and profit) survives
/// restarts.
#[async_trait::async_trait]
pub trait CraftedItemRepositoryTrait: Send + Sync {
    fn list(&self) -> Result<Vec<CraftedItemResult>>;

    async fn upsert(&self, item: &CraftedItemResult) -> Result<()>;

    async fn delete(&self, ankama_id: i64) -> Result<()>;
}
