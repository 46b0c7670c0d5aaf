//! Crafting cost service.
//!
//! Wraps the [`CostResolver`] behind a lock so resolution passes and
//! override mutations serialize (one pass in flight at a time), seeds the
//! engine from persisted costs at startup, and writes override changes
//! back to the cost store best-effort.

use std::sync::Arc;

use log::{debug, warn};
use rust_decimal::Decimal;
use tokio::sync::Mutex;

use crate::crafting::crafting_model::{
    CraftedItemRequest, CraftedItemResult, ResolvedIngredient, ResolvedIntermediate, SavedCost,
    DEFAULT_ITEM_TYPE,
};
use crate::crafting::crafting_traits::{CraftingServiceTrait, SavedCostRepositoryTrait};
use crate::crafting::resolver::CostResolver;
use crate::errors::Result;
use crate::items::ItemCatalogTrait;

pub struct CraftingService {
    // Overlapping passes over the same aggregate maps are not safe; the
    // lock is the single-in-flight guard. Overrides take the same lock.
    resolver: Mutex<CostResolver>,
    saved_cost_repository: Arc<dyn SavedCostRepositoryTrait>,
}

impl CraftingService {
    /// Creates the service and seeds the engine's override map from the
    /// persisted costs. A failing load is logged and ignored: the session
    /// starts without seeds.
    pub fn new(
        catalog: Arc<dyn ItemCatalogTrait>,
        saved_cost_repository: Arc<dyn SavedCostRepositoryTrait>,
    ) -> Self {
        let mut resolver = CostResolver::new(catalog);
        match saved_cost_repository.load_saved_costs() {
            Ok(saved) => {
                debug!("Seeding {} saved ingredient costs", saved.len());
                for record in saved.values() {
                    resolver.seed_saved_cost(record);
                }
            }
            Err(e) => warn!("Failed to load saved ingredient costs: {}", e),
        }
        Self {
            resolver: Mutex::new(resolver),
            saved_cost_repository,
        }
    }
}

#[async_trait::async_trait]
impl CraftingServiceTrait for CraftingService {
    async fn resolve_crafted_items(
        &self,
        requests: &[CraftedItemRequest],
    ) -> Result<Vec<CraftedItemResult>> {
        let requests: Vec<CraftedItemRequest> = requests
            .iter()
            .filter(|request| request.amount > 0)
            .cloned()
            .collect();
        let mut resolver = self.resolver.lock().await;
        Ok(resolver.resolve_crafted_items(&requests).await)
    }

    async fn ingredients(&self) -> Vec<ResolvedIngredient> {
        self.resolver.lock().await.ingredients()
    }

    async fn intermediates(&self) -> Vec<ResolvedIntermediate> {
        self.resolver.lock().await.intermediates()
    }

    async fn set_user_cost(&self, name: &str, cost: Decimal) -> Result<()> {
        let item_type = {
            let mut resolver = self.resolver.lock().await;
            resolver.set_user_cost(name, cost);
            resolver
                .ingredient(name)
                .map(|ingredient| ingredient.item_type.clone())
        };

        // Persistence is fire-and-forget: the in-memory override already
        // took effect, a failing save must not undo it.
        if cost.is_zero() {
            if let Err(e) = self.saved_cost_repository.delete_ingredient_cost(name).await {
                warn!("Failed to delete saved cost for {}: {}", name, e);
            }
        } else {
            let record = SavedCost {
                name: name.to_string(),
                cost,
                item_type: item_type.unwrap_or_else(|| DEFAULT_ITEM_TYPE.to_string()),
            };
            if let Err(e) = self.saved_cost_repository.set_ingredient_cost(&record).await {
                warn!("Failed to persist saved cost for {}: {}", name, e);
            }
        }

        Ok(())
    }
}
