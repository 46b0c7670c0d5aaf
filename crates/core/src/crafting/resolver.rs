//! The cost resolution engine.
//!
//! `CostResolver` recursively expands the recipes of the requested crafted
//! items through the catalog provider and aggregates, per pass, which
//! terminal ingredients and intermediate items the plan consumes, at what
//! amounts and weighted-average unit costs. User-pinned costs short-circuit
//! expansion of the pinned node; clearing a pin re-derives the cost from
//! the cached recipe shape.
//!
//! All maps are name-keyed, not id-keyed: recipes reference ingredients by
//! catalog id, but display and overrides work by item name. Two distinct
//! ids sharing a display name therefore merge. This mirrors the override
//! semantics and is a known limitation, not an accident.

use std::collections::HashMap;
use std::sync::Arc;

use futures::future::BoxFuture;
use log::{debug, warn};
use rust_decimal::Decimal;

use crate::crafting::crafting_model::{
    round_kamas, CraftedItemRequest, CraftedItemResult, RecipeShape, RecipeShapeLine,
    ResolvedIngredient, ResolvedIntermediate, SavedCost, DEFAULT_ITEM_TYPE,
};
use crate::crafting::errors::CraftingError;
use crate::items::{ItemCatalogTrait, ItemDefinition, ItemKind};

/// Hard ceiling on recipe-expansion depth. A legitimate Dofus crafting
/// chain is a handful of levels deep; anything past this is a cycle.
pub const MAX_RECIPE_DEPTH: u32 = 50;

/// Mutable session state of the cost engine.
///
/// Lifecycle of each map:
/// - `user_set_costs` and `item_recipes` persist across resolution passes;
/// - `calculated_costs`, `ingredients` and `intermediates` are rebuilt at
///   the start of every pass.
pub struct CostResolver {
    catalog: Arc<dyn ItemCatalogTrait>,
    user_set_costs: HashMap<String, Decimal>,
    calculated_costs: HashMap<String, Decimal>,
    ingredients: HashMap<String, ResolvedIngredient>,
    intermediates: HashMap<String, ResolvedIntermediate>,
    item_recipes: HashMap<String, RecipeShape>,
}

impl CostResolver {
    pub fn new(catalog: Arc<dyn ItemCatalogTrait>) -> Self {
        Self {
            catalog,
            user_set_costs: HashMap::new(),
            calculated_costs: HashMap::new(),
            ingredients: HashMap::new(),
            intermediates: HashMap::new(),
            item_recipes: HashMap::new(),
        }
    }

    /// Runs one full resolution pass.
    ///
    /// Transient state is reset first, so afterwards [`ingredients`] and
    /// [`intermediates`] reflect the combined closure of all requests.
    /// Items the catalog cannot resolve are skipped without failing the
    /// pass.
    ///
    /// [`ingredients`]: Self::ingredients
    /// [`intermediates`]: Self::intermediates
    pub async fn resolve_crafted_items(
        &mut self,
        requests: &[CraftedItemRequest],
    ) -> Vec<CraftedItemResult> {
        self.clear_calculations();
        let mut results = Vec::with_capacity(requests.len());

        for request in requests {
            if request.amount <= 0 {
                debug!(
                    "Skipping crafted item {} with non-positive amount {}",
                    request.ankama_id, request.amount
                );
                continue;
            }
            let definition = match self.catalog.get_item_details(request.ankama_id).await {
                Ok(Some(definition)) => definition,
                Ok(None) => {
                    debug!(
                        "Crafted item {} not found in catalog, skipping",
                        request.ankama_id
                    );
                    continue;
                }
                Err(e) => {
                    warn!(
                        "Catalog lookup for crafted item {} failed: {}. Skipping.",
                        request.ankama_id, e
                    );
                    continue;
                }
            };

            let name = definition.name.clone();
            let total_cost = match self.resolve_item_cost(definition, request.amount, 0).await {
                Ok(cost) => cost,
                Err(e) => {
                    warn!("Cost resolution for {} failed: {}. Skipping.", name, e);
                    continue;
                }
            };

            let amount = Decimal::from(request.amount);
            results.push(CraftedItemResult {
                ankama_id: request.ankama_id,
                name,
                amount: request.amount,
                cost_per_unit: round_kamas(total_cost / amount),
                sell_price: request.sell_price,
                // Profit uses the unrounded total cost, not the rounded unit cost.
                profit: round_kamas(request.sell_price * amount - total_cost),
            });
        }

        results
    }

    /// Resolves the total cost of `amount` units of `definition`.
    ///
    /// Resolution order: user-pinned cost, per-pass memo, terminal
    /// ingredient (free unless pinned), recipe expansion. Branch failures
    /// (lookup misses, malformed lines, depth ceiling) contribute zero and
    /// never propagate past the recipe line that hit them.
    pub(crate) fn resolve_item_cost(
        &mut self,
        definition: ItemDefinition,
        amount: i64,
        depth: u32,
    ) -> BoxFuture<'_, Result<Decimal, CraftingError>> {
        Box::pin(async move {
            if depth > MAX_RECIPE_DEPTH {
                return Err(CraftingError::DepthExceeded {
                    item: definition.name,
                    depth,
                });
            }

            let kind = definition.kind();
            let ItemDefinition { name, recipe, .. } = definition;

            if let Some(unit_cost) = self.user_set_costs.get(&name).copied() {
                debug!("Using user-set cost for {}: {}", name, unit_cost);
                return Ok(unit_cost * Decimal::from(amount));
            }
            if let Some(unit_cost) = self.calculated_costs.get(&name).copied() {
                return Ok(unit_cost * Decimal::from(amount));
            }

            let mut total_cost = Decimal::ZERO;
            match kind {
                ItemKind::Intermediate => {
                    let mut lines = Vec::with_capacity(recipe.len());
                    for entry in recipe {
                        if entry.quantity <= 0 {
                            warn!(
                                "Recipe line {} of {} has non-positive quantity {}, skipping",
                                entry.item_ankama_id, name, entry.quantity
                            );
                            continue;
                        }
                        let child = match self.catalog.get_item_details(entry.item_ankama_id).await
                        {
                            Ok(Some(child)) => child,
                            Ok(None) => {
                                debug!(
                                    "Ingredient {} of {} not found in catalog",
                                    entry.item_ankama_id, name
                                );
                                continue;
                            }
                            Err(e) => {
                                warn!(
                                    "Catalog lookup for ingredient {} of {} failed: {}",
                                    entry.item_ankama_id, name, e
                                );
                                continue;
                            }
                        };

                        let child_meta = child.clone();
                        let child_amount = entry.quantity * amount;
                        lines.push(RecipeShapeLine {
                            name: child.name.clone(),
                            quantity: entry.quantity,
                        });

                        let child_cost =
                            match self.resolve_item_cost(child, child_amount, depth + 1).await {
                                Ok(cost) => cost,
                                Err(e) => {
                                    warn!("{}. Treating branch as zero cost.", e);
                                    continue;
                                }
                            };

                        total_cost += child_cost;
                        self.update_ingredient_or_intermediate(
                            &child_meta,
                            child_amount,
                            child_cost,
                            depth + 1,
                        );
                    }
                    self.item_recipes.insert(name.clone(), RecipeShape { lines });
                }
                ItemKind::Ingredient => {
                    // Terminal resource: without a user-set cost (handled
                    // above) it contributes nothing.
                }
            }

            let unit_cost = total_cost / Decimal::from(amount);
            self.calculated_costs.insert(name, unit_cost);
            Ok(total_cost)
        })
    }

    /// Folds one recipe-line usage of `item` into the matching aggregate
    /// map. Called once per expansion, not once per unique name.
    pub(crate) fn update_ingredient_or_intermediate(
        &mut self,
        item: &ItemDefinition,
        amount: i64,
        cost: Decimal,
        depth: u32,
    ) {
        let name = item.name.as_str();
        match item.kind() {
            ItemKind::Intermediate => {
                if let Some(existing) = self.intermediates.get_mut(name) {
                    if !existing.is_manually_overridden {
                        // Average against the old amount first, then grow it.
                        let new_amount = existing.amount + amount;
                        existing.cost = (existing.cost * Decimal::from(existing.amount) + cost)
                            / Decimal::from(new_amount);
                        existing.amount = new_amount;
                    }
                    // Depth is topology, not cost bookkeeping: it keeps
                    // updating even while the entry is frozen.
                    existing.depth = existing.depth.max(depth);
                } else {
                    let override_cost = self.user_set_costs.get(name).copied();
                    self.intermediates.insert(
                        name.to_string(),
                        ResolvedIntermediate {
                            name: name.to_string(),
                            amount,
                            cost: override_cost.unwrap_or_else(|| cost / Decimal::from(amount)),
                            level: item.level,
                            depth,
                            is_manually_overridden: override_cost.is_some(),
                        },
                    );
                }
            }
            ItemKind::Ingredient => {
                if let Some(existing) = self.ingredients.get_mut(name) {
                    if !existing.is_manually_overridden {
                        let new_amount = existing.amount + amount;
                        existing.cost = (existing.cost * Decimal::from(existing.amount) + cost)
                            / Decimal::from(new_amount);
                        existing.amount = new_amount;
                    }
                } else {
                    let override_cost = self.user_set_costs.get(name).copied();
                    self.ingredients.insert(
                        name.to_string(),
                        ResolvedIngredient {
                            name: name.to_string(),
                            amount,
                            cost: override_cost.unwrap_or_else(|| cost / Decimal::from(amount)),
                            item_type: item.item_type.clone(),
                            is_manually_overridden: override_cost.is_some(),
                        },
                    );
                }
            }
        }
    }

    /// Pins (`cost != 0`) or clears (`cost == 0`) a user cost for `name`.
    ///
    /// Pinning an intermediate freezes its aggregate entry and detaches its
    /// recipe's immediate children from the ingredient aggregate: once the
    /// user asserts an all-in cost, the sub-ingredients are no longer
    /// purchases to make. Clearing reverses both effects and re-derives the
    /// cost from the cached recipe shape; the next resolution pass then
    /// recomputes everything exactly.
    pub fn set_user_cost(&mut self, name: &str, cost: Decimal) {
        debug!("Setting user cost for {}: {}", name, cost);

        if self.intermediates.contains_key(name) {
            if !cost.is_zero() {
                self.user_set_costs.insert(name.to_string(), cost);
                let mut frozen_amount = 0;
                if let Some(item) = self.intermediates.get_mut(name) {
                    item.cost = cost;
                    item.is_manually_overridden = true;
                    frozen_amount = item.amount;
                }
                self.detach_recipe_ingredients(name, frozen_amount);
            } else {
                self.user_set_costs.remove(name);
                if let Some(item) = self.intermediates.get_mut(name) {
                    item.is_manually_overridden = false;
                }
                self.recalculate_intermediate_cost(name);
                self.restore_recipe_ingredients(name);
            }
        } else if let Some(ingredient) = self.ingredients.get_mut(name) {
            // Terminal ingredients have no children to detach: only the
            // cost and flag change. The asymmetry with intermediates is
            // intentional.
            ingredient.cost = cost;
            ingredient.is_manually_overridden = !cost.is_zero();
            if cost.is_zero() {
                self.user_set_costs.remove(name);
            } else {
                self.user_set_costs.insert(name.to_string(), cost);
            }
        } else if !cost.is_zero() {
            // Not resolved in the current pass: surface a synthetic
            // terminal entry so the override is visible immediately.
            self.user_set_costs.insert(name.to_string(), cost);
            self.ingredients.insert(
                name.to_string(),
                ResolvedIngredient {
                    name: name.to_string(),
                    amount: 0,
                    cost,
                    item_type: DEFAULT_ITEM_TYPE.to_string(),
                    is_manually_overridden: true,
                },
            );
        } else {
            self.user_set_costs.remove(name);
        }

        // The next pass must recompute dependents of this name.
        self.calculated_costs.remove(name);
    }

    /// Seeds one persisted cost into the override map, with a synthetic
    /// ingredient entry so it shows up before the first pass.
    pub fn seed_saved_cost(&mut self, record: &SavedCost) {
        if record.cost.is_zero() {
            return;
        }
        self.user_set_costs.insert(record.name.clone(), record.cost);
        self.ingredients
            .entry(record.name.clone())
            .or_insert_with(|| ResolvedIngredient {
                name: record.name.clone(),
                amount: 0,
                cost: record.cost,
                item_type: record.item_type.clone(),
                is_manually_overridden: true,
            });
    }

    /// Aggregated terminal ingredients of the latest pass, unordered.
    pub fn ingredients(&self) -> Vec<ResolvedIngredient> {
        self.ingredients.values().cloned().collect()
    }

    /// Aggregated intermediates of the latest pass, unordered.
    pub fn intermediates(&self) -> Vec<ResolvedIntermediate> {
        self.intermediates.values().cloned().collect()
    }

    pub fn ingredient(&self, name: &str) -> Option<&ResolvedIngredient> {
        self.ingredients.get(name)
    }

    pub fn intermediate(&self, name: &str) -> Option<&ResolvedIntermediate> {
        self.intermediates.get(name)
    }

    /// Resets all per-pass state. User-set costs and cached recipe shapes
    /// survive, everything else is rebuilt by the next pass.
    pub fn clear_calculations(&mut self) {
        self.calculated_costs.clear();
        self.ingredients.clear();
        self.intermediates.clear();
    }

    fn detach_recipe_ingredients(&mut self, intermediate_name: &str, frozen_amount: i64) {
        let lines = match self.item_recipes.get(intermediate_name) {
            Some(shape) => shape.lines.clone(),
            None => return,
        };
        for line in lines {
            if let Some(ingredient) = self.ingredients.get_mut(&line.name) {
                ingredient.amount -= line.quantity * frozen_amount;
                if ingredient.amount <= 0 {
                    self.ingredients.remove(&line.name);
                }
            }
        }
    }

    fn restore_recipe_ingredients(&mut self, intermediate_name: &str) {
        let scale = self
            .intermediates
            .get(intermediate_name)
            .map(|item| item.amount)
            .unwrap_or(0);
        let lines = match self.item_recipes.get(intermediate_name) {
            Some(shape) => shape.lines.clone(),
            None => return,
        };
        for line in lines {
            let restored = line.quantity * scale;
            if let Some(ingredient) = self.ingredients.get_mut(&line.name) {
                ingredient.amount += restored;
            } else {
                self.ingredients.insert(
                    line.name.clone(),
                    ResolvedIngredient {
                        name: line.name.clone(),
                        amount: restored,
                        cost: Decimal::ZERO,
                        item_type: DEFAULT_ITEM_TYPE.to_string(),
                        is_manually_overridden: false,
                    },
                );
            }
        }
    }

    fn recalculate_intermediate_cost(&mut self, name: &str) {
        let lines = match self.item_recipes.get(name) {
            Some(shape) => shape.lines.clone(),
            None => return,
        };
        let total: Decimal = lines
            .iter()
            .map(|line| self.known_unit_cost(&line.name) * Decimal::from(line.quantity))
            .sum();
        if let Some(item) = self.intermediates.get_mut(name) {
            if item.amount != 0 {
                item.cost = total / Decimal::from(item.amount);
            }
        }
    }

    fn known_unit_cost(&self, name: &str) -> Decimal {
        if let Some(cost) = self.user_set_costs.get(name) {
            return *cost;
        }
        if let Some(ingredient) = self.ingredients.get(name) {
            return ingredient.cost;
        }
        if let Some(item) = self.intermediates.get(name) {
            return item.cost;
        }
        Decimal::ZERO
    }
}
