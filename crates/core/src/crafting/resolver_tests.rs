//! Tests for the cost resolution engine.
//!
//! These cover the aggregation contract end to end: recursive expansion,
//! name-keyed weighted-average merging, memoization within a pass, depth
//! tracking, override short-circuit/restore, and the lenient failure
//! policy (lookup misses and malformed recipes cost zero, never abort).

#[cfg(test)]
mod tests {
    use crate::crafting::crafting_model::{CraftedItemRequest, SavedCost};
    use crate::crafting::errors::CraftingError;
    use crate::crafting::resolver::{CostResolver, MAX_RECIPE_DEPTH};
    use crate::errors::Result;
    use crate::items::{ItemCatalogTrait, ItemDefinition, RecipeEntry};
    use async_trait::async_trait;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    // =========================================================================
    // Mock catalog
    // =========================================================================

    struct MockCatalog {
        items: HashMap<i64, ItemDefinition>,
        lookups: Mutex<HashMap<i64, usize>>,
    }

    impl MockCatalog {
        fn new(items: Vec<ItemDefinition>) -> Arc<Self> {
            Arc::new(Self {
                items: items
                    .into_iter()
                    .map(|item| (item.ankama_id, item))
                    .collect(),
                lookups: Mutex::new(HashMap::new()),
            })
        }

        fn lookup_count(&self, ankama_id: i64) -> usize {
            self.lookups
                .lock()
                .unwrap()
                .get(&ankama_id)
                .copied()
                .unwrap_or(0)
        }
    }

    #[async_trait]
    impl ItemCatalogTrait for MockCatalog {
        async fn get_item_details(&self, ankama_id: i64) -> Result<Option<ItemDefinition>> {
            *self.lookups.lock().unwrap().entry(ankama_id).or_insert(0) += 1;
            Ok(self.items.get(&ankama_id).cloned())
        }

        async fn search_items(&self, query: &str) -> Result<Vec<ItemDefinition>> {
            let query = query.to_lowercase();
            Ok(self
                .items
                .values()
                .filter(|item| item.name.to_lowercase().contains(&query))
                .cloned()
                .collect())
        }
    }

    fn item(
        id: i64,
        name: &str,
        level: i32,
        item_type: &str,
        recipe: &[(i64, i64)],
    ) -> ItemDefinition {
        ItemDefinition {
            ankama_id: id,
            name: name.to_string(),
            level,
            item_type: item_type.to_string(),
            recipe: recipe
                .iter()
                .map(|&(item_ankama_id, quantity)| RecipeEntry {
                    item_ankama_id,
                    quantity,
                })
                .collect(),
        }
    }

    fn request(ankama_id: i64, amount: i64, sell_price: Decimal) -> CraftedItemRequest {
        CraftedItemRequest {
            ankama_id,
            amount,
            sell_price,
        }
    }

    fn saved(name: &str, cost: Decimal) -> SavedCost {
        SavedCost {
            name: name.to_string(),
            cost,
            item_type: "Resource".to_string(),
        }
    }

    // =========================================================================
    // Basic resolution
    // =========================================================================

    #[tokio::test]
    async fn resolves_simple_recipe_with_saved_ingredient_cost() {
        let catalog = MockCatalog::new(vec![
            item(1, "Sword", 10, "Sword", &[(2, 2)]),
            item(2, "Iron", 1, "Resource", &[]),
        ]);
        let mut resolver = CostResolver::new(catalog);
        resolver.seed_saved_cost(&saved("Iron", dec!(5)));

        let results = resolver
            .resolve_crafted_items(&[request(1, 3, dec!(0))])
            .await;

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].name, "Sword");
        assert_eq!(results[0].cost_per_unit, 10);

        let iron = resolver.ingredient("Iron").expect("iron aggregated");
        assert_eq!(iron.amount, 6);
        assert_eq!(iron.cost, dec!(5));
        assert!(resolver.intermediates().is_empty());
    }

    #[tokio::test]
    async fn terminal_ingredient_without_saved_cost_is_free() {
        let catalog = MockCatalog::new(vec![
            item(1, "Sword", 10, "Sword", &[(2, 2)]),
            item(2, "Iron", 1, "Resource", &[]),
        ]);
        let mut resolver = CostResolver::new(catalog);

        let results = resolver
            .resolve_crafted_items(&[request(1, 3, dec!(0))])
            .await;

        assert_eq!(results[0].cost_per_unit, 0);
        let iron = resolver.ingredient("Iron").expect("iron aggregated");
        assert_eq!(iron.amount, 6);
        assert_eq!(iron.cost, dec!(0));
        assert!(!iron.is_manually_overridden);
    }

    #[tokio::test]
    async fn repeated_passes_are_idempotent() {
        let catalog = MockCatalog::new(vec![
            item(1, "Cloak", 40, "Cloak", &[(2, 3), (3, 1)]),
            item(2, "Wool", 1, "Resource", &[]),
            item(3, "Thread", 5, "Resource", &[]),
        ]);
        let mut resolver = CostResolver::new(catalog);
        resolver.seed_saved_cost(&saved("Wool", dec!(12)));
        let requests = [request(1, 2, dec!(100))];

        let first_results = resolver.resolve_crafted_items(&requests).await;
        let mut first_ingredients = resolver.ingredients();
        first_ingredients.sort_by(|a, b| a.name.cmp(&b.name));

        let second_results = resolver.resolve_crafted_items(&requests).await;
        let mut second_ingredients = resolver.ingredients();
        second_ingredients.sort_by(|a, b| a.name.cmp(&b.name));

        assert_eq!(first_results, second_results);
        assert_eq!(first_ingredients, second_ingredients);
        assert_eq!(resolver.intermediates(), vec![]);
    }

    #[tokio::test]
    async fn same_ingredient_used_by_two_crafts_merges_amounts() {
        let catalog = MockCatalog::new(vec![
            item(1, "Sword", 10, "Sword", &[(3, 2)]),
            item(2, "Dagger", 5, "Dagger", &[(3, 1)]),
            item(3, "Iron", 1, "Resource", &[]),
        ]);
        let mut resolver = CostResolver::new(catalog);
        resolver.seed_saved_cost(&saved("Iron", dec!(5)));

        resolver
            .resolve_crafted_items(&[request(1, 2, dec!(0)), request(2, 3, dec!(0))])
            .await;

        let iron = resolver.ingredient("Iron").expect("iron aggregated");
        // 2 swords x2 iron + 3 daggers x1 iron
        assert_eq!(iron.amount, 7);
        assert_eq!(iron.cost, dec!(5));
    }

    #[tokio::test]
    async fn weighted_average_uses_old_amount_before_growing_it() {
        let catalog = MockCatalog::new(vec![]);
        let mut resolver = CostResolver::new(catalog);
        let zinc = item(9, "Zinc", 1, "Resource", &[]);

        // Two usages with different effective unit costs: 4 units at 10,
        // then 6 units at 20.
        resolver.update_ingredient_or_intermediate(&zinc, 4, dec!(40), 1);
        resolver.update_ingredient_or_intermediate(&zinc, 6, dec!(120), 1);

        let entry = resolver.ingredient("Zinc").expect("zinc aggregated");
        assert_eq!(entry.amount, 10);
        assert_eq!(entry.cost, dec!(16));
    }

    #[tokio::test]
    async fn memoizes_unit_costs_within_a_pass() {
        let catalog = MockCatalog::new(vec![
            item(1, "Amulet", 30, "Amulet", &[(2, 1), (2, 1)]),
            item(2, "Brass Plate", 20, "Resource", &[(3, 4)]),
            item(3, "Copper", 1, "Resource", &[]),
        ]);
        let mut resolver = CostResolver::new(catalog.clone());

        resolver
            .resolve_crafted_items(&[request(1, 1, dec!(0))])
            .await;

        // The plate is looked up once per recipe line, but only expanded
        // once: copper is fetched a single time.
        assert_eq!(catalog.lookup_count(2), 2);
        assert_eq!(catalog.lookup_count(3), 1);
    }

    // =========================================================================
    // Depth tracking
    // =========================================================================

    #[tokio::test]
    async fn intermediate_depth_is_the_maximum_over_all_paths() {
        let catalog = MockCatalog::new(vec![
            item(1, "Shield", 60, "Shield", &[(5, 1)]),
            item(2, "Armor", 80, "Armor", &[(3, 1)]),
            item(3, "Breastplate", 70, "Resource", &[(4, 1)]),
            item(4, "Alloy Sheet", 50, "Resource", &[(5, 1)]),
            item(5, "Alloy", 40, "Resource", &[(6, 1)]),
            item(6, "Ore", 1, "Resource", &[]),
        ]);
        let mut resolver = CostResolver::new(catalog);

        resolver
            .resolve_crafted_items(&[request(1, 1, dec!(0)), request(2, 1, dec!(0))])
            .await;

        // Alloy is one edge below Shield but three edges below Armor.
        assert_eq!(resolver.intermediate("Alloy").map(|i| i.depth), Some(3));
        assert_eq!(
            resolver.intermediate("Breastplate").map(|i| i.depth),
            Some(1)
        );
        assert_eq!(
            resolver.intermediate("Alloy Sheet").map(|i| i.depth),
            Some(2)
        );
    }

    #[tokio::test]
    async fn depth_ceiling_returns_typed_error() {
        let catalog = MockCatalog::new(vec![]);
        let mut resolver = CostResolver::new(catalog);
        let definition = item(1, "Anything", 1, "Resource", &[]);

        let result = resolver
            .resolve_item_cost(definition, 1, MAX_RECIPE_DEPTH + 1)
            .await;

        assert!(matches!(
            result,
            Err(CraftingError::DepthExceeded { depth, .. }) if depth == MAX_RECIPE_DEPTH + 1
        ));
    }

    #[tokio::test]
    async fn self_referential_recipe_terminates_at_the_ceiling() {
        let catalog = MockCatalog::new(vec![item(1, "Ouroboros", 99, "Relic", &[(1, 1)])]);
        let mut resolver = CostResolver::new(catalog);

        let results = resolver
            .resolve_crafted_items(&[request(1, 1, dec!(0))])
            .await;

        // The cycle is cut at the ceiling; the branch costs zero instead
        // of crashing the pass.
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].cost_per_unit, 0);
        assert_eq!(
            resolver.intermediate("Ouroboros").map(|i| i.depth),
            Some(MAX_RECIPE_DEPTH)
        );
    }

    // =========================================================================
    // Lenient failure policy
    // =========================================================================

    #[tokio::test]
    async fn unresolvable_top_level_item_is_skipped() {
        let catalog = MockCatalog::new(vec![]);
        let mut resolver = CostResolver::new(catalog);

        let results = resolver
            .resolve_crafted_items(&[request(99, 1, dec!(0))])
            .await;

        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn missing_recipe_ingredient_contributes_zero() {
        let catalog = MockCatalog::new(vec![
            item(1, "Boots", 20, "Boots", &[(99, 2), (2, 1)]),
            item(2, "Leather", 1, "Resource", &[]),
        ]);
        let mut resolver = CostResolver::new(catalog);
        resolver.seed_saved_cost(&saved("Leather", dec!(5)));

        let results = resolver
            .resolve_crafted_items(&[request(1, 2, dec!(0))])
            .await;

        assert_eq!(results[0].cost_per_unit, 5);
        assert_eq!(resolver.ingredients().len(), 1);
        assert_eq!(resolver.ingredient("Leather").map(|i| i.amount), Some(2));
    }

    #[tokio::test]
    async fn non_positive_recipe_quantity_is_skipped() {
        let catalog = MockCatalog::new(vec![
            item(1, "Belt", 15, "Belt", &[(2, 0)]),
            item(2, "Leather", 1, "Resource", &[]),
        ]);
        let mut resolver = CostResolver::new(catalog);

        let results = resolver
            .resolve_crafted_items(&[request(1, 1, dec!(0))])
            .await;

        assert_eq!(results[0].cost_per_unit, 0);
        assert!(resolver.ingredients().is_empty());
    }

    // =========================================================================
    // Rounding
    // =========================================================================

    #[tokio::test]
    async fn unit_cost_rounds_and_profit_uses_unrounded_total() {
        let catalog = MockCatalog::new(vec![
            item(1, "Gold Ring", 40, "Ring", &[(2, 1)]),
            item(2, "Gold", 1, "Resource", &[]),
        ]);
        let mut resolver = CostResolver::new(catalog);
        // One third of 1000, so three units cost (just under) 1000.
        resolver.seed_saved_cost(&saved("Gold", dec!(333.3333333333333333333333333)));

        let results = resolver
            .resolve_crafted_items(&[request(1, 3, dec!(400))])
            .await;

        assert_eq!(results[0].cost_per_unit, 333);
        assert_eq!(results[0].profit, 200);
    }

    #[tokio::test]
    async fn rounding_is_half_away_from_zero() {
        let catalog = MockCatalog::new(vec![
            item(1, "Trinket", 5, "Ring", &[(2, 1)]),
            item(2, "Pebble", 1, "Resource", &[]),
        ]);
        let mut resolver = CostResolver::new(catalog);
        resolver.seed_saved_cost(&saved("Pebble", dec!(2.5)));

        let results = resolver
            .resolve_crafted_items(&[request(1, 1, dec!(0))])
            .await;

        assert_eq!(results[0].cost_per_unit, 3);
        assert_eq!(results[0].profit, -3);
    }

    // =========================================================================
    // Overrides
    // =========================================================================

    #[tokio::test]
    async fn override_on_intermediate_detaches_its_ingredients() {
        let catalog = MockCatalog::new(vec![
            item(1, "Sword", 50, "Sword", &[(2, 1)]),
            item(2, "Blade", 40, "Resource", &[(3, 2)]),
            item(3, "Steel", 1, "Resource", &[]),
        ]);
        let mut resolver = CostResolver::new(catalog);
        resolver.seed_saved_cost(&saved("Steel", dec!(10)));
        let requests = [request(1, 3, dec!(0))];

        resolver.resolve_crafted_items(&requests).await;
        assert_eq!(resolver.ingredient("Steel").map(|i| i.amount), Some(6));
        assert_eq!(resolver.intermediate("Blade").map(|i| i.cost), Some(dec!(20)));

        resolver.set_user_cost("Blade", dec!(500));

        // Steel's six units were all attributed to Blade, so pinning Blade
        // removes Steel from the purchase list entirely.
        assert!(resolver.ingredient("Steel").is_none());
        let blade = resolver.intermediate("Blade").expect("blade kept");
        assert_eq!(blade.cost, dec!(500));
        assert!(blade.is_manually_overridden);

        // The next pass keeps the short-circuit: Blade costs 500, Steel
        // never reappears.
        let results = resolver.resolve_crafted_items(&requests).await;
        assert_eq!(results[0].cost_per_unit, 500);
        assert!(resolver.ingredient("Steel").is_none());
        let blade = resolver.intermediate("Blade").expect("blade kept");
        assert_eq!(blade.amount, 3);
        assert!(blade.is_manually_overridden);
    }

    #[tokio::test]
    async fn clearing_an_override_restores_ingredients_and_rederives_cost() {
        let catalog = MockCatalog::new(vec![
            item(1, "Sword", 50, "Sword", &[(2, 1)]),
            item(2, "Blade", 40, "Resource", &[(3, 2)]),
            item(3, "Steel", 1, "Resource", &[]),
        ]);
        let mut resolver = CostResolver::new(catalog);
        resolver.seed_saved_cost(&saved("Steel", dec!(10)));
        let requests = [request(1, 3, dec!(0))];

        resolver.resolve_crafted_items(&requests).await;
        resolver.set_user_cost("Blade", dec!(500));
        resolver.resolve_crafted_items(&requests).await;

        resolver.set_user_cost("Blade", dec!(0));

        // Steel is re-attached immediately from the cached recipe shape.
        assert_eq!(resolver.ingredient("Steel").map(|i| i.amount), Some(6));
        assert!(!resolver
            .intermediate("Blade")
            .expect("blade kept")
            .is_manually_overridden);

        // Re-resolving derives Blade from its recipe again: two steel at
        // ten kamas each, not the stale pin.
        let results = resolver.resolve_crafted_items(&requests).await;
        assert_eq!(results[0].cost_per_unit, 20);
        let blade = resolver.intermediate("Blade").expect("blade kept");
        assert_eq!(blade.cost, dec!(20));
        let steel = resolver.ingredient("Steel").expect("steel restored");
        assert_eq!(steel.amount, 6);
    }

    #[tokio::test]
    async fn override_on_terminal_ingredient_only_flips_cost_and_flag() {
        let catalog = MockCatalog::new(vec![
            item(1, "Sword", 10, "Sword", &[(2, 2)]),
            item(2, "Iron", 1, "Resource", &[]),
        ]);
        let mut resolver = CostResolver::new(catalog);

        resolver
            .resolve_crafted_items(&[request(1, 3, dec!(0))])
            .await;
        resolver.set_user_cost("Iron", dec!(25));

        // No children to detach: the amount stays put.
        let iron = resolver.ingredient("Iron").expect("iron kept");
        assert_eq!(iron.amount, 6);
        assert_eq!(iron.cost, dec!(25));
        assert!(iron.is_manually_overridden);
    }

    #[tokio::test]
    async fn override_on_unresolved_name_creates_synthetic_entry() {
        let catalog = MockCatalog::new(vec![]);
        let mut resolver = CostResolver::new(catalog);

        resolver.set_user_cost("Mystery Meat", dec!(250));

        let entry = resolver.ingredient("Mystery Meat").expect("synthetic entry");
        assert_eq!(entry.amount, 0);
        assert_eq!(entry.cost, dec!(250));
        assert!(entry.is_manually_overridden);

        resolver.set_user_cost("Mystery Meat", dec!(0));
        let entry = resolver.ingredient("Mystery Meat").expect("entry kept");
        assert!(!entry.is_manually_overridden);
        assert_eq!(entry.cost, dec!(0));
    }

    #[tokio::test]
    async fn overridden_ingredient_amount_is_frozen_during_passes() {
        let catalog = MockCatalog::new(vec![
            item(1, "Sword", 10, "Sword", &[(2, 2)]),
            item(2, "Iron", 1, "Resource", &[]),
        ]);
        let mut resolver = CostResolver::new(catalog);
        resolver.seed_saved_cost(&saved("Iron", dec!(5)));

        resolver
            .resolve_crafted_items(&[request(1, 3, dec!(0))])
            .await;

        // Seeded costs count as overrides: the entry is rebuilt each pass
        // with the pinned cost and the pass's own amount.
        let iron = resolver.ingredient("Iron").expect("iron aggregated");
        assert!(iron.is_manually_overridden);
        assert_eq!(iron.amount, 6);
        assert_eq!(iron.cost, dec!(5));
    }
}
