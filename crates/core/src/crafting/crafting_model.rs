//! Domain models for the cost resolution engine.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Item type used for synthetic ingredient entries whose real type is not
/// known yet (overrides on names the current pass never resolved).
pub const DEFAULT_ITEM_TYPE: &str = "Resource";

/// A top-level item the user wants to craft, with the quantity to produce
/// and the expected sell price per unit. Input only; the engine holds no
/// request state between passes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CraftedItemRequest {
    pub ankama_id: i64,
    pub amount: i64,
    pub sell_price: Decimal,
}

/// Per-item outcome of a resolution pass. Unit cost and profit are whole
/// kamas, rounded half away from zero; profit is computed from the
/// unrounded total cost.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CraftedItemResult {
    pub ankama_id: i64,
    pub name: String,
    pub amount: i64,
    pub cost_per_unit: i64,
    pub sell_price: Decimal,
    pub profit: i64,
}

/// A terminal resource aggregated across every recipe-expansion path of
/// the current pass. Keyed by item name: recipes reference ingredients by
/// id, but display and overrides work by name, so same-named items merge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedIngredient {
    pub name: String,
    pub amount: i64,
    pub cost: Decimal,
    pub item_type: String,
    pub is_manually_overridden: bool,
}

/// A craftable node reached while expanding the requested items.
///
/// `depth` is the maximum number of recipe-expansion edges from any
/// top-level request to this node across all paths of the current pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedIntermediate {
    pub name: String,
    pub amount: i64,
    pub cost: Decimal,
    pub level: i32,
    pub depth: u32,
    pub is_manually_overridden: bool,
}

/// One line of a cached recipe shape, keyed by the resolved ingredient
/// name rather than the catalog id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeShapeLine {
    pub name: String,
    pub quantity: i64,
}

/// The recipe of an intermediate as it was expanded, captured so that a
/// later override set/clear can detach and re-attach exactly the
/// quantities that were attributed to it, without a catalog round trip.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeShape {
    pub lines: Vec<RecipeShapeLine>,
}

/// A user-pinned unit cost as persisted by the cost storage collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedCost {
    pub name: String,
    pub cost: Decimal,
    pub item_type: String,
}

/// Rounds a kama amount to a whole number, half away from zero.
pub(crate) fn round_kamas(value: Decimal) -> i64 {
    value
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
        .unwrap_or_default()
}
