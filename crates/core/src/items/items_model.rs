//! Domain models for catalog items.

use serde::{Deserialize, Serialize};

/// One line of a recipe: the ingredient's catalog id and how many units
/// a single craft consumes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeEntry {
    pub item_ankama_id: i64,
    pub quantity: i64,
}

/// Static definition of a catalog item as served by the item catalog.
///
/// An empty `recipe` marks a terminal ingredient (raw/purchased resource);
/// a non-empty one marks a craftable item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemDefinition {
    pub ankama_id: i64,
    pub name: String,
    pub level: i32,
    pub item_type: String,
    #[serde(default)]
    pub recipe: Vec<RecipeEntry>,
}

/// Whether a resolved node is a terminal ingredient or a craftable
/// intermediate. Decided once per definition lookup, never re-inferred
/// at call sites.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemKind {
    /// No recipe: a raw or purchased resource.
    Ingredient,
    /// Has a recipe of its own.
    Intermediate,
}

impl ItemDefinition {
    /// Classifies this definition by the presence of a non-empty recipe.
    pub fn kind(&self) -> ItemKind {
        if self.recipe.is_empty() {
            ItemKind::Ingredient
        } else {
            ItemKind::Intermediate
        }
    }
}
