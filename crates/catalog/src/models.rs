//! Raw DofusDude API shapes and their conversion to core models.

use craftimizer_core::items::{ItemDefinition, RecipeEntry};
use serde::{Deserialize, Serialize};

/// Item type classification as the API reports it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiItemType {
    pub name: String,
    pub id: i64,
}

/// One recipe line as the API reports it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiRecipeEntry {
    pub item_ankama_id: i64,
    pub quantity: i64,
    #[serde(default)]
    pub item_subtype: Option<String>,
}

/// One item as served by the `/items/{dataset}/all` endpoints. Fields the
/// tracker does not use (description, image urls, stats) are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiItem {
    pub ankama_id: i64,
    pub name: String,
    #[serde(default)]
    pub level: i32,
    #[serde(rename = "type")]
    pub item_type: ApiItemType,
    #[serde(default)]
    pub recipe: Option<Vec<ApiRecipeEntry>>,
}

/// Envelope of the `all` endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemsResponse {
    pub items: Vec<ApiItem>,
}

impl From<ApiItem> for ItemDefinition {
    fn from(item: ApiItem) -> Self {
        ItemDefinition {
            ankama_id: item.ankama_id,
            name: item.name,
            level: item.level,
            item_type: item.item_type.name,
            recipe: item
                .recipe
                .unwrap_or_default()
                .into_iter()
                .map(|entry| RecipeEntry {
                    item_ankama_id: entry.item_ankama_id,
                    quantity: entry.quantity,
                })
                .collect(),
        }
    }
}
