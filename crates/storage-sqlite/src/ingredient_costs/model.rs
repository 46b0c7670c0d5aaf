//! Database model for saved ingredient costs.

use std::str::FromStr;

use chrono::Utc;
use diesel::prelude::*;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use craftimizer_core::crafting::SavedCost;

/// Database model for one user-pinned ingredient cost.
#[derive(Queryable, Insertable, AsChangeset, Debug, Clone, Serialize, Deserialize)]
#[diesel(table_name = crate::schema::ingredient_costs)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct IngredientCostDB {
    pub name: String,
    pub cost: String,
    pub item_type: String,
    pub updated_at: String,
}

impl From<IngredientCostDB> for SavedCost {
    fn from(db: IngredientCostDB) -> Self {
        SavedCost {
            name: db.name,
            cost: Decimal::from_str(&db.cost).unwrap_or_default(),
            item_type: db.item_type,
        }
    }
}

impl From<&SavedCost> for IngredientCostDB {
    fn from(record: &SavedCost) -> Self {
        IngredientCostDB {
            name: record.name.clone(),
            cost: record.cost.to_string(),
            item_type: record.item_type.clone(),
            updated_at: Utc::now().to_rfc3339(),
        }
    }
}
