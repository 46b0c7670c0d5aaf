//! Database model for tracked crafted items.

use std::str::FromStr;

use diesel::prelude::*;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use craftimizer_core::crafting::CraftedItemResult;

/// Database model for one tracked crafted item, including the last
/// computed cost and profit so the list renders instantly on startup.
#[derive(Queryable, Insertable, AsChangeset, Debug, Clone, Serialize, Deserialize)]
#[diesel(table_name = crate::schema::crafted_items)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct CraftedItemDB {
    pub ankama_id: i64,
    pub name: String,
    pub amount: i64,
    pub cost_per_unit: i64,
    pub sell_price: String,
    pub profit: i64,
}

impl From<CraftedItemDB> for CraftedItemResult {
    fn from(db: CraftedItemDB) -> Self {
        CraftedItemResult {
            ankama_id: db.ankama_id,
            name: db.name,
            amount: db.amount,
            cost_per_unit: db.cost_per_unit,
            sell_price: Decimal::from_str(&db.sell_price).unwrap_or_default(),
            profit: db.profit,
        }
    }
}

impl From<&CraftedItemResult> for CraftedItemDB {
    fn from(item: &CraftedItemResult) -> Self {
        CraftedItemDB {
            ankama_id: item.ankama_id,
            name: item.name.clone(),
            amount: item.amount,
            cost_per_unit: item.cost_per_unit,
            sell_price: item.sell_price.to_string(),
            profit: item.profit,
        }
    }
}
