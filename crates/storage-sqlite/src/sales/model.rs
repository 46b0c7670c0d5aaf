//! Database models for the sales ledger.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use craftimizer_core::sales::{NewSale, Sale};

/// Database model for one ledger row.
#[derive(Queryable, Identifiable, Insertable, AsChangeset, Debug, Clone, Serialize, Deserialize)]
#[diesel(table_name = crate::schema::sales)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct SaleDB {
    pub id: i64,
    pub item_name: String,
    pub quantity: i64,
    pub cost_price: String,
    pub sell_price: String,
    pub added_date: String,
    pub sell_date: Option<String>,
    pub profit: String,
}

/// Insertable model: the id is assigned by SQLite.
#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = crate::schema::sales)]
pub struct NewSaleDB {
    pub item_name: String,
    pub quantity: i64,
    pub cost_price: String,
    pub sell_price: String,
    pub added_date: String,
    pub sell_date: Option<String>,
    pub profit: String,
}

fn parse_datetime(raw: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|_| Utc::now())
}

impl From<SaleDB> for Sale {
    fn from(db: SaleDB) -> Self {
        Sale {
            id: db.id,
            item_name: db.item_name,
            quantity: db.quantity,
            cost_price: Decimal::from_str(&db.cost_price).unwrap_or_default(),
            sell_price: Decimal::from_str(&db.sell_price).unwrap_or_default(),
            added_date: parse_datetime(&db.added_date),
            sell_date: db.sell_date.as_deref().map(parse_datetime),
            profit: Decimal::from_str(&db.profit).unwrap_or_default(),
        }
    }
}

impl From<&Sale> for SaleDB {
    fn from(sale: &Sale) -> Self {
        SaleDB {
            id: sale.id,
            item_name: sale.item_name.clone(),
            quantity: sale.quantity,
            cost_price: sale.cost_price.to_string(),
            sell_price: sale.sell_price.to_string(),
            added_date: sale.added_date.to_rfc3339(),
            sell_date: sale.sell_date.map(|date| date.to_rfc3339()),
            profit: sale.profit.to_string(),
        }
    }
}

impl From<&NewSale> for NewSaleDB {
    fn from(sale: &NewSale) -> Self {
        NewSaleDB {
            item_name: sale.item_name.clone(),
            quantity: sale.quantity,
            cost_price: sale.cost_price.to_string(),
            sell_price: sale.sell_price.to_string(),
            added_date: sale.added_date.to_rfc3339(),
            sell_date: sale.sell_date.map(|date| date.to_rfc3339()),
            profit: sale.profit.to_string(),
        }
    }
}
